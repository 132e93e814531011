//! Repo-local lint keeping the client's hexagonal layers apart.
//!
//! The `mycollegebook` client splits into `domain` (records, ports and the
//! session service), `inbound` (the CLI) and `outbound` (the HTTP client
//! and token stores). The lint parses every source file under those three
//! directories and rejects:
//!
//! - `domain` code reaching into either adapter layer or any transport,
//!   filesystem or configuration crate
//! - `inbound` code reaching into `outbound` or the transport and
//!   filesystem crates that `outbound` wraps
//! - `outbound` code reaching into `inbound` or the CLI parser
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Name under which the client crate refers to itself from binaries and tests.
const CLIENT_CRATE: &str = "mycollegebook";

/// A single boundary violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `client/src`.
    pub file: PathBuf,
    /// The broken rule, naming the offending layer or crate.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failures returned by the lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    /// Walking or reading the source tree failed.
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    /// A file is outside the layers or is not valid Rust.
    #[error("could not parse {} while linting architecture: {message}", .file.display())]
    Parse {
        /// Offending file.
        file: PathBuf,
        /// Why it was rejected.
        message: String,
    },
    /// At least one boundary was crossed.
    #[error("architecture boundary violations:\n{}", render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust source file to lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `client/src`.
    pub file: PathBuf,
    /// Rust source text.
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

/// What one layer may not import.
struct Boundary {
    layers: &'static [&'static str],
    crates: &'static [&'static str],
}

const DOMAIN_BOUNDARY: Boundary = Boundary {
    layers: &["inbound", "outbound"],
    crates: &["actix_web", "cap_std", "clap", "ortho_config", "reqwest"],
};

const INBOUND_BOUNDARY: Boundary = Boundary {
    layers: &["outbound"],
    crates: &["cap_std", "reqwest"],
};

const OUTBOUND_BOUNDARY: Boundary = Boundary {
    layers: &["inbound"],
    crates: &["clap"],
};

const LAYER_DIRS: [&str; 3] = ["domain", "inbound", "outbound"];

impl Layer {
    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        match first {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    const fn boundary(self) -> &'static Boundary {
        match self {
            Self::Domain => &DOMAIN_BOUNDARY,
            Self::Inbound => &INBOUND_BOUNDARY,
            Self::Outbound => &OUTBOUND_BOUNDARY,
        }
    }
}

/// Lint the client crate on disk.
///
/// `client_dir` is the `client/` directory at the repository root.
pub fn lint_client_sources(client_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = client_dir.join("src");
    let mut sources = Vec::new();
    for layer_dir in LAYER_DIRS {
        let dir = src_dir.join(layer_dir);
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: format!("file is not under one of {}", LAYER_DIRS.join(", ")),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let boundary = layer.boundary();
    let mut imports = ImportCollector::default();
    imports.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for path in &imports.paths {
        if let Some(target) = sibling_layer(path).filter(|root| forbids(boundary.layers, root)) {
            messages.insert(format!(
                "{} module must not depend on crate::{target}",
                layer.name()
            ));
        }
        if let Some(name) = external_crate(path).filter(|root| forbids(boundary.crates, root)) {
            messages.insert(format!(
                "{} module must not depend on external crate `{name}`",
                layer.name()
            ));
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

fn forbids(names: &[&str], candidate: &str) -> bool {
    names.iter().any(|name| *name == candidate)
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// The client layer a path names, if any.
fn sibling_layer(path: &[String]) -> Option<&str> {
    let first = path.first()?.as_str();
    if LAYER_DIRS.contains(&first) {
        return Some(first);
    }
    let named = if is_relative(first) {
        path.iter().find(|segment| !is_relative(segment.as_str()))?
    } else if first == CLIENT_CRATE {
        path.get(1)?
    } else {
        return None;
    };
    LAYER_DIRS
        .iter()
        .copied()
        .find(|layer| *layer == named.as_str())
}

fn external_crate(path: &[String]) -> Option<&str> {
    let root = path.first()?.as_str();
    (!is_relative(root) && root != CLIENT_CRATE).then_some(root)
}

/// Every path and flattened `use` tree in a file.
#[derive(Default)]
struct ImportCollector {
    paths: BTreeSet<Vec<String>>,
}

impl ImportCollector {
    fn flatten_use(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        let leaf = match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                return self.flatten_use(&path.tree, prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten_use(item, prefix.clone());
                }
                return;
            }
            syn::UseTree::Name(name) => name.ident.to_string(),
            syn::UseTree::Rename(rename) => rename.ident.to_string(),
            syn::UseTree::Glob(_) => "*".to_owned(),
        };
        prefix.push(leaf);
        self.paths.insert(prefix);
    }
}

impl<'ast> Visit<'ast> for ImportCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.flatten_use(&node.tree, Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src_root)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}
