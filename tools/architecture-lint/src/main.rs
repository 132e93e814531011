//! Runs the layer lint over the workspace's `client/` crate.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
#[error("unable to locate the workspace root (a directory whose Cargo.toml declares [workspace])")]
struct WorkspaceRootNotFound;

fn main() -> ExitCode {
    let outcome = workspace_root()
        .map_err(|err| err.to_string())
        .and_then(|root| {
            architecture_lint::lint_client_sources(&root.join("client")).map_err(|err| err.to_string())
        });
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            // Nothing useful to do if stderr itself is gone.
            drop(writeln!(io::stderr().lock(), "{message}"));
            ExitCode::FAILURE
        }
    }
}

fn workspace_root() -> Result<PathBuf, WorkspaceRootNotFound> {
    let candidates = [
        std::env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        std::env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    candidates
        .iter()
        .flatten()
        .find_map(|start| start.ancestors().find(|dir| declares_workspace(dir)))
        .map(Path::to_path_buf)
        .ok_or(WorkspaceRootNotFound)
}

fn declares_workspace(dir: &Path) -> bool {
    fs::read_to_string(dir.join("Cargo.toml"))
        .is_ok_and(|manifest| manifest.lines().any(|line| line.trim() == "[workspace]"))
}
