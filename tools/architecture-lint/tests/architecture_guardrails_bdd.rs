//! Behaviour tests for the client layer guardrails.
//!
//! Each scenario writes a small `client/src` tree into a temporary directory
//! and runs the lint over it exactly as the binary does.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use architecture_lint::{ArchitectureLintError, LintSource, Violation};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

#[derive(Default)]
struct LintWorld {
    sources: RefCell<Vec<LintSource>>,
    outcome: RefCell<Option<Result<(), ArchitectureLintError>>>,
}

impl LintWorld {
    fn add(&self, file: &str, contents: &str) {
        self.sources.borrow_mut().push(LintSource {
            file: PathBuf::from(file),
            contents: contents.to_owned(),
        });
    }

    fn violations(&self) -> Vec<Violation> {
        match self.outcome.borrow().as_ref().expect("lint must have run") {
            Err(ArchitectureLintError::Violations(violations)) => violations.clone(),
            other => panic!("expected violations, got: {other:?}"),
        }
    }
}

#[fixture]
fn world() -> LintWorld {
    LintWorld::default()
}

#[given("a domain port, a CLI command and an HTTP adapter")]
fn well_layered_sources(world: &LintWorld) {
    world.add(
        "domain/ports/payments_api.rs",
        "use async_trait::async_trait; use crate::domain::PaymentIntentRequest; \
         #[async_trait] pub trait PaymentsApi: Send + Sync { async fn pay(&self, r: &PaymentIntentRequest); }",
    );
    world.add(
        "inbound/cli/render.rs",
        "use crate::domain::ports::PaymentsApi; use clap::Parser; pub fn show(_p: &dyn PaymentsApi) {}",
    );
    world.add(
        "outbound/http/payments.rs",
        "use reqwest::Client; use crate::domain::ports::PaymentsApi; pub struct Adapter(Client);",
    );
}

#[given("a CLI command that imports the HTTP adapter")]
fn cli_imports_http_adapter(world: &LintWorld) {
    world.add(
        "inbound/cli/commands.rs",
        "use crate::outbound::http::ApiClient; fn run(_c: &ApiClient) {}",
    );
}

#[given("a CLI command that uses reqwest")]
fn cli_uses_reqwest(world: &LintWorld) {
    world.add(
        "inbound/cli/commands.rs",
        "fn run() { let _client = reqwest::Client::new(); }",
    );
}

#[given("a domain module that derives OrthoConfig")]
fn domain_derives_ortho_config(world: &LintWorld) {
    world.add(
        "domain/platform.rs",
        "use ortho_config::OrthoConfig; #[derive(OrthoConfig)] pub struct Platform { name: String }",
    );
}

#[given("an HTTP adapter that imports the CLI")]
fn http_adapter_imports_cli(world: &LintWorld) {
    world.add(
        "outbound/http/client.rs",
        "use crate::inbound::cli::Command; pub fn send(_c: &Command) {}",
    );
}

#[when("the architecture lint runs")]
fn the_architecture_lint_runs(world: &LintWorld) {
    let temp_dir = TempDir::new().expect("tempdir");
    let client_dir = temp_dir.path().join("client");
    for source in world.sources.borrow().iter() {
        let path = client_dir.join("src").join(&source.file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, &source.contents).expect("write source file");
    }

    let outcome = architecture_lint::lint_client_sources(&client_dir);
    *world.outcome.borrow_mut() = Some(outcome);
}

#[then("the lint succeeds")]
fn the_lint_succeeds(world: &LintWorld) {
    let outcome = world.outcome.borrow();
    let outcome = outcome.as_ref().expect("lint must have run");
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

#[then("the lint reports \"{message}\" in \"{file}\"")]
fn the_lint_reports(world: &LintWorld, message: String, file: String) {
    let file = PathBuf::from(file);
    let violations = world.violations();
    assert!(
        violations
            .iter()
            .any(|violation| violation.file == file && violation.message.contains(&message)),
        "expected '{message}' in {file:?}, got: {violations:?}"
    );
}

#[then("{count} violations are reported")]
fn violations_are_reported(world: &LintWorld, count: usize) {
    let violations = world.violations();
    assert_eq!(violations.len(), count, "violations: {violations:?}");
}

#[scenario(path = "tests/features/architecture_guardrails.feature")]
fn architecture_guardrails(world: LintWorld) {
    drop(world);
}
