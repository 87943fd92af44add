//! End-to-end validation of DOT generation.
//!
//! These tests parse the fixtures under `tests/data`, snapshot the generated
//! DOT using `insta`, and, when Graphviz is installed, check that the real
//! `dot` executable accepts the output.

use insta::{Settings, assert_snapshot};
use mikado::dot_gen::{self, RenderOptions};
use mikado::parser::{self, ParseOptions};
use std::process::Command;
use test_support::graphviz::dot_integration_workspace;

fn compile_fixture(name: &str, options: &RenderOptions) -> String {
    let path = camino::Utf8PathBuf::from(format!(
        "{}/tests/data/{name}.mikado",
        env!("CARGO_MANIFEST_DIR")
    ));
    let graph = parser::from_path(&path, &ParseOptions::default()).expect("parse fixture");
    dot_gen::compile(graph, options)
}

fn snapshot(name: &str, dot: &str) {
    let mut settings = Settings::new();
    settings.set_snapshot_path(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/snapshots/dot"));
    settings.bind(|| {
        assert_snapshot!(name, dot);
    });
}

#[test]
fn release_plan_dot() {
    let dot = compile_fixture("release", &RenderOptions::default());
    snapshot("release_plan", &dot);
}

#[test]
fn release_plan_hiding_done_work() {
    let options = RenderOptions {
        hide_done: true,
        ..RenderOptions::default()
    };
    let dot = compile_fixture("release", &options);
    snapshot("release_plan_hide_done", &dot);
}

#[test]
fn finished_plan_with_auto_done() {
    let options = RenderOptions {
        auto_done: true,
        ..RenderOptions::default()
    };
    let dot = compile_fixture("finished", &options);
    snapshot("finished_plan_auto_done", &dot);
}

#[test]
fn graphviz_accepts_generated_dot() {
    let Ok(dir) = dot_integration_workspace() else {
        eprintln!("skipping test: graphviz must be installed for integration tests");
        return;
    };
    let dot = compile_fixture("release", &RenderOptions::default());
    let source = dir.path().join("release.gv");
    std::fs::write(&source, &dot).expect("write dot");
    let out = Command::new("dot")
        .arg("-Tsvg")
        .arg(&source)
        .output()
        .expect("spawn dot");
    assert!(
        out.status.success(),
        "dot rejected output: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let svg = String::from_utf8_lossy(&out.stdout);
    assert!(svg.contains("Migrate billing callers"));
}
