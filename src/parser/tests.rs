use super::*;
use crate::graph::Node;
use rstest::{fixture, rstest};

#[fixture]
fn options() -> ParseOptions {
    ParseOptions::default()
}

fn node<'a>(graph: &'a MikadoGraph, name: &str) -> &'a Node {
    graph
        .get(name)
        .unwrap_or_else(|| panic!("node {name} missing"))
}

fn prereqs(graph: &MikadoGraph, name: &str) -> Vec<String> {
    node(graph, name).prereqs.clone()
}

#[rstest]
fn single_chain(options: ParseOptions) {
    let graph = from_str("A -> B -> C", &options).expect("parse");
    assert_eq!(graph.len(), 3);
    assert!(node(&graph, "A").root);
    assert!(!node(&graph, "B").root);
    assert_eq!(prereqs(&graph, "A"), vec!["B"]);
    assert_eq!(prereqs(&graph, "B"), vec!["C"]);
    assert!(prereqs(&graph, "C").is_empty());
}

#[rstest]
fn continuation_attaches_to_node_above_arrow(options: ParseOptions) {
    let text = "A -> B -> C\n       -> D✓\n";
    let graph = from_str(text, &options).expect("parse");
    assert_eq!(prereqs(&graph, "B"), vec!["C", "D"]);
    assert!(node(&graph, "D").done);
    assert!(!node(&graph, "D").root);
}

#[rstest]
fn continuation_reaches_ancestor(options: ParseOptions) {
    let text = "A -> B -> C\n  -> D\n";
    let graph = from_str(text, &options).expect("parse");
    assert_eq!(prereqs(&graph, "A"), vec!["B", "D"]);
}

#[rstest]
fn continuation_chains_further_nodes(options: ParseOptions) {
    let text = "A -> B\n  -> C -> D\n       -> E\n";
    let graph = from_str(text, &options).expect("parse");
    assert_eq!(prereqs(&graph, "A"), vec!["B", "C"]);
    assert_eq!(prereqs(&graph, "C"), vec!["D", "E"]);
}

#[rstest]
fn columns_count_characters_not_bytes(options: ParseOptions) {
    let text = "Ä✓ -> B\n       -> C\n";
    let graph = from_str(text, &options).expect("parse");
    assert_eq!(prereqs(&graph, "B"), vec!["C"]);
    assert!(node(&graph, "Ä").done);
}

#[rstest]
fn unaligned_continuation_is_rejected(options: ParseOptions) {
    let text = "A -> B\n              -> X\n";
    let err = from_str(text, &options).expect_err("misaligned arrow");
    match err {
        ParseError::UnresolvedContinuation {
            line, column, text, ..
        } => {
            assert_eq!(line, 2);
            assert_eq!(column, 14);
            assert_eq!(text, "              -> X");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn continuation_before_any_node_is_rejected(options: ParseOptions) {
    let err = from_str("    -> X", &options).expect_err("nothing to attach to");
    assert!(matches!(
        err,
        ParseError::UnresolvedContinuation { line: 1, .. }
    ));
}

#[rstest]
fn comments_and_blank_lines_are_skipped(options: ParseOptions) {
    let text = "# plan\n\nA -> B\n   \n  # -> ignored\n  -> C\n";
    let graph = from_str(text, &options).expect("parse");
    assert_eq!(prereqs(&graph, "A"), vec!["B", "C"]);
    assert!(!graph.contains("ignored"));
}

#[rstest]
fn done_flag_is_sticky_across_mentions(options: ParseOptions) {
    let text = "A -> B ✓\nC -> B\n";
    let graph = from_str(text, &options).expect("parse");
    assert!(node(&graph, "B").done);
}

#[rstest]
fn ignore_done_strips_markers(#[values("✓", " +", " X")] marker: &str) {
    let options = ParseOptions { ignore_done: true };
    let graph = from_str(&format!("A -> B{marker}"), &options).expect("parse");
    assert!(!node(&graph, "B").done);
    assert!(graph.contains("B"));
}

#[rstest]
fn spaced_marker_alone_names_an_empty_done_node(options: ParseOptions) {
    let graph = from_str("A -> X", &options).expect("parse");
    assert_eq!(prereqs(&graph, "A"), vec![""]);
    assert!(node(&graph, "").done);
    assert!(!graph.contains("X"));
}

#[rstest]
fn duplicate_dependencies_are_kept(options: ParseOptions) {
    let text = "A -> B\nA -> B\n";
    let graph = from_str(text, &options).expect("parse");
    assert_eq!(prereqs(&graph, "A"), vec!["B", "B"]);
}

#[rstest]
fn root_flag_follows_last_mention(options: ParseOptions) {
    let graph = from_str("B\nA -> B\n", &options).expect("parse");
    assert!(!node(&graph, "B").root);

    let reordered = from_str("A -> B\nB\n", &options).expect("parse");
    assert!(node(&reordered, "B").root);
}

#[rstest]
fn every_prereq_is_registered(options: ParseOptions) {
    let text = "Goal -> A -> B\n        -> C\n     -> D ✓ -> E\n";
    let graph = from_str(text, &options).expect("parse");
    for n in graph.nodes() {
        for prereq in &n.prereqs {
            assert!(graph.contains(prereq), "{prereq} missing");
        }
    }
}

#[rstest]
fn quotes_and_line_breaks_are_preserved(options: ParseOptions) {
    let graph = from_str(r#"Rename "x"\nin core -> B"#, &options).expect("parse");
    assert!(graph.contains(r#"Rename \"x\"\nin core"#));
}

#[rstest]
fn reader_failure_is_unreadable_source(options: ParseOptions) {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("boom"))
        }
    }
    let err = from_reader(Broken, "stdin", &options).expect_err("read failure");
    assert!(matches!(err, ParseError::UnreadableSource { .. }));
}

#[rstest]
fn missing_file_is_unreadable_source(options: ParseOptions) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8Path::from_path(dir.path())
        .expect("utf8 tempdir")
        .join("missing.mikado");
    let err = from_path(&path, &options).expect_err("missing file");
    assert!(err.to_string().contains("missing.mikado"));
}
