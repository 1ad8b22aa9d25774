use super::*;
use crate::input::pathway_file::parse_pathway_str;
use crate::pathways::aliases::resolve_aliases;

fn assemble(genes: &[&str], edges: &[&str]) -> PathwayGraph {
    let text = format!(
        "TEST\n\ndesc\n\nNAME\tID\tTYPE\tPARENT_ID\n{}\n\nEDGE_ID\tSOURCE\tTARGET\tEDGE_TYPE\n{}\n",
        genes.join("\n"),
        edges.join("\n")
    );
    let parsed = parse_pathway_str(&text).unwrap();
    let aliases = resolve_aliases(&parsed.genes).unwrap();
    assemble_graph(&parsed, &aliases)
}

const GENES: &[&str] = &[
    "A\t1\tGENE\t-1",
    "C\t2\tCOMPLEX\t-1",
    "B\t3\tGENE\t2",
    "D\t4\tGENE\t2",
    "E\t5\tGENE\t-1",
    "Apoptosis\t6\tPROCESS\t-1",
];

#[test]
fn test_nodes_are_leaf_genes_in_order() {
    let graph = assemble(GENES, &[]);
    let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "5", "3", "4"]);
    assert!(!graph.contains("2"));
    assert!(!graph.contains("6"));
    assert_eq!(graph.node("3").unwrap().ownership_weight, 0.5);
    assert_eq!(graph.node("1").unwrap().ownership_weight, 1.0);
}

#[test]
fn test_container_edges_fan_out() {
    let graph = assemble(GENES, &["e1\t1\t2\tBINDS", "e2\t2\t5\tACTIVATES"]);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.edge_label("1", "3"), Some("BINDS"));
    assert_eq!(graph.edge_label("1", "4"), Some("BINDS"));
    assert_eq!(graph.edge_label("3", "5"), Some("ACTIVATES"));
    assert_eq!(graph.edge_label("4", "5"), Some("ACTIVATES"));
}

#[test]
fn test_container_self_edge_skips_loops() {
    let graph = assemble(GENES, &["e1\t2\t2\tBINDS"]);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edge_label("3", "4"), Some("BINDS"));
    assert_eq!(graph.edge_label("4", "3"), Some("BINDS"));
    assert_eq!(graph.edge_label("3", "3"), None);
}

#[test]
fn test_gene_self_edge_kept() {
    let graph = assemble(GENES, &["e1\t1\t1\tAUTO"]);
    assert_eq!(graph.edge_label("1", "1"), Some("AUTO"));
}

#[test]
fn test_process_and_unknown_endpoints_dropped() {
    let graph = assemble(GENES, &["e1\t6\t1\tX", "e2\t1\t99\tX", "e3\t1\t5\tX"]);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_label("1", "5"), Some("X"));
}

#[test]
fn test_duplicate_edge_last_label_wins() {
    let graph = assemble(GENES, &["e1\t1\t5\tfirst", "e2\t1\t5\tsecond"]);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_label("1", "5"), Some("second"));
}

#[test]
fn test_nested_container_edge_reaches_inner_genes() {
    let graph = assemble(
        &[
            "A\t1\tGENE\t-1",
            "OUTER\t10\tFAMILY\t-1",
            "G1\t11\tGENE\t10",
            "INNER\t20\tCOMPLEX\t10",
            "H1\t21\tGENE\t20",
        ],
        &["e1\t1\t10\tBINDS"],
    );
    assert_eq!(graph.edge_label("1", "11"), Some("BINDS"));
    assert_eq!(graph.edge_label("1", "21"), Some("BINDS"));
    assert_eq!(graph.edge_count(), 2);
}
