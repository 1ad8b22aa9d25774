use crate::input::ParsedPathway;
use crate::pathways::aliases::ResolvedAliases;
use crate::pathways::graph::{GeneNode, PathwayGraph};

pub fn assemble_graph(parsed: &ParsedPathway, aliases: &ResolvedAliases) -> PathwayGraph {
    let mut graph = PathwayGraph::new();

    for gene in &aliases.top_level {
        graph.add_node(GeneNode {
            id: gene.id.clone(),
            label: gene.name.clone(),
            ownership_weight: 1.0,
        });
    }
    for nested in &aliases.nested {
        graph.add_node(GeneNode {
            id: nested.gene.id.clone(),
            label: nested.gene.name.clone(),
            ownership_weight: nested.ownership_weight,
        });
    }

    for edge in &parsed.edges {
        let sources: Vec<String> = aliases
            .expand(&edge.source_id)
            .into_iter()
            .filter(|id| graph.contains(id))
            .collect();
        let targets: Vec<String> = aliases
            .expand(&edge.target_id)
            .into_iter()
            .filter(|id| graph.contains(id))
            .collect();
        let fanned_out =
            aliases.is_container(&edge.source_id) || aliases.is_container(&edge.target_id);

        let mut added = 0usize;
        for source in &sources {
            for target in &targets {
                if fanned_out && source == target {
                    continue;
                }
                if graph.add_edge(source, target, &edge.label) {
                    added += 1;
                }
            }
        }
        if added == 0 {
            tracing::debug!(
                "edge {} ({} -> {}) resolved to no gene pairs (line {})",
                edge.edge_id,
                edge.source_id,
                edge.target_id,
                edge.line
            );
        }
    }

    graph
}

#[cfg(test)]
#[path = "../../tests/src_inline/pathways/assemble.rs"]
mod tests;
