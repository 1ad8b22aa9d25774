use std::path::Path;

use crate::input::{InputError, ParseError, ParsedPathway, parse_pathway_file};
use crate::pathways::Pathway;
use crate::pathways::aliases::resolve_aliases;
use crate::pathways::assemble::assemble_graph;

pub fn build_pathway(parsed: &ParsedPathway) -> Result<Pathway, ParseError> {
    let aliases = resolve_aliases(&parsed.genes)?;
    let graph = assemble_graph(parsed, &aliases);
    Ok(Pathway::new(parsed.title.clone(), graph, aliases.group_count))
}

pub fn load_pathway(path: &Path) -> Result<Pathway, InputError> {
    let mut parsed = parse_pathway_file(path)?;
    if parsed.title.is_empty() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::warn!(
            "pathway file {} has no title; using {stem}",
            path.display()
        );
        parsed.title = stem;
    }
    let pathway = build_pathway(&parsed).map_err(|source| InputError::Pathway {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        "built pathway {}: {} genes, {} interactions",
        pathway.name(),
        pathway.graph().node_count(),
        pathway.graph().edge_count()
    );
    Ok(pathway)
}
