use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::pathways::{PathwaySet, load_pathway};

#[derive(Debug)]
pub struct PathwayLoadFailure {
    pub path: PathBuf,
    pub error: InputError,
}

#[derive(Debug)]
pub struct Stage1Output {
    pub pathways: PathwaySet,
    pub failures: Vec<PathwayLoadFailure>,
}

/// Loads every regular file in `dir`. A file that fails to parse is
/// reported in `failures` and does not stop the others.
pub fn load_pathway_dir(dir: &Path) -> Result<Stage1Output, InputError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(load_pathway_files(&paths))
}

/// Pathway names must be unique; a later file reusing a name is reported
/// as a failure and the earlier file is kept.
pub fn load_pathway_files(paths: &[PathBuf]) -> Stage1Output {
    let mut pathways = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    let mut first_seen: HashMap<String, PathBuf> = HashMap::new();
    for path in paths {
        let loaded = load_pathway(path).and_then(|pathway| {
            match first_seen.get(pathway.name()) {
                Some(first) => Err(InputError::DuplicatePathway {
                    name: pathway.name().to_string(),
                    first: first.clone(),
                }),
                None => {
                    first_seen.insert(pathway.name().to_string(), path.clone());
                    Ok(pathway)
                }
            }
        });
        match loaded {
            Ok(pathway) => pathways.push(pathway),
            Err(error) => {
                tracing::warn!("skipping pathway file: {error}");
                failures.push(PathwayLoadFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    let pathways = PathwaySet::new(pathways);
    tracing::info!(
        "loaded {} pathways ({} failed)",
        pathways.len(),
        failures.len()
    );
    Stage1Output { pathways, failures }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_pathways.rs"]
mod tests;
