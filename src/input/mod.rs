use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod mutations;
pub mod pathway_file;
pub mod patients;

pub use mutations::{MutationRecord, MutationTable, load_mutations};
pub use pathway_file::{EdgeRecord, ElementType, ParsedPathway, RawToken, parse_pathway_file};
pub use patients::{PatientRegistry, load_patients};

/// Structural problems in a single pathway definition file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected at least {expected} tab-separated fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: unknown element type `{value}`")]
    MalformedType { line: usize, value: String },
    #[error("element {id} references unknown parent {parent}")]
    DanglingParent { id: String, parent: String },
    #[error("container {id} is part of a parent cycle")]
    CyclicParent { id: String },
    #[error("file ends at line {line} before the gene table")]
    Truncated { line: usize },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("pathway {}: {source}", path.display())]
    Pathway {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("pathway name {name} already loaded from {}", first.display())]
    DuplicatePathway { name: String, first: PathBuf },
    #[error("{}: missing column {column}", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
