use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use crate::input::{InputError, ParseError, open_maybe_gz};

/// Parent id used by pathway files for top-level elements.
pub const ROOT_SENTINEL: &str = "-1";

const GENE_TABLE_START: usize = 5;
const GENE_FIELDS: usize = 4;
const EDGE_FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Gene,
    Family,
    Complex,
    Process,
}

impl ElementType {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Gene => "GENE",
            ElementType::Family => "FAMILY",
            ElementType::Complex => "COMPLEX",
            ElementType::Process => "PROCESS",
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, ElementType::Family | ElementType::Complex)
    }
}

impl FromStr for ElementType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GENE" => Ok(ElementType::Gene),
            "FAMILY" => Ok(ElementType::Family),
            "COMPLEX" => Ok(ElementType::Complex),
            "PROCESS" => Ok(ElementType::Process),
            _ => Err(()),
        }
    }
}

/// One row of the gene table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub name: String,
    pub id: String,
    pub element_type: ElementType,
    /// `None` for top-level rows (`-1` in the file).
    pub parent_id: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub edge_id: String,
    pub source_id: String,
    pub target_id: String,
    pub label: String,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct ParsedPathway {
    pub title: String,
    pub genes: Vec<RawToken>,
    pub edges: Vec<EdgeRecord>,
}

pub fn parse_pathway_file(path: &Path) -> Result<ParsedPathway, InputError> {
    let reader = open_maybe_gz(path)?;
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    parse_lines(&lines).map_err(|source| InputError::Pathway {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_pathway_str(text: &str) -> Result<ParsedPathway, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<ParsedPathway, ParseError> {
    if lines.len() < GENE_TABLE_START {
        return Err(ParseError::Truncated { line: lines.len() });
    }
    let line_at = |idx: usize| lines[idx].as_ref().trim_end_matches('\r');

    // Lines 2-5 are blank, description, blank, gene header.
    let title = line_at(0).trim().to_string();

    let mut idx = GENE_TABLE_START;
    let mut genes = Vec::new();
    while idx < lines.len() {
        let line = line_at(idx);
        if line.trim().is_empty() {
            break;
        }
        genes.push(parse_gene_row(line, idx + 1)?);
        idx += 1;
    }

    while idx < lines.len() && line_at(idx).trim().is_empty() {
        idx += 1;
    }
    // Edge header.
    idx += 1;

    let mut edges = Vec::new();
    while idx < lines.len() {
        let line = line_at(idx);
        if line.trim().is_empty() {
            break;
        }
        edges.push(parse_edge_row(line, idx + 1)?);
        idx += 1;
    }

    tracing::debug!(
        "parsed pathway {title}: {} gene rows, {} edge rows",
        genes.len(),
        edges.len()
    );

    Ok(ParsedPathway {
        title,
        genes,
        edges,
    })
}

fn parse_gene_row(line: &str, line_no: usize) -> Result<RawToken, ParseError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < GENE_FIELDS {
        return Err(ParseError::MalformedRow {
            line: line_no,
            expected: GENE_FIELDS,
            found: fields.len(),
        });
    }
    let element_type =
        ElementType::from_str(fields[2]).map_err(|_| ParseError::MalformedType {
            line: line_no,
            value: fields[2].to_string(),
        })?;
    let parent_id = if fields[3] == ROOT_SENTINEL {
        None
    } else {
        Some(fields[3].to_string())
    };
    Ok(RawToken {
        name: fields[0].to_string(),
        id: fields[1].to_string(),
        element_type,
        parent_id,
        line: line_no,
    })
}

fn parse_edge_row(line: &str, line_no: usize) -> Result<EdgeRecord, ParseError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < EDGE_FIELDS {
        return Err(ParseError::MalformedRow {
            line: line_no,
            expected: EDGE_FIELDS,
            found: fields.len(),
        });
    }
    Ok(EdgeRecord {
        edge_id: fields[0].to_string(),
        source_id: fields[1].to_string(),
        target_id: fields[2].to_string(),
        label: fields.get(3).map(|s| s.to_string()).unwrap_or_default(),
        line: line_no,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/pathway_file.rs"]
mod tests;
