use std::collections::HashSet;
use std::path::Path;

use crate::input::{InputError, open_maybe_gz};
use crate::pathways::{GeneNode, Pathway, PathwayGraph};

/// Square gene × gene coexpression values; row `i` and column `i` are `genes[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoexpressionMatrix {
    pub genes: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CoexpressionMatrix {
    pub fn new(genes: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self, InputError> {
        let n = genes.len();
        if values.len() != n || values.iter().any(|row| row.len() != n) {
            return Err(InputError::InvalidInput(format!(
                "coexpression matrix must be {n} x {n} to match its gene list"
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = genes.iter().find(|g| !seen.insert(g.as_str())) {
            return Err(InputError::InvalidInput(format!(
                "gene {dup} appears twice in the coexpression matrix"
            )));
        }
        Ok(Self { genes, values })
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

pub fn threshold_pathway_name(threshold: f64) -> String {
    format!("GPL570-{threshold}")
}

/// Pathway over gene pairs with `|value| > threshold`, ignoring the diagonal.
///
/// Nodes are keyed and labelled by gene symbol, in matrix order of first
/// appearance, with ownership weight 1. Every kept pair is linked in both
/// directions. Genes without a kept pair are left out, and each gene counts
/// as its own group.
pub fn pathway_from_threshold(
    name: &str,
    matrix: &CoexpressionMatrix,
    threshold: f64,
) -> Result<Pathway, InputError> {
    if threshold.is_nan() {
        return Err(InputError::InvalidInput(
            "coexpression threshold is NaN".to_string(),
        ));
    }

    let mut graph = PathwayGraph::new();
    for (i, gene) in matrix.genes.iter().enumerate() {
        for (j, other) in matrix.genes.iter().enumerate() {
            let value = matrix.values[i][j];
            if i == j || value.is_nan() || value.abs() <= threshold {
                continue;
            }
            for symbol in [gene, other] {
                if !graph.contains(symbol) {
                    graph.add_node(GeneNode {
                        id: symbol.clone(),
                        label: symbol.clone(),
                        ownership_weight: 1.0,
                    });
                }
            }
            graph.add_edge(gene, other, "");
            graph.add_edge(other, gene, "");
        }
    }

    tracing::info!(
        "coexpression pathway {name}: {} of {} genes, {} directed edges at |r| > {threshold}",
        graph.node_count(),
        matrix.len(),
        graph.edge_count()
    );
    let groups = graph.node_count();
    Ok(Pathway::new(name, graph, groups))
}

/// Reads a labelled square matrix: a header of gene symbols after one corner
/// cell, then one row per gene starting with its symbol. Tab-separated when
/// the file name contains `.tsv` or `.txt`, comma-separated otherwise.
pub fn load_coexpression_matrix(path: &Path) -> Result<CoexpressionMatrix, InputError> {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let delimiter = if file_name.contains(".tsv") || file_name.contains(".txt") {
        b'\t'
    } else {
        b','
    };

    let reader = open_maybe_gz(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let genes: Vec<String> = csv_reader
        .headers()?
        .iter()
        .skip(1)
        .map(str::to_string)
        .collect();

    let mut values = Vec::with_capacity(genes.len());
    for (row_idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let line_no = row_idx + 2;
        let symbol = row.get(0).unwrap_or("");
        if genes.get(row_idx).map(String::as_str) != Some(symbol) {
            return Err(InputError::InvalidInput(format!(
                "{} line {line_no}: row gene `{symbol}` does not match column order",
                path.display()
            )));
        }
        let parsed = row
            .iter()
            .skip(1)
            .map(|cell| {
                if cell.is_empty() {
                    return Ok(f64::NAN);
                }
                cell.parse::<f64>().map_err(|_| {
                    InputError::InvalidInput(format!(
                        "{} line {line_no}: `{cell}` is not a number",
                        path.display()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        values.push(parsed);
    }

    let matrix = CoexpressionMatrix::new(genes, values)?;
    tracing::info!(
        "loaded {} x {} coexpression matrix from {}",
        matrix.len(),
        matrix.len(),
        path.display()
    );
    Ok(matrix)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pathways/coexpression.rs"]
mod tests;
