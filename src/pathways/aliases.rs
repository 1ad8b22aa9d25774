use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::input::{ElementType, ParseError, RawToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRef {
    pub name: String,
    pub id: String,
    pub parent_id: Option<String>,
}

/// A FAMILY or COMPLEX and the genes it directly owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerAlias {
    pub id: String,
    pub parent_id: Option<String>,
    pub member_genes: Vec<GeneRef>,
    pub child_containers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NestedGene {
    pub gene: GeneRef,
    pub ownership_weight: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedAliases {
    pub top_level: Vec<GeneRef>,
    pub nested: Vec<NestedGene>,
    pub containers: BTreeMap<String, ContainerAlias>,
    pub process_ids: BTreeSet<String>,
    /// Top-level genes, families and complexes.
    pub group_count: usize,
}

impl ResolvedAliases {
    pub fn is_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    /// Leaf gene ids behind `id`, breadth-first through nested containers.
    /// Ids that are not containers expand to themselves.
    pub fn expand(&self, id: &str) -> Vec<String> {
        if !self.is_container(id) {
            return vec![id.to_string()];
        }
        let mut out = Vec::new();
        let mut emitted = HashSet::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(container) = self.containers.get(current) else {
                continue;
            };
            for gene in &container.member_genes {
                if emitted.insert(gene.id.as_str()) {
                    out.push(gene.id.clone());
                }
            }
            queue.extend(container.child_containers.iter().map(String::as_str));
        }
        out
    }
}

pub fn resolve_aliases(tokens: &[RawToken]) -> Result<ResolvedAliases, ParseError> {
    let mut resolved = ResolvedAliases::default();
    let mut container_order = Vec::new();

    for token in tokens {
        if token.parent_id.is_none() && token.element_type != ElementType::Process {
            resolved.group_count += 1;
        }
        match token.element_type {
            ElementType::Family | ElementType::Complex => {
                let alias = ContainerAlias {
                    id: token.id.clone(),
                    parent_id: token.parent_id.clone(),
                    member_genes: Vec::new(),
                    child_containers: Vec::new(),
                };
                if resolved.containers.insert(token.id.clone(), alias).is_some() {
                    tracing::warn!(
                        "duplicate container id {}; keeping last (line {})",
                        token.id,
                        token.line
                    );
                } else {
                    container_order.push(token.id.clone());
                }
            }
            ElementType::Process => {
                resolved.process_ids.insert(token.id.clone());
            }
            ElementType::Gene => {}
        }
    }

    for id in &container_order {
        let parent = resolved.containers[id].parent_id.clone();
        if let Some(parent) = parent {
            match resolved.containers.get_mut(&parent) {
                Some(container) => container.child_containers.push(id.clone()),
                None => {
                    return Err(ParseError::DanglingParent {
                        id: id.clone(),
                        parent,
                    });
                }
            }
        }
    }

    for token in tokens.iter().filter(|t| t.element_type == ElementType::Gene) {
        let gene = GeneRef {
            name: token.name.clone(),
            id: token.id.clone(),
            parent_id: token.parent_id.clone(),
        };
        match &token.parent_id {
            None => resolved.top_level.push(gene),
            Some(parent) => match resolved.containers.get_mut(parent) {
                Some(container) => container.member_genes.push(gene),
                None => {
                    return Err(ParseError::DanglingParent {
                        id: token.id.clone(),
                        parent: parent.clone(),
                    });
                }
            },
        }
    }

    let mut nested = Vec::new();
    for id in &container_order {
        let container = &resolved.containers[id];
        let weight = ownership_weight(&resolved.containers, id)?;
        for gene in &container.member_genes {
            tracing::debug!("nested gene {} ({}) weight {weight}", gene.name, gene.id);
            nested.push(NestedGene {
                gene: gene.clone(),
                ownership_weight: weight,
            });
        }
    }
    resolved.nested = nested;

    Ok(resolved)
}

/// `1 / Π |direct members|` over the container and all its ancestors;
/// an empty product (some ancestor owns no genes directly) yields 1.
/// The product is kept in `f64` so deep chains stay positive.
fn ownership_weight(
    containers: &BTreeMap<String, ContainerAlias>,
    container_id: &str,
) -> Result<f64, ParseError> {
    let Some(mut current) = containers.get(container_id) else {
        return Ok(1.0);
    };
    let mut size = current.member_genes.len() as f64;
    let mut depth = 0usize;
    while let Some(parent) = &current.parent_id {
        current = containers
            .get(parent)
            .ok_or_else(|| ParseError::DanglingParent {
                id: current.id.clone(),
                parent: parent.clone(),
            })?;
        size *= current.member_genes.len() as f64;
        depth += 1;
        if depth > containers.len() {
            return Err(ParseError::CyclicParent {
                id: container_id.to_string(),
            });
        }
    }
    Ok(if size == 0.0 {
        1.0
    } else {
        (1.0 / size).max(f64::MIN_POSITIVE)
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pathways/aliases.rs"]
mod tests;
