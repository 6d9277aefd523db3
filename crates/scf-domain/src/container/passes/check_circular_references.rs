//! Detects constructor dependency cycles

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::container::Container;
use crate::error::{Error, Result};
use crate::ports::CompilerPass;

/// Fails when services depend on each other through constructor arguments
///
/// Method-call references are not considered: they are injected after
/// construction and cannot deadlock instantiation.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckCircularReferencesPass;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

impl CompilerPass for CheckCircularReferencesPass {
    fn id(&self) -> &str {
        "check_circular_references"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        let mut graph: IndexMap<String, Vec<String>> = IndexMap::new();
        for (id, definition) in container.definitions() {
            let mut edges = Vec::new();
            for reference in definition.constructor_references() {
                edges.push(container.resolve_alias(&reference.id)?);
            }
            graph.insert(id.clone(), edges);
        }

        let mut state: HashMap<String, Visit> = HashMap::new();
        let mut path: Vec<String> = Vec::new();
        for id in graph.keys() {
            visit(id, &graph, &mut state, &mut path)?;
        }
        Ok(())
    }
}

fn visit(
    id: &str,
    graph: &IndexMap<String, Vec<String>>,
    state: &mut HashMap<String, Visit>,
    path: &mut Vec<String>,
) -> Result<()> {
    match state.get(id) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => {
            let start = path.iter().position(|seen| seen == id).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(id.to_string());
            return Err(Error::ServiceCircularReference { path: cycle });
        }
        None => {}
    }

    let Some(edges) = graph.get(id) else {
        return Ok(());
    };

    state.insert(id.to_string(), Visit::InProgress);
    path.push(id.to_string());
    for dependency in edges {
        visit(dependency, graph, state, path)?;
    }
    path.pop();
    state.insert(id.to_string(), Visit::Done);
    Ok(())
}
