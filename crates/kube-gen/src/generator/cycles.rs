use std::collections::BTreeMap;

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use super::ast::ModelDef;

/// Finds reference cycles between models and boxes the direct references that close them.
///
/// Only direct references count: a `Vec` or `BTreeMap` already puts its elements on the heap, so a
/// cycle that passes through one has a finite size. Returns the cycles found, as schema names.
pub(crate) fn box_cyclic_references(models: &mut [ModelDef]) -> Vec<Vec<String>> {
  let cycles = detect_cycles(models);

  let component: BTreeMap<&str, usize> = cycles
    .iter()
    .enumerate()
    .flat_map(|(index, cycle)| cycle.iter().map(move |schema| (schema.as_str(), index)))
    .collect();

  for model in models.iter_mut() {
    let Some(&owner) = component.get(model.ty.schema.as_str()) else {
      continue;
    };
    for property in &mut model.properties {
      let closes_cycle = property
        .ty
        .named_references()
        .into_iter()
        .any(|(target, in_collection)| !in_collection && component.get(target.schema.as_str()) == Some(&owner));
      if closes_cycle {
        property.boxed = true;
      }
    }
  }

  cycles
}

pub(crate) fn detect_cycles(models: &[ModelDef]) -> Vec<Vec<String>> {
  let mut graph = DiGraphMap::<&str, ()>::new();
  for model in models {
    graph.add_node(model.ty.schema.as_str());
    for property in &model.properties {
      for (target, in_collection) in property.ty.named_references() {
        if !in_collection {
          graph.add_edge(model.ty.schema.as_str(), target.schema.as_str(), ());
        }
      }
    }
  }

  let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut names: Vec<String> = scc.into_iter().map(String::from).collect();
      names.sort();
      names
    })
    .collect();
  cycles.sort();
  cycles
}
