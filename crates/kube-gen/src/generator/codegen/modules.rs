use std::{
  collections::{BTreeMap, BTreeSet},
  path::PathBuf,
};

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::format_source;
use crate::{
  generator::output::GeneratedTree,
  naming::identifiers::{ensure_unique, to_type_module_name},
};

#[derive(Debug, Default)]
struct ModuleNode {
  children: BTreeMap<String, ModuleNode>,
  /// Type name -> file body.
  items: BTreeMap<String, TokenStream>,
}

/// Lays out generated types as a module tree: a directory per module segment, a file per type and a
/// `mod.rs` per directory that declares children and re-exports the types.
#[derive(Debug, Default)]
pub(crate) struct ModuleTree {
  root: ModuleNode,
}

impl ModuleTree {
  /// Adds a type under `module`. A second type with the same name in the same module replaces the
  /// first; returns `true` when that happens.
  pub(crate) fn insert(&mut self, module: &[String], type_name: String, body: TokenStream) -> bool {
    let node = module
      .iter()
      .fold(&mut self.root, |node, segment| node.children.entry(segment.clone()).or_default());
    node.items.insert(type_name, body).is_some()
  }

  pub(crate) fn type_count(&self) -> usize {
    fn count(node: &ModuleNode) -> usize {
      node.items.len() + node.children.values().map(count).sum::<usize>()
    }
    count(&self.root)
  }

  pub(crate) fn render(&self, header: &str) -> anyhow::Result<GeneratedTree> {
    let mut tree = GeneratedTree::default();
    render_node(&self.root, PathBuf::new(), header, &mut tree)?;
    Ok(tree)
  }
}

fn render_node(node: &ModuleNode, dir: PathBuf, header: &str, tree: &mut GeneratedTree) -> anyhow::Result<()> {
  let mut used: BTreeSet<String> = node.children.keys().cloned().collect();
  used.insert("r#mod".to_string());

  let mut declarations = vec![];
  for (type_name, body) in &node.items {
    let stem = ensure_unique(&to_type_module_name(type_name), &used);
    used.insert(stem.clone());

    tree.insert(dir.join(format!("{}.rs", stem.trim_start_matches("r#"))), format_source(header, body)?);

    let module = format_ident!("{stem}");
    let ident = format_ident!("{type_name}");
    declarations.push(quote! {
      mod #module;
      pub use #module::#ident;
    });
  }

  let children = node.children.keys().map(|child| format_ident!("{child}"));
  let mod_file = quote! {
    #(pub mod #children;)*

    #(#declarations)*
  };
  tree.insert(dir.join("mod.rs"), format_source(header, &mod_file)?);

  for (child, child_node) in &node.children {
    render_node(child_node, dir.join(child.trim_start_matches("r#")), header, tree)?;
  }

  Ok(())
}
