use anyhow::Context;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{
  GeneratorConfig,
  types::{NamedType, TypeRef},
};

pub(crate) mod clients;
pub(crate) mod models;
pub(crate) mod modules;

/// Paths generated code uses to reach the model tree and the support crate.
#[derive(Debug, Clone)]
pub(crate) struct CodegenPaths {
  model_root: syn::Path,
  support: syn::Path,
}

impl CodegenPaths {
  pub(crate) fn new(config: &GeneratorConfig) -> anyhow::Result<Self> {
    Ok(Self {
      model_root: parse_path(&config.model_module, "--model-module")?,
      support: parse_path(&config.support_crate, "--support-crate")?,
    })
  }

  pub(crate) fn support(&self) -> &syn::Path {
    &self.support
  }

  /// `crate::model::apps::v1::Deployment`
  pub(crate) fn model_path(&self, named: &NamedType) -> TokenStream {
    let root = &self.model_root;
    let segments = named.module_path().into_iter().map(|segment| format_ident!("{segment}"));
    let ident = format_ident!("{}", named.type_name());
    quote! { #root #(:: #segments)* :: #ident }
  }

  /// Renders a type as seen from a type file in `package`. Each type file is a child of its package
  /// module, which re-exports every type in the package, so siblings resolve through `super`.
  pub(crate) fn render(&self, ty: &TypeRef, package: Option<&[String]>) -> TokenStream {
    let support = &self.support;
    match ty {
      TypeRef::Bool => quote! { bool },
      TypeRef::I32 => quote! { i32 },
      TypeRef::I64 => quote! { i64 },
      TypeRef::F64 => quote! { f64 },
      TypeRef::String => quote! { String },
      TypeRef::DateTime => quote! { #support::chrono::DateTime<#support::chrono::Utc> },
      TypeRef::Value => quote! { #support::serde_json::Value },
      TypeRef::Support(support_type) => {
        let ident = format_ident!("{}", <&'static str>::from(*support_type));
        quote! { #support::#ident }
      }
      TypeRef::Named(named) if package == Some(named.package.as_slice()) => {
        let ident = format_ident!("{}", named.type_name());
        quote! { super::#ident }
      }
      TypeRef::Named(named) => self.model_path(named),
      TypeRef::List(items) => {
        let items = self.render(items, package);
        quote! { Vec<#items> }
      }
      TypeRef::Map(values) => {
        let values = self.render(values, package);
        quote! { std::collections::BTreeMap<String, #values> }
      }
    }
  }
}

fn parse_path(path: &str, flag: &str) -> anyhow::Result<syn::Path> {
  syn::parse_str(path).with_context(|| format!("{flag} '{path}' is not a valid Rust path"))
}

/// The comment block opening every generated file.
pub(crate) fn file_header(title: &str, version: &str) -> String {
  format!(
    r"//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! {title} {version}
//! Generated by `kube-gen`
"
  )
}

/// Formats a token stream as a source file below `header`.
pub(crate) fn format_source(header: &str, code: &TokenStream) -> anyhow::Result<String> {
  let syntax_tree: syn::File = syn::parse2(code.clone()).context("generated code is not valid Rust")?;
  let formatted = prettyplease::unparse(&syntax_tree);
  Ok(format!("{header}\n{formatted}"))
}
