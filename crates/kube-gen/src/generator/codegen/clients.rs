use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::CodegenPaths;
use crate::generator::{
  ast::{ClientDef, Documentation, MethodDef, ParameterDef, ParameterKind},
  types::{SupportType, TypeRef},
};

/// Renders a `ClientDef` as an async trait. Implementations supply the transport and pick their
/// own error type.
pub(crate) struct TraitGenerator<'a> {
  paths: &'a CodegenPaths,
}

impl<'a> TraitGenerator<'a> {
  pub(crate) fn new(paths: &'a CodegenPaths) -> Self {
    Self { paths }
  }

  pub(crate) fn generate(&self, def: &ClientDef) -> TokenStream {
    let name = format_ident!("{}", def.name);
    let summary = format!(
      "Operations on `{}` resources of `{}`.",
      def.gvk.kind,
      def.gvk.api_version()
    );
    let docs = Documentation::wrapped(Some(&summary), Documentation::TYPE_WIDTH);
    let methods = def.methods.iter().map(|method| self.generate_method(method));

    quote! {
      #docs
      pub trait #name {
        type Error: std::error::Error + Send + Sync + 'static;

        #(#methods)*
      }
    }
  }

  fn generate_method(&self, method: &MethodDef) -> TokenStream {
    let name = format_ident!("{}", method.name);
    let docs = &method.docs;
    let route = format!(" `{} {}` ({})", method.http_method, method.path, method.operation_id);
    let separator = (!docs.is_empty()).then(|| quote! { #[doc = ""] });
    let parameters = method.parameters.iter().map(|parameter| self.generate_parameter(parameter));
    let returns = method
      .returns
      .as_ref()
      .map_or_else(|| quote! { () }, |returns| self.paths.render(returns, None));

    quote! {
      #docs
      #separator
      #[doc = #route]
      fn #name(&self, #(#parameters),*) -> impl std::future::Future<Output = Result<#returns, Self::Error>> + Send;
    }
  }

  fn generate_parameter(&self, parameter: &ParameterDef) -> TokenStream {
    let name = format_ident!("{}", parameter.name);
    let ty = match &parameter.kind {
      ParameterKind::Value(TypeRef::String) => quote! { &str },
      ParameterKind::Value(ty) | ParameterKind::Body(ty) => self.paths.render(ty, None),
      ParameterKind::Options(options) => self.paths.render(&TypeRef::Support(*options), None),
      ParameterKind::PatchType => self.paths.render(&TypeRef::Support(SupportType::PatchType), None),
      ParameterKind::Subresources => quote! { &[String] },
    };
    quote! { #name: #ty }
  }
}
