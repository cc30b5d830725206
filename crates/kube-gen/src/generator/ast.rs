use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use serde::Deserialize;
use strum::{Display, EnumString, IntoStaticStr};

use super::types::{NamedType, SupportType, TypeRef};

/// Doc comment lines, wrapped and ready to emit as `#[doc]` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  /// Wrap width for type-level docs.
  pub(crate) const TYPE_WIDTH: usize = 117;
  /// Wrap width for fields and trait methods, which sit one indentation level deeper.
  pub(crate) const MEMBER_WIDTH: usize = 113;

  #[must_use]
  pub(crate) fn wrapped(text: Option<&str>, width: usize) -> Self {
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
      return Self::default();
    };

    let text = text.replace("\\n", "\n").replace("*/", "*\\/");
    let lines = text
      .lines()
      .flat_map(|line| {
        if line.trim().is_empty() {
          vec![String::new()]
        } else {
          textwrap::wrap(line, width)
            .into_iter()
            .map(|wrapped| format!(" {wrapped}"))
            .collect()
        }
      })
      .collect();

    Self { lines }
  }

  #[must_use]
  pub(crate) fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[cfg(test)]
  pub(crate) fn lines(&self) -> &[String] {
    &self.lines
  }
}

impl ToTokens for Documentation {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    if self.lines.is_empty() {
      return;
    }
    let doc_lines: Vec<TokenStream> = self.lines.iter().map(|line| quote! { #[doc = #line] }).collect();
    quote! { #(#doc_lines)* }.to_tokens(tokens);
  }
}

/// One entry of `x-kubernetes-group-version-kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub(crate) struct GroupVersionKind {
  #[serde(default)]
  pub(crate) group: String,
  pub(crate) version: String,
  pub(crate) kind: String,
}

impl GroupVersionKind {
  /// `apps/v1`, or just `v1` for the core group.
  pub(crate) fn api_version(&self) -> String {
    if self.group.is_empty() {
      self.version.clone()
    } else {
      format!("{}/{}", self.group, self.version)
    }
  }
}

/// How an accessor reads a field: directly, or through its `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldAccess {
  pub(crate) field_name: String,
  pub(crate) optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertyDef {
  pub(crate) docs: Documentation,
  pub(crate) json_name: String,
  pub(crate) field_name: String,
  pub(crate) ty: TypeRef,
  pub(crate) required: bool,
  pub(crate) boxed: bool,
}

impl PropertyDef {
  pub(crate) fn access(&self) -> FieldAccess {
    FieldAccess {
      field_name: self.field_name.clone(),
      optional: !self.required,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeMetaImpl {
  pub(crate) kind: FieldAccess,
  pub(crate) api_version: FieldAccess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HasMetadataImpl {
  pub(crate) meta: NamedType,
  pub(crate) field: FieldAccess,
}

/// A generated model struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModelDef {
  pub(crate) docs: Documentation,
  pub(crate) ty: NamedType,
  pub(crate) properties: Vec<PropertyDef>,
  pub(crate) resource: Option<GroupVersionKind>,
  pub(crate) type_meta: Option<TypeMetaImpl>,
  pub(crate) metadata: Option<HasMetadataImpl>,
}

/// Values of `x-kubernetes-action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum Action {
  Connect,
  Post,
  Delete,
  DeleteCollection,
  Get,
  List,
  Patch,
  Put,
  Watch,
  WatchList,
}

impl Action {
  /// The base name of the client method implementing the action.
  pub(crate) fn method_name(self) -> &'static str {
    match self {
      Self::Connect => "connect",
      Self::Post => "create",
      Self::Delete => "delete",
      Self::DeleteCollection => "deleteCollection",
      Self::Get => "get",
      Self::List => "list",
      Self::Patch => "patch",
      Self::Put => "update",
      Self::Watch => "watch",
      Self::WatchList => "watchList",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParameterKind {
  /// A path or query parameter the option structs do not cover.
  Value(TypeRef),
  Body(TypeRef),
  Options(SupportType),
  PatchType,
  /// Trailing subresource path segments of a patch.
  Subresources,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParameterDef {
  pub(crate) name: String,
  pub(crate) kind: ParameterKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MethodDef {
  pub(crate) docs: Documentation,
  pub(crate) name: String,
  pub(crate) operation_id: String,
  pub(crate) http_method: http::Method,
  pub(crate) path: String,
  pub(crate) parameters: Vec<ParameterDef>,
  pub(crate) returns: Option<TypeRef>,
}

/// A generated client trait covering every operation of one group/version/kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClientDef {
  pub(crate) gvk: GroupVersionKind,
  pub(crate) module: Vec<String>,
  pub(crate) name: String,
  pub(crate) methods: Vec<MethodDef>,
}

impl ClientDef {
  /// `apps::v1::DeploymentClient`
  pub(crate) fn qualified_name(&self) -> String {
    let mut segments = self.module.clone();
    segments.push(self.name.clone());
    segments.join("::")
  }
}
