use std::fmt;

use strum::{Display, IntoStaticStr};

use crate::naming::identifiers::{to_module_name, to_rust_type_name};

/// Types provided by the support crate rather than generated from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IntoStaticStr)]
pub enum SupportType {
  IntOrString,
  CreateOptions,
  GetOptions,
  ListOptions,
  PatchOptions,
  UpdateOptions,
  PatchType,
}

/// A generated model type: `io.k8s.api.apps.v1.Deployment` becomes package `["apps", "v1"]`, name
/// `Deployment`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedType {
  pub(crate) package: Vec<String>,
  pub(crate) name: String,
  pub(crate) schema: String,
}

impl NamedType {
  pub(crate) fn new(package: &str, name: &str, schema: &str) -> Self {
    Self {
      package: package.split('.').map(str::to_string).collect(),
      name: name.to_string(),
      schema: schema.to_string(),
    }
  }

  /// Module segments of the package, keyword-safe.
  pub(crate) fn module_path(&self) -> Vec<String> {
    self.package.iter().map(|segment| to_module_name(segment)).collect()
  }

  pub(crate) fn type_name(&self) -> String {
    to_rust_type_name(&self.name)
  }

  /// `apps.v1.Deployment`
  #[cfg(test)]
  pub(crate) fn qualified_name(&self) -> String {
    format!("{}.{}", self.package.join("."), self.name)
  }
}

/// The Rust shape a schema maps to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
  Bool,
  I32,
  I64,
  F64,
  String,
  DateTime,
  Value,
  Support(SupportType),
  Named(NamedType),
  List(Box<TypeRef>),
  Map(Box<TypeRef>),
}

impl TypeRef {
  pub(crate) fn list(items: TypeRef) -> Self {
    Self::List(Box::new(items))
  }

  pub(crate) fn map(values: TypeRef) -> Self {
    Self::Map(Box::new(values))
  }

  #[cfg(test)]
  pub(crate) fn as_named(&self) -> Option<&NamedType> {
    match self {
      Self::Named(named) => Some(named),
      _ => None,
    }
  }

  /// Every named type this reference mentions, along with whether it sits behind a collection.
  /// Collections already allocate, so only direct references need boxing when they form a cycle.
  pub(crate) fn named_references(&self) -> Vec<(&NamedType, bool)> {
    let mut refs = vec![];
    self.collect_named(false, &mut refs);
    refs
  }

  fn collect_named<'a>(&'a self, in_collection: bool, refs: &mut Vec<(&'a NamedType, bool)>) {
    match self {
      Self::Named(named) => refs.push((named, in_collection)),
      Self::List(inner) | Self::Map(inner) => inner.collect_named(true, refs),
      _ => {}
    }
  }
}

impl fmt::Display for TypeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Bool => f.write_str("bool"),
      Self::I32 => f.write_str("i32"),
      Self::I64 => f.write_str("i64"),
      Self::F64 => f.write_str("f64"),
      Self::String => f.write_str("String"),
      Self::DateTime => f.write_str("DateTime<Utc>"),
      Self::Value => f.write_str("serde_json::Value"),
      Self::Support(support) => write!(f, "{support}"),
      Self::Named(named) => write!(f, "{}::{}", named.module_path().join("::"), named.type_name()),
      Self::List(items) => write!(f, "Vec<{items}>"),
      Self::Map(values) => write!(f, "BTreeMap<String, {values}>"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn named_type_paths() {
    let named = NamedType::new("apps.v1", "Deployment", "io.k8s.api.apps.v1.Deployment");
    assert_eq!(named.module_path(), vec!["apps", "v1"]);
    assert_eq!(named.type_name(), "Deployment");
    assert_eq!(named.qualified_name(), "apps.v1.Deployment");

    let acronym = NamedType::new("apiregistration.v1", "APIService", "x");
    assert_eq!(acronym.type_name(), "APIService");
  }

  #[test]
  fn display_renders_rust_shapes() {
    let named = TypeRef::Named(NamedType::new("core.v1", "Container", "x"));
    assert_eq!(TypeRef::list(named.clone()).to_string(), "Vec<core::v1::Container>");
    assert_eq!(TypeRef::map(TypeRef::String).to_string(), "BTreeMap<String, String>");
    assert_eq!(TypeRef::Support(SupportType::IntOrString).to_string(), "IntOrString");
  }

  #[test]
  fn named_references_track_collections() {
    let pod = NamedType::new("core.v1", "Pod", "x");
    let direct = TypeRef::Named(pod.clone());
    assert_eq!(direct.named_references(), vec![(&pod, false)]);

    let nested = TypeRef::map(TypeRef::list(TypeRef::Named(pod.clone())));
    assert_eq!(nested.named_references(), vec![(&pod, true)]);
    assert!(TypeRef::I64.named_references().is_empty());
  }
}
