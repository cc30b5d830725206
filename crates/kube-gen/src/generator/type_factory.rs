use std::{collections::BTreeMap, sync::LazyLock};

use oas3::{
  Spec,
  spec::{BooleanSchema, ObjectOrReference, ObjectSchema, Schema, SchemaType},
};
use regex::Regex;

use super::{
  errors::{GeneratorError, GeneratorResult},
  types::{NamedType, SupportType, TypeRef},
};
use crate::utils::{SchemaExt, SpecExt, ref_name};

static KUBERNETES_NAME: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(io\.k8s)\..*(?:api[s]?|pkg)\.([a-zA-Z0-9.]+)\.([a-zA-Z0-9]+)").unwrap());

/// Object schemas that carry no usable structure and are passed through as raw JSON.
const OPAQUE_OBJECTS: &[&str] = &["io.k8s.apimachinery.pkg.apis.meta.v1.Patch"];

/// Maps schemas onto Rust types.
///
/// Component schemas that map onto a primitive or collection (`Quantity`, `Time`, `IntOrString`)
/// are registered as aliases up front, so a `$ref` to them resolves to the underlying type
/// instead of a generated struct.
#[derive(Debug, Default)]
pub(crate) struct TypeFactory {
  aliases: BTreeMap<String, TypeRef>,
}

impl TypeFactory {
  pub(crate) fn new(spec: &Spec) -> GeneratorResult<Self> {
    let mut candidates = BTreeMap::new();
    for (name, schema) in spec.component_schemas() {
      if is_alias(name, schema)? {
        candidates.insert(name, schema);
      }
    }

    let mut registry = AliasRegistry {
      candidates: &candidates,
      resolved: BTreeMap::new(),
      visiting: vec![],
    };
    for name in candidates.keys() {
      registry.resolve(name)?;
    }

    Ok(Self {
      aliases: registry.resolved,
    })
  }

  pub(crate) fn alias_count(&self) -> usize {
    self.aliases.len()
  }

  pub(crate) fn alias(&self, schema_name: &str) -> Option<&TypeRef> {
    self.aliases.get(schema_name)
  }

  /// The type a component schema declares: its alias target, or the generated struct.
  pub(crate) fn component_type(&self, schema_name: &str) -> GeneratorResult<TypeRef> {
    match self.aliases.get(schema_name) {
      Some(alias) => Ok(alias.clone()),
      None => named_type(schema_name).map(TypeRef::Named),
    }
  }

  /// The type of a property, parameter or media-type schema.
  pub(crate) fn create(&self, schema: &ObjectOrReference<ObjectSchema>) -> GeneratorResult<TypeRef> {
    map_reference(schema, &mut |name: &str| self.component_type(name))
  }

  /// Like [`Self::create`] for an inline `ObjectSchema`.
  #[cfg(test)]
  pub(crate) fn create_inline(&self, schema: &ObjectSchema) -> GeneratorResult<TypeRef> {
    map_schema(schema, &mut |name: &str| self.component_type(name))?
      .ok_or_else(|| GeneratorError::unrecognized_type(type_label(schema).as_deref(), schema.format.as_deref()))
  }
}

/// Parses a Kubernetes schema name into its package and type name.
pub(crate) fn named_type(raw: &str) -> GeneratorResult<NamedType> {
  let captures = KUBERNETES_NAME
    .captures(raw)
    .ok_or_else(|| GeneratorError::UnrecognizedName(raw.to_string()))?;
  Ok(NamedType::new(&captures[2], &captures[3], raw))
}

fn is_alias(name: &str, schema: &ObjectOrReference<ObjectSchema>) -> GeneratorResult<bool> {
  if OPAQUE_OBJECTS.contains(&name) {
    return Ok(true);
  }
  match schema {
    ObjectOrReference::Ref { .. } => Ok(true),
    ObjectOrReference::Object(schema) => Ok(map_schema(schema, &mut |_: &str| Ok(TypeRef::Value))?.is_some()),
  }
}

struct AliasRegistry<'a> {
  candidates: &'a BTreeMap<&'a str, &'a ObjectOrReference<ObjectSchema>>,
  resolved: BTreeMap<String, TypeRef>,
  visiting: Vec<String>,
}

impl AliasRegistry<'_> {
  fn resolve(&mut self, name: &str) -> GeneratorResult<TypeRef> {
    if let Some(resolved) = self.resolved.get(name) {
      return Ok(resolved.clone());
    }
    let candidates = self.candidates;
    let Some(schema) = candidates.get(name) else {
      return named_type(name).map(TypeRef::Named);
    };
    if self.visiting.iter().any(|visiting| visiting == name) {
      return Err(GeneratorError::AliasCycle(name.to_string()));
    }

    self.visiting.push(name.to_string());
    let resolved = if OPAQUE_OBJECTS.contains(&name) {
      TypeRef::Value
    } else {
      match schema {
        ObjectOrReference::Ref { ref_path, .. } => self.resolve(ref_name(ref_path))?,
        ObjectOrReference::Object(schema) => {
          map_schema(schema, &mut |target: &str| self.resolve(target))?.unwrap_or(TypeRef::Value)
        }
      }
    };
    self.visiting.pop();

    self.resolved.insert(name.to_string(), resolved.clone());
    Ok(resolved)
  }
}

type RefResolver<'r> = dyn FnMut(&str) -> GeneratorResult<TypeRef> + 'r;

fn map_reference(schema: &ObjectOrReference<ObjectSchema>, refs: &mut RefResolver<'_>) -> GeneratorResult<TypeRef> {
  match schema {
    ObjectOrReference::Ref { ref_path, .. } => refs(ref_name(ref_path)),
    ObjectOrReference::Object(schema) => map_schema(schema, refs)?
      .ok_or_else(|| GeneratorError::unrecognized_type(type_label(schema).as_deref(), schema.format.as_deref())),
  }
}

/// Maps a schema onto a type, or `None` for a structured object that needs a generated struct.
fn map_schema(schema: &ObjectSchema, refs: &mut RefResolver<'_>) -> GeneratorResult<Option<TypeRef>> {
  if let Some(ref_path) = schema.single_all_of_ref() {
    return refs(ref_name(ref_path)).map(Some);
  }

  let format = schema.format.as_deref();
  let unrecognized = || GeneratorError::unrecognized_type(type_label(schema).as_deref(), format);

  let mapped = match schema.single_type() {
    Some(SchemaType::Array) => {
      let items = match schema.items.as_deref() {
        Some(Schema::Object(items)) => map_reference(items, refs)?,
        Some(Schema::Boolean(_)) | None => TypeRef::Value,
      };
      Some(TypeRef::list(items))
    }
    Some(SchemaType::Boolean) => Some(TypeRef::Bool),
    Some(SchemaType::String) => match format {
      None | Some("byte") => Some(TypeRef::String),
      Some("date-time") => Some(TypeRef::DateTime),
      Some("int-or-string") => Some(TypeRef::Support(SupportType::IntOrString)),
      Some(_) => return Err(unrecognized()),
    },
    Some(SchemaType::Integer) => match format {
      None | Some("int32") => Some(TypeRef::I32),
      Some("int64") => Some(TypeRef::I64),
      Some(_) => return Err(unrecognized()),
    },
    Some(SchemaType::Number) => match format {
      Some("double") => Some(TypeRef::F64),
      _ => return Err(unrecognized()),
    },
    Some(SchemaType::Object) | None => match schema.additional_properties.as_ref() {
      Some(Schema::Object(values)) => Some(TypeRef::map(map_reference(values, refs)?)),
      Some(Schema::Boolean(BooleanSchema(true))) => Some(TypeRef::map(TypeRef::Value)),
      _ if schema.is_free_form() => Some(TypeRef::Value),
      _ => None,
    },
    Some(SchemaType::Null) => None,
  };

  Ok(mapped)
}

fn type_label(schema: &ObjectSchema) -> Option<String> {
  let schema_type = schema.single_type()?;
  serde_json::to_value(schema_type)
    .ok()
    .and_then(|value| value.as_str().map(str::to_string))
}
