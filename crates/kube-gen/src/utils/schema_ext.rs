use std::collections::BTreeMap;

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Operation, SchemaType, SchemaTypeSet},
};
use serde_json::Value;

/// Returns true when a description marks the item deprecated. Kubernetes only flags deprecation in
/// prose, so any mention of "deprecate" counts, regardless of case.
pub(crate) fn is_deprecated(description: Option<&str>) -> bool {
  description.is_some_and(|text| text.to_lowercase().contains("deprecate"))
}

/// The last segment of a `$ref` path: `#/components/schemas/io.k8s.api.apps.v1.Deployment` ->
/// `io.k8s.api.apps.v1.Deployment`.
pub(crate) fn ref_name(ref_path: &str) -> &str {
  ref_path.rsplit_once('/').map_or(ref_path, |(_, name)| name)
}

/// Looks up a specification extension. `oas3` strips the `x-` prefix when it collects extensions, so
/// both spellings are accepted.
fn lookup_extension<'a>(extensions: &'a BTreeMap<String, Value>, key: &str) -> Option<&'a Value> {
  let bare = key.strip_prefix("x-").unwrap_or(key);
  extensions
    .get(bare)
    .or_else(|| extensions.get(&format!("x-{bare}")))
}

pub(crate) trait SpecExt {
  /// All component schemas, ordered by name. Empty when the document has no components.
  fn component_schemas(&self) -> Vec<(&str, &ObjectOrReference<ObjectSchema>)>;
}

impl SpecExt for Spec {
  fn component_schemas(&self) -> Vec<(&str, &ObjectOrReference<ObjectSchema>)> {
    self
      .components
      .as_ref()
      .map(|components| {
        components
          .schemas
          .iter()
          .map(|(name, schema)| (name.as_str(), schema))
          .collect()
      })
      .unwrap_or_default()
  }
}

/// Extension methods for `ObjectSchema` covering what the Kubernetes document uses.
pub(crate) trait SchemaExt {
  /// The single declared type, or the non-null member of a `[T, null]` pair.
  fn single_type(&self) -> Option<SchemaType>;

  /// Looks up a specification extension such as `x-kubernetes-group-version-kind`.
  fn extension(&self, key: &str) -> Option<&Value>;

  /// Returns true if `name` is listed in `required`.
  fn is_required(&self, name: &str) -> bool;

  /// Returns the referenced path when the schema is `allOf: [{$ref}]`, the shape the v3 document
  /// uses to attach defaults to a reference.
  fn single_all_of_ref(&self) -> Option<&str>;

  /// Returns true if nothing constrains the value: no type other than `object`, no properties,
  /// no additional properties, no items and no composition.
  fn is_free_form(&self) -> bool;
}

impl SchemaExt for ObjectSchema {
  fn single_type(&self) -> Option<SchemaType> {
    match self.schema_type.as_ref()? {
      SchemaTypeSet::Single(schema_type) => Some(schema_type.clone()),
      SchemaTypeSet::Multiple(types) => {
        let non_null: Vec<_> = types.iter().filter(|t| **t != SchemaType::Null).collect();
        match non_null.as_slice() {
          [single] => Some((*single).clone()),
          _ => None,
        }
      }
    }
  }

  fn extension(&self, key: &str) -> Option<&Value> {
    lookup_extension(&self.extensions, key)
  }

  fn is_required(&self, name: &str) -> bool {
    self.required.iter().any(|required| required == name)
  }

  fn single_all_of_ref(&self) -> Option<&str> {
    match self.all_of.as_slice() {
      [ObjectOrReference::Ref { ref_path, .. }] => Some(ref_path.as_str()),
      _ => None,
    }
  }

  fn is_free_form(&self) -> bool {
    matches!(self.single_type(), None | Some(SchemaType::Object))
      && self.properties.is_empty()
      && self.additional_properties.is_none()
      && self.items.is_none()
      && self.all_of.is_empty()
      && self.any_of.is_empty()
      && self.one_of.is_empty()
  }
}

pub(crate) trait OperationExt {
  fn extension(&self, key: &str) -> Option<&Value>;

  /// Returns true if the operation is flagged deprecated or says so in its description.
  fn is_deprecated(&self) -> bool;
}

impl OperationExt for Operation {
  fn extension(&self, key: &str) -> Option<&Value> {
    lookup_extension(&self.extensions, key)
  }

  fn is_deprecated(&self) -> bool {
    self.deprecated.unwrap_or(false) || is_deprecated(self.description.as_deref())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn schema(value: Value) -> ObjectSchema {
    serde_json::from_value(value).expect("valid schema")
  }

  #[test]
  fn deprecation_is_case_insensitive() {
    assert!(is_deprecated(Some("Deprecated: use spec.foo instead")));
    assert!(is_deprecated(Some("This field is DEPRECATED")));
    assert!(is_deprecated(Some("will be deprecated in 1.30")));
    assert!(!is_deprecated(Some("Standard object metadata")));
    assert!(!is_deprecated(None));
  }

  #[test]
  fn ref_name_takes_last_segment() {
    assert_eq!(
      ref_name("#/components/schemas/io.k8s.api.apps.v1.Deployment"),
      "io.k8s.api.apps.v1.Deployment"
    );
    assert_eq!(ref_name("Plain"), "Plain");
  }

  #[test]
  fn extensions_resolve_with_or_without_prefix() {
    let schema = schema(json!({
      "type": "object",
      "x-kubernetes-group-version-kind": [{"group": "apps", "kind": "Deployment", "version": "v1"}]
    }));
    assert!(schema.extension("x-kubernetes-group-version-kind").is_some());
    assert!(schema.extension("kubernetes-group-version-kind").is_some());
    assert!(schema.extension("x-kubernetes-action").is_none());
  }

  #[test]
  fn single_type_unwraps_nullable_pairs() {
    assert_eq!(schema(json!({"type": "string"})).single_type(), Some(SchemaType::String));
    assert_eq!(
      schema(json!({"type": ["integer", "null"]})).single_type(),
      Some(SchemaType::Integer)
    );
    assert_eq!(schema(json!({})).single_type(), None);
  }

  #[test]
  fn required_and_all_of_ref() {
    let schema = schema(json!({
      "required": ["name"],
      "allOf": [{"$ref": "#/components/schemas/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"}]
    }));
    assert!(schema.is_required("name"));
    assert!(!schema.is_required("namespace"));
    assert_eq!(
      schema.single_all_of_ref(),
      Some("#/components/schemas/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta")
    );
  }

  #[test]
  fn free_form_detection() {
    assert!(schema(json!({"type": "object", "description": "raw"})).is_free_form());
    assert!(schema(json!({"description": "anything"})).is_free_form());
    assert!(!schema(json!({"type": "string"})).is_free_form());
    assert!(!schema(json!({"type": "object", "properties": {"a": {"type": "string"}}})).is_free_form());
    assert!(!schema(json!({"type": "object", "additionalProperties": {"type": "string"}})).is_free_form());
  }

  #[test]
  fn operation_deprecation() {
    let operation: Operation = serde_json::from_value(json!({
      "description": "watch changes. deprecated: use the 'watch' parameter with a list operation instead.",
      "responses": {}
    }))
    .unwrap();
    assert!(operation.is_deprecated());

    let operation: Operation = serde_json::from_value(json!({"description": "read the specified Pod", "responses": {}})).unwrap();
    assert!(!operation.is_deprecated());

    let operation: Operation =
      serde_json::from_value(json!({"description": "create rollback", "deprecated": true, "responses": {}})).unwrap();
    assert!(operation.is_deprecated());
  }
}
