use serde_json::json;

use super::support::{kubernetes, schema_ref, spec_with_schemas};
use crate::generator::{
  errors::GeneratorError,
  type_factory::{TypeFactory, named_type},
  types::{SupportType, TypeRef},
};

#[test]
fn test_named_type_parsing() {
  let cases = [
    ("io.k8s.api.apps.v1.Deployment", vec!["apps", "v1"], "Deployment"),
    ("io.k8s.api.core.v1.ConfigMap", vec!["core", "v1"], "ConfigMap"),
    ("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta", vec!["meta", "v1"], "ObjectMeta"),
    ("io.k8s.apimachinery.pkg.api.resource.Quantity", vec!["resource"], "Quantity"),
    ("io.k8s.apimachinery.pkg.util.intstr.IntOrString", vec!["util", "intstr"], "IntOrString"),
    (
      "io.k8s.apiextensions-apiserver.pkg.apis.apiextensions.v1.JSONSchemaProps",
      vec!["apiextensions", "v1"],
      "JSONSchemaProps",
    ),
    (
      "io.k8s.kube-aggregator.pkg.apis.apiregistration.v1.APIService",
      vec!["apiregistration", "v1"],
      "APIService",
    ),
  ];
  for (raw, package, name) in cases {
    let named = named_type(raw).unwrap();
    assert_eq!(named.package, package, "package of {raw}");
    assert_eq!(named.name, name, "name of {raw}");
    assert_eq!(named.schema, raw);
  }
}

#[test]
fn test_unrecognized_name() {
  let err = named_type("com.example.Widget").unwrap_err();
  assert!(matches!(err, GeneratorError::UnrecognizedName(ref name) if name == "com.example.Widget"));
  assert_eq!(err.to_string(), "'com.example.Widget' is not a recognized Kubernetes name");
}

#[test]
fn test_kubernetes_aliases() {
  let spec = kubernetes();
  let types = TypeFactory::new(&spec).unwrap();

  assert_eq!(types.alias_count(), 5);
  assert_eq!(
    types.alias("io.k8s.apimachinery.pkg.api.resource.Quantity"),
    Some(&TypeRef::String)
  );
  assert_eq!(
    types.alias("io.k8s.apimachinery.pkg.apis.meta.v1.Time"),
    Some(&TypeRef::DateTime)
  );
  assert_eq!(
    types.alias("io.k8s.apimachinery.pkg.util.intstr.IntOrString"),
    Some(&TypeRef::Support(SupportType::IntOrString))
  );
  assert_eq!(
    types.alias("io.k8s.apimachinery.pkg.apis.meta.v1.Patch"),
    Some(&TypeRef::Value)
  );
  assert_eq!(
    types.alias("io.k8s.apimachinery.pkg.apis.meta.v1.FieldsV1"),
    Some(&TypeRef::Value)
  );
  assert!(types.alias("io.k8s.api.apps.v1.Deployment").is_none());
  assert!(types.alias("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta").is_none());
}

#[test]
fn test_component_type_prefers_alias() {
  let spec = kubernetes();
  let types = TypeFactory::new(&spec).unwrap();

  assert_eq!(
    types.component_type("io.k8s.apimachinery.pkg.apis.meta.v1.Time").unwrap(),
    TypeRef::DateTime
  );
  let deployment = types.component_type("io.k8s.api.apps.v1.Deployment").unwrap();
  assert_eq!(deployment.as_named().map(|named| named.name.as_str()), Some("Deployment"));
}

#[test]
fn test_alias_resolution_is_order_independent() {
  // `a` sorts before its target `b`, which is itself an alias of a collection.
  let spec = spec_with_schemas(json!({
    "io.k8s.api.test.v1.A": schema_ref("io.k8s.api.test.v1.B"),
    "io.k8s.api.test.v1.B": {"type": "array", "items": schema_ref("io.k8s.api.test.v1.C")},
    "io.k8s.api.test.v1.C": {"type": "string", "format": "date-time"},
  }));
  let types = TypeFactory::new(&spec).unwrap();

  let expected = TypeRef::list(TypeRef::DateTime);
  assert_eq!(types.alias("io.k8s.api.test.v1.A"), Some(&expected));
  assert_eq!(types.alias("io.k8s.api.test.v1.B"), Some(&expected));
  assert_eq!(types.alias("io.k8s.api.test.v1.C"), Some(&TypeRef::DateTime));
}

#[test]
fn test_alias_to_struct_keeps_named_type() {
  let spec = spec_with_schemas(json!({
    "io.k8s.api.test.v1.Items": {"type": "array", "items": schema_ref("io.k8s.api.test.v1.Item")},
    "io.k8s.api.test.v1.Item": {"type": "object", "properties": {"name": {"type": "string"}}},
  }));
  let types = TypeFactory::new(&spec).unwrap();

  let Some(TypeRef::List(items)) = types.alias("io.k8s.api.test.v1.Items") else {
    panic!("expected a list alias");
  };
  assert_eq!(items.as_named().map(|named| named.name.as_str()), Some("Item"));
  assert!(types.alias("io.k8s.api.test.v1.Item").is_none());
}

#[test]
fn test_alias_cycle_is_an_error() {
  let spec = spec_with_schemas(json!({
    "io.k8s.api.test.v1.A": schema_ref("io.k8s.api.test.v1.B"),
    "io.k8s.api.test.v1.B": schema_ref("io.k8s.api.test.v1.A"),
  }));
  let err = TypeFactory::new(&spec).unwrap_err();
  assert!(matches!(err, GeneratorError::AliasCycle(_)));
}

#[test]
fn test_property_type_table() {
  let spec = spec_with_schemas(json!({}));
  let types = TypeFactory::new(&spec).unwrap();
  let create = |value: serde_json::Value| types.create_inline(&serde_json::from_value(value).unwrap());

  let cases = [
    (json!({"type": "boolean"}), TypeRef::Bool),
    (json!({"type": "integer"}), TypeRef::I32),
    (json!({"type": "integer", "format": "int32"}), TypeRef::I32),
    (json!({"type": "integer", "format": "int64"}), TypeRef::I64),
    (json!({"type": "number", "format": "double"}), TypeRef::F64),
    (json!({"type": "string"}), TypeRef::String),
    (json!({"type": "string", "format": "byte"}), TypeRef::String),
    (json!({"type": "string", "format": "date-time"}), TypeRef::DateTime),
    (
      json!({"type": "string", "format": "int-or-string"}),
      TypeRef::Support(SupportType::IntOrString),
    ),
    (json!({"type": "object"}), TypeRef::Value),
    (
      json!({"type": "object", "additionalProperties": {"type": "string"}}),
      TypeRef::map(TypeRef::String),
    ),
    (
      json!({"type": "array", "items": {"type": "integer", "format": "int64"}}),
      TypeRef::list(TypeRef::I64),
    ),
    (
      json!({"type": "array", "items": {"type": "array", "items": {"type": "string"}}}),
      TypeRef::list(TypeRef::list(TypeRef::String)),
    ),
  ];
  for (schema, expected) in cases {
    assert_eq!(create(schema.clone()).unwrap(), expected, "failed for {schema}");
  }
}

#[test]
fn test_unrecognized_property_types() {
  let spec = spec_with_schemas(json!({}));
  let types = TypeFactory::new(&spec).unwrap();
  let create = |value: serde_json::Value| types.create_inline(&serde_json::from_value(value).unwrap());

  let err = create(json!({"type": "number"})).unwrap_err();
  assert_eq!(err.to_string(), "'number,null' is not a recognized property type");

  let err = create(json!({"type": "string", "format": "uuid"})).unwrap_err();
  assert_eq!(err.to_string(), "'string,uuid' is not a recognized property type");

  let err = create(json!({"type": "integer", "format": "int16"})).unwrap_err();
  assert_eq!(err.to_string(), "'integer,int16' is not a recognized property type");

  let err = create(json!({"type": "object", "properties": {"a": {"type": "string"}}})).unwrap_err();
  assert_eq!(err.to_string(), "'object,null' is not a recognized property type");
}
