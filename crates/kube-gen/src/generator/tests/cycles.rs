use serde_json::json;

use super::support::{JSON_SCHEMA_PROPS, kubernetes, model, models, schema_ref, spec_with_schemas};
use crate::generator::cycles::{box_cyclic_references, detect_cycles};

#[test]
fn test_self_reference_is_boxed() {
  let mut models = models(&kubernetes());
  let cycles = box_cyclic_references(&mut models);

  assert_eq!(cycles, vec![vec![JSON_SCHEMA_PROPS.to_string()]]);

  let props = model(&models, JSON_SCHEMA_PROPS);
  let boxed: Vec<&str> = props
    .properties
    .iter()
    .filter(|property| property.boxed)
    .map(|property| property.json_name.as_str())
    .collect();
  // `allOf` and `properties` reach the type through a collection.
  assert_eq!(boxed, vec!["not"]);
}

#[test]
fn test_mutual_reference_boxes_both_sides() {
  let spec = spec_with_schemas(json!({
    "io.k8s.api.test.v1.Parent": {
      "type": "object",
      "properties": {"child": schema_ref("io.k8s.api.test.v1.Child"), "name": {"type": "string"}},
    },
    "io.k8s.api.test.v1.Child": {
      "type": "object",
      "properties": {"parent": schema_ref("io.k8s.api.test.v1.Parent")},
    },
  }));
  let mut models = models(&spec);
  let cycles = box_cyclic_references(&mut models);

  assert_eq!(
    cycles,
    vec![vec![
      "io.k8s.api.test.v1.Child".to_string(),
      "io.k8s.api.test.v1.Parent".to_string()
    ]]
  );
  let parent = model(&models, "io.k8s.api.test.v1.Parent");
  assert!(parent.properties[0].boxed);
  assert!(!parent.properties[1].boxed);
  assert!(model(&models, "io.k8s.api.test.v1.Child").properties[0].boxed);
}

#[test]
fn test_collection_cycles_are_not_cycles() {
  let spec = spec_with_schemas(json!({
    "io.k8s.api.test.v1.Node": {
      "type": "object",
      "properties": {
        "children": {"type": "array", "items": schema_ref("io.k8s.api.test.v1.Node")},
        "labels": {"type": "object", "additionalProperties": schema_ref("io.k8s.api.test.v1.Node")},
      },
    },
  }));
  let models = models(&spec);
  assert!(detect_cycles(&models).is_empty());
}

#[test]
fn test_references_outside_the_cycle_stay_unboxed() {
  let spec = spec_with_schemas(json!({
    "io.k8s.api.test.v1.Holder": {
      "type": "object",
      "properties": {"node": schema_ref("io.k8s.api.test.v1.Node")},
    },
    "io.k8s.api.test.v1.Node": {
      "type": "object",
      "properties": {"next": schema_ref("io.k8s.api.test.v1.Node")},
    },
  }));
  let mut models = models(&spec);
  box_cyclic_references(&mut models);

  assert!(!model(&models, "io.k8s.api.test.v1.Holder").properties[0].boxed);
  assert!(model(&models, "io.k8s.api.test.v1.Node").properties[0].boxed);
}
