use oas3::Spec;
use serde_json::{Value, json};

use crate::generator::{
  GeneratorConfig,
  ast::{ClientDef, ModelDef},
  client::ClientGenerator,
  model::ModelGenerator,
  orchestrator::{GeneratedOutput, Orchestrator},
  type_factory::TypeFactory,
};

pub(super) const KUBERNETES: &str = include_str!("../../../fixtures/kubernetes.json");

pub(super) const DEPLOYMENT: &str = "io.k8s.api.apps.v1.Deployment";
pub(super) const JSON_SCHEMA_PROPS: &str = "io.k8s.apiextensions-apiserver.pkg.apis.apiextensions.v1.JSONSchemaProps";

pub(super) fn parse_spec(spec_json: &str) -> Spec {
  oas3::from_json(spec_json).expect("failed to parse test spec")
}

pub(super) fn kubernetes() -> Spec {
  parse_spec(KUBERNETES)
}

/// A document with only the given component schemas.
pub(super) fn spec_with_schemas(schemas: Value) -> Spec {
  spec_with(schemas, json!({}))
}

pub(super) fn spec_with(schemas: Value, paths: Value) -> Spec {
  let document = json!({
    "openapi": "3.0.0",
    "info": {"title": "Test", "version": "v0.0.1"},
    "paths": paths,
    "components": {"schemas": schemas},
  });
  parse_spec(&document.to_string())
}

pub(super) fn models(spec: &Spec) -> Vec<ModelDef> {
  let types = TypeFactory::new(spec).expect("aliases resolve");
  ModelGenerator::new(spec, &types).generate().expect("models generate")
}

pub(super) fn model<'a>(models: &'a [ModelDef], schema: &str) -> &'a ModelDef {
  models
    .iter()
    .find(|model| model.ty.schema == schema)
    .unwrap_or_else(|| panic!("no model for {schema}"))
}

pub(super) fn clients(spec: &Spec) -> (Vec<ClientDef>, Vec<String>) {
  let types = TypeFactory::new(spec).expect("aliases resolve");
  let output = ClientGenerator::new(spec, &types).generate().expect("clients generate");
  (output.clients, output.warnings)
}

pub(super) fn client<'a>(clients: &'a [ClientDef], kind: &str) -> &'a ClientDef {
  clients
    .iter()
    .find(|client| client.gvk.kind == kind)
    .unwrap_or_else(|| panic!("no client for {kind}"))
}

pub(super) fn generate(spec: Spec) -> GeneratedOutput {
  Orchestrator::new(spec, GeneratorConfig::default())
    .generate()
    .expect("generation succeeds")
}

pub(super) fn schema_ref(name: &str) -> Value {
  json!({"$ref": format!("#/components/schemas/{name}")})
}
