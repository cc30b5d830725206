use std::collections::BTreeSet;

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema},
};

use super::{
  ast::{Documentation, GroupVersionKind, HasMetadataImpl, ModelDef, PropertyDef, TypeMetaImpl},
  errors::GeneratorResult,
  type_factory::{TypeFactory, named_type},
  types::TypeRef,
};
use crate::{
  naming::identifiers::{ensure_unique, to_rust_field_name},
  utils::{SchemaExt, SpecExt, is_deprecated},
};

/// Object metadata types. A model whose `metadata` property has one of these types implements
/// `HasMetadata`.
const METAS: &[&str] = &[
  "io.k8s.apimachinery.pkg.apis.meta.v1.ListMeta",
  "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta",
];

pub(crate) const GROUP_VERSION_KIND: &str = "x-kubernetes-group-version-kind";

/// Builds a `ModelDef` for every component schema that is not an alias.
pub(crate) struct ModelGenerator<'a> {
  spec: &'a Spec,
  types: &'a TypeFactory,
}

impl<'a> ModelGenerator<'a> {
  pub(crate) fn new(spec: &'a Spec, types: &'a TypeFactory) -> Self {
    Self { spec, types }
  }

  pub(crate) fn generate(&self) -> GeneratorResult<Vec<ModelDef>> {
    let mut models = vec![];
    for (name, schema) in self.spec.component_schemas() {
      if self.types.alias(name).is_some() {
        continue;
      }
      if let ObjectOrReference::Object(schema) = schema {
        models.push(self.model(name, schema)?);
      }
    }
    Ok(models)
  }

  pub(crate) fn model(&self, name: &str, schema: &ObjectSchema) -> GeneratorResult<ModelDef> {
    let ty = named_type(name)?;
    let properties = self.properties(schema)?;

    let type_meta = type_meta(&properties);
    let metadata = properties
      .iter()
      .find(|property| property.json_name == "metadata")
      .and_then(|property| match &property.ty {
        TypeRef::Named(meta) if METAS.contains(&meta.schema.as_str()) => Some(HasMetadataImpl {
          meta: meta.clone(),
          field: property.access(),
        }),
        _ => None,
      });

    Ok(ModelDef {
      docs: Documentation::wrapped(schema.description.as_deref(), Documentation::TYPE_WIDTH),
      ty,
      properties,
      resource: group_version_kind(schema),
      type_meta,
      metadata,
    })
  }

  fn properties(&self, schema: &ObjectSchema) -> GeneratorResult<Vec<PropertyDef>> {
    let mut used = BTreeSet::new();
    let mut properties = vec![];

    for (json_name, property) in &schema.properties {
      let description = match property {
        ObjectOrReference::Object(property) => property.description.as_deref(),
        ObjectOrReference::Ref { .. } => None,
      };
      if is_deprecated(description) {
        continue;
      }

      let field_name = ensure_unique(&to_rust_field_name(json_name), &used);
      used.insert(field_name.clone());

      properties.push(PropertyDef {
        docs: Documentation::wrapped(description, Documentation::MEMBER_WIDTH),
        json_name: json_name.clone(),
        field_name,
        ty: self.types.create(property)?,
        required: schema.is_required(json_name),
        boxed: false,
      });
    }

    Ok(properties)
  }
}

/// The first entry of `x-kubernetes-group-version-kind`, if the schema has one.
pub(crate) fn group_version_kind(schema: &ObjectSchema) -> Option<GroupVersionKind> {
  let value = schema.extension(GROUP_VERSION_KIND)?;
  serde_json::from_value::<Vec<GroupVersionKind>>(value.clone())
    .ok()?
    .into_iter()
    .next()
}

fn type_meta(properties: &[PropertyDef]) -> Option<TypeMetaImpl> {
  let string_property = |json_name: &str| {
    properties
      .iter()
      .find(|property| property.json_name == json_name && property.ty == TypeRef::String)
      .map(PropertyDef::access)
  };

  Some(TypeMetaImpl {
    kind: string_property("kind")?,
    api_version: string_property("apiVersion")?,
  })
}
