use std::{
  collections::{BTreeMap, BTreeSet},
  str::FromStr,
  sync::LazyLock,
};

use itertools::Itertools;
use oas3::{
  Spec,
  spec::{ObjectOrReference, Operation, Parameter},
};
use regex::Regex;

use super::{
  ast::{Action, ClientDef, Documentation, GroupVersionKind, MethodDef, ParameterDef, ParameterKind},
  errors::{GeneratorError, GeneratorResult},
  model::GROUP_VERSION_KIND,
  type_factory::TypeFactory,
  types::{SupportType, TypeRef},
};
use crate::{
  naming::identifiers::{ensure_unique, to_method_name, to_module_name, to_rust_field_name, to_rust_type_name},
  utils::{OperationExt, is_deprecated},
};

const ACTION: &str = "x-kubernetes-action";

const MEDIA_TYPE_ALL: &str = "*/*";
const MEDIA_TYPE_APPLICATION_JSON: &str = "application/json";
const MEDIA_TYPE_APPLICATION_JSON_PATCH_JSON: &str = "application/json-patch+json";

static URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^/api(?:s/[^/]+)?/[^/]+(?:/watch)?(?:/namespaces/[^/]+)?/[^/]+(?:/[^/]+(?:/(?P<subresource>[^/]+(?:/[^/]+)?))?)?$",
  )
  .unwrap()
});

const CREATE_OPTIONS_PARAMETERS: &[&str] = &["kind", "apiVersion", "dryRun", "fieldManager"];

const DELETE_OPTIONS_PARAMETERS: &[&str] = &[
  "apiVersion",
  "dryRun",
  "gracePeriodSeconds",
  "kind",
  "orphanDependents",
  "preconditions",
  "propagationPolicy",
];

const GET_OPTIONS_PARAMETERS: &[&str] = &["kind", "apiVersion", "resourceVersion"];

const LIST_OPTIONS_PARAMETERS: &[&str] = &[
  "kind",
  "apiVersion",
  "labelSelector",
  "fieldSelector",
  "watch",
  "allowWatchBookmarks",
  "resourceVersion",
  "resourceVersionMatch",
  "timeoutSeconds",
  "limit",
  "continue",
];

const PATCH_OPTIONS_PARAMETERS: &[&str] = &["kind", "apiVersion", "dryRun", "force", "fieldManager"];

const UPDATE_OPTIONS_PARAMETERS: &[&str] = &["kind", "apiVersion", "dryRun", "fieldManager"];

impl Action {
  /// Query parameters the action's option struct (or the delete body) already carries.
  fn absorbed_parameters(self) -> Vec<&'static str> {
    let lists: &[&[&str]] = match self {
      Self::Connect => &[],
      Self::Post => &[CREATE_OPTIONS_PARAMETERS],
      Self::Delete => &[DELETE_OPTIONS_PARAMETERS],
      Self::DeleteCollection => &[DELETE_OPTIONS_PARAMETERS, LIST_OPTIONS_PARAMETERS],
      Self::Get => &[GET_OPTIONS_PARAMETERS],
      Self::List | Self::Watch | Self::WatchList => &[LIST_OPTIONS_PARAMETERS],
      Self::Patch => &[PATCH_OPTIONS_PARAMETERS],
      Self::Put => &[UPDATE_OPTIONS_PARAMETERS],
    };
    lists.iter().flat_map(|list| list.iter().copied()).collect()
  }

  fn options(self) -> Option<SupportType> {
    match self {
      Self::Connect | Self::Delete => None,
      Self::DeleteCollection | Self::List | Self::Watch | Self::WatchList => Some(SupportType::ListOptions),
      Self::Get => Some(SupportType::GetOptions),
      Self::Patch => Some(SupportType::PatchOptions),
      Self::Post => Some(SupportType::CreateOptions),
      Self::Put => Some(SupportType::UpdateOptions),
    }
  }
}

/// The subresource addressed by a request path: `/apis/apps/v1/namespaces/{namespace}/deployments/{name}/status`
/// -> `status`.
pub(crate) fn subresource(path: &str) -> Option<&str> {
  URI_PATTERN
    .captures(path)
    .and_then(|captures| captures.name("subresource"))
    .map(|subresource| subresource.as_str())
}

/// An operation together with the path item it was declared on.
struct OperationContext<'a> {
  path: &'a str,
  http_method: http::Method,
  operation: &'a Operation,
  path_parameters: &'a [ObjectOrReference<Parameter>],
}

/// Clients generated from the document, plus the non-fatal problems found on the way.
#[derive(Debug, Default)]
pub(crate) struct ClientOutput {
  pub(crate) clients: Vec<ClientDef>,
  pub(crate) warnings: Vec<String>,
}

/// Groups every Kubernetes operation by group/version/kind and builds one client trait per group.
pub(crate) struct ClientGenerator<'a> {
  spec: &'a Spec,
  types: &'a TypeFactory,
}

impl<'a> ClientGenerator<'a> {
  pub(crate) fn new(spec: &'a Spec, types: &'a TypeFactory) -> Self {
    Self { spec, types }
  }

  pub(crate) fn generate(&self) -> GeneratorResult<ClientOutput> {
    let mut groups: BTreeMap<GroupVersionKind, Vec<OperationContext<'a>>> = BTreeMap::new();

    for (path, item) in self.spec.paths.iter().flatten() {
      if is_deprecated(item.description.as_deref()) {
        continue;
      }

      for (method, operation) in item.methods() {
        let Some(gvk) = operation.extension(GROUP_VERSION_KIND) else {
          continue;
        };
        if operation.is_deprecated() {
          continue;
        }

        let gvk: GroupVersionKind =
          serde_json::from_value(gvk.clone()).map_err(|err| GeneratorError::MalformedGroupVersionKind {
            operation: operation_id(operation),
            reason: err.to_string(),
          })?;

        groups.entry(gvk).or_default().push(OperationContext {
          path,
          http_method: method,
          operation,
          path_parameters: &item.parameters,
        });
      }
    }

    let mut output = ClientOutput::default();
    for (gvk, operations) in groups {
      let client = self.client(gvk, &operations, &mut output.warnings)?;
      output.clients.push(client);
    }
    Ok(output)
  }

  fn client(
    &self,
    gvk: GroupVersionKind,
    operations: &[OperationContext<'_>],
    warnings: &mut Vec<String>,
  ) -> GeneratorResult<ClientDef> {
    let module: Vec<String> = operations
      .first()
      .map(|context| {
        context
          .operation
          .tags
          .iter()
          .flat_map(|tag| tag.split('_'))
          .map(to_module_name)
          .collect()
      })
      .unwrap_or_default();

    let methods = operations
      .iter()
      .map(|context| self.method(context, warnings))
      .collect::<GeneratorResult<Vec<_>>>()?;
    let methods = unique_methods(methods, warnings);

    Ok(ClientDef {
      name: format!("{}Client", to_rust_type_name(&gvk.kind)),
      gvk,
      module,
      methods,
    })
  }

  fn method(&self, context: &OperationContext<'_>, warnings: &mut Vec<String>) -> GeneratorResult<MethodDef> {
    let operation = context.operation;
    let operation_id = operation_id(operation);

    let action = operation
      .extension(ACTION)
      .and_then(|action| action.as_str())
      .ok_or_else(|| GeneratorError::MissingAction {
        operation: operation_id.clone(),
      })?;
    let action = Action::from_str(action).map_err(|_| GeneratorError::UnrecognizedAction {
      operation: operation_id.clone(),
      action: action.to_string(),
    })?;

    let subresource = subresource(context.path);

    Ok(MethodDef {
      docs: Documentation::wrapped(operation.description.as_deref(), Documentation::MEMBER_WIDTH),
      name: to_method_name(action.method_name(), subresource),
      http_method: context.http_method.clone(),
      path: context.path.to_string(),
      parameters: self.parameters(action, context, &operation_id, warnings)?,
      returns: self.return_type(operation, &operation_id, warnings)?,
      operation_id,
    })
  }

  fn parameters(
    &self,
    action: Action,
    context: &OperationContext<'_>,
    operation_id: &str,
    warnings: &mut Vec<String>,
  ) -> GeneratorResult<Vec<ParameterDef>> {
    let absorbed = action.absorbed_parameters();
    let mut used = BTreeSet::new();
    let mut parameters = vec![];

    let mut push = |parameters: &mut Vec<ParameterDef>, name: &str, kind: ParameterKind| {
      let name = ensure_unique(name, &used);
      used.insert(name.clone());
      parameters.push(ParameterDef { name, kind });
    };

    for parameter in self.resolved_parameters(context)? {
      let name = parameter.name.as_str();
      if name == "pretty" || name == "namespace" || absorbed.contains(&name) {
        continue;
      }
      if parameter.deprecated.unwrap_or(false) || is_deprecated(parameter.description.as_deref()) {
        continue;
      }

      let ty = match parameter.schema.as_ref() {
        Some(schema) => self.types.create(schema)?,
        None => TypeRef::String,
      };
      push(&mut parameters, &to_rust_field_name(name), ParameterKind::Value(ty));
    }

    if action == Action::Patch {
      push(&mut parameters, "patch_type", ParameterKind::PatchType);
    }

    if let Some(body) = self.request_body_type(context.operation, operation_id, warnings)? {
      push(&mut parameters, "body", ParameterKind::Body(body));
    }

    if let Some(options) = action.options() {
      push(&mut parameters, "options", ParameterKind::Options(options));
    }

    if action == Action::Patch {
      push(&mut parameters, "subresources", ParameterKind::Subresources);
    }

    Ok(parameters)
  }

  /// Operation parameters followed by the path item's, skipping path-level ones the operation
  /// overrides.
  fn resolved_parameters(&self, context: &OperationContext<'_>) -> GeneratorResult<Vec<Parameter>> {
    let resolve = |parameter: &ObjectOrReference<Parameter>| {
      parameter
        .resolve(self.spec)
        .map_err(|err| GeneratorError::resolve(format!("parameter of {}", context.path), err))
    };

    let mut parameters = context
      .operation
      .parameters
      .iter()
      .map(resolve)
      .collect::<GeneratorResult<Vec<_>>>()?;

    for parameter in context.path_parameters {
      let parameter = resolve(parameter)?;
      let overridden = parameters
        .iter()
        .any(|existing| existing.name == parameter.name && existing.location == parameter.location);
      if !overridden {
        parameters.push(parameter);
      }
    }

    Ok(parameters)
  }

  fn request_body_type(
    &self,
    operation: &Operation,
    operation_id: &str,
    warnings: &mut Vec<String>,
  ) -> GeneratorResult<Option<TypeRef>> {
    let Some(request_body) = operation.request_body.as_ref() else {
      return Ok(None);
    };
    let request_body = request_body
      .resolve(self.spec)
      .map_err(|err| GeneratorError::resolve(format!("request body of {operation_id}"), err))?;

    let media_type = request_body
      .content
      .get(MEDIA_TYPE_ALL)
      .or_else(|| request_body.content.get(MEDIA_TYPE_APPLICATION_JSON_PATCH_JSON));
    let Some(media_type) = media_type else {
      let warning = format!("{operation_id} missing {MEDIA_TYPE_ALL} request body type");
      tracing::warn!("{warning}");
      warnings.push(warning);
      return Ok(None);
    };

    media_type
      .schema
      .as_ref()
      .map(|schema| self.types.create(schema))
      .transpose()
  }

  fn return_type(
    &self,
    operation: &Operation,
    operation_id: &str,
    warnings: &mut Vec<String>,
  ) -> GeneratorResult<Option<TypeRef>> {
    let Some(response) = operation.responses.as_ref().and_then(|responses| responses.get("200")) else {
      let warning = format!("{operation_id} missing 200 response");
      tracing::warn!("{warning}");
      warnings.push(warning);
      return Ok(None);
    };
    let response = response
      .resolve(self.spec)
      .map_err(|err| GeneratorError::resolve(format!("200 response of {operation_id}"), err))?;

    response
      .content
      .get(MEDIA_TYPE_APPLICATION_JSON)
      .and_then(|media_type| media_type.schema.as_ref())
      .map(|schema| self.types.create(schema))
      .transpose()
  }
}

/// Keeps the first method of each name and sorts by name. Operations that only differ in their
/// path (namespaced and cluster-wide lists) collapse silently; losing one with a different HTTP
/// method is reported.
fn unique_methods(methods: Vec<MethodDef>, warnings: &mut Vec<String>) -> Vec<MethodDef> {
  let mut unique = vec![];
  let chunks = methods
    .into_iter()
    .sorted_by(|a, b| a.name.cmp(&b.name))
    .chunk_by(|method| method.name.clone());

  for (name, mut group) in &chunks {
    let Some(kept) = group.next() else {
      continue;
    };
    for dropped in group.filter(|dropped| dropped.http_method != kept.http_method) {
      let warning = format!(
        "{} ({}) dropped: method {name} already generated from {} ({})",
        dropped.operation_id, dropped.http_method, kept.operation_id, kept.http_method
      );
      tracing::warn!("{warning}");
      warnings.push(warning);
    }
    unique.push(kept);
  }

  unique
}

fn operation_id(operation: &Operation) -> String {
  operation
    .operation_id
    .clone()
    .unwrap_or_else(|| "<unnamed operation>".to_string())
}
