use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{TypeMeta, percent_encode_query_component};

/// Request options that travel as URL query parameters.
pub trait QueryOptions {
  /// The set options as `(name, value)` pairs, in a stable order. Unset options and the
  /// `kind`/`apiVersion` type fields are left out.
  fn query_pairs(&self) -> Vec<(&'static str, String)>;

  /// The options rendered as a percent-encoded query string, without the leading `?`.
  fn to_query_string(&self) -> String {
    self
      .query_pairs()
      .into_iter()
      .map(|(name, value)| format!("{name}={}", percent_encode_query_component(&value)))
      .collect::<Vec<_>>()
      .join("&")
  }
}

macro_rules! impl_type_meta {
  ($($name:ident),* $(,)?) => {
    $(
      impl TypeMeta for $name {
        fn kind(&self) -> Option<&str> {
          self.kind.as_deref()
        }

        fn api_version(&self) -> Option<&str> {
          self.api_version.as_deref()
        }
      }
    )*
  };
}

impl_type_meta!(ListOptions, GetOptions, CreateOptions, UpdateOptions, PatchOptions);

fn push<T: ToString>(pairs: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&T>) {
  if let Some(value) = value {
    pairs.push((name, value.to_string()));
  }
}

fn push_all(pairs: &mut Vec<(&'static str, String)>, name: &'static str, values: Option<&Vec<String>>) {
  for value in values.into_iter().flatten() {
    pairs.push((name, value.clone()));
  }
}

/// Options for list, watch and delete-collection calls.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
  pub kind: Option<String>,
  pub api_version: Option<String>,
  /// Restricts the returned objects by their labels. Defaults to everything.
  pub label_selector: Option<String>,
  /// Restricts the returned objects by their fields. Defaults to everything.
  pub field_selector: Option<String>,
  /// Stream add, update and remove notifications instead of returning a list.
  pub watch: Option<bool>,
  /// Ask for `BOOKMARK` watch events. Ignored when this is not a watch.
  pub allow_watch_bookmarks: Option<bool>,
  /// Constrains which resource versions the request may be served from.
  pub resource_version: Option<String>,
  /// How `resource_version` is applied to list calls.
  pub resource_version_match: Option<String>,
  /// Upper bound on the duration of the call, regardless of activity.
  pub timeout_seconds: Option<i64>,
  /// Maximum number of items to return. The server sets `continue` on the list metadata
  /// when more items exist.
  pub limit: Option<i64>,
  /// Token from a previous list call's metadata to fetch the next chunk.
  #[serde(rename = "continue")]
  pub continue_token: Option<String>,
}

impl QueryOptions for ListOptions {
  fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push(&mut pairs, "labelSelector", self.label_selector.as_ref());
    push(&mut pairs, "fieldSelector", self.field_selector.as_ref());
    push(&mut pairs, "watch", self.watch.as_ref());
    push(&mut pairs, "allowWatchBookmarks", self.allow_watch_bookmarks.as_ref());
    push(&mut pairs, "resourceVersion", self.resource_version.as_ref());
    push(&mut pairs, "resourceVersionMatch", self.resource_version_match.as_ref());
    push(&mut pairs, "timeoutSeconds", self.timeout_seconds.as_ref());
    push(&mut pairs, "limit", self.limit.as_ref());
    push(&mut pairs, "continue", self.continue_token.as_ref());
    pairs
  }
}

/// Options for reading a single object.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct GetOptions {
  pub kind: Option<String>,
  pub api_version: Option<String>,
  /// Constrains which resource versions the request may be served from.
  pub resource_version: Option<String>,
}

impl QueryOptions for GetOptions {
  fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push(&mut pairs, "resourceVersion", self.resource_version.as_ref());
    pairs
  }
}

/// Options for creating an object.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptions {
  pub kind: Option<String>,
  pub api_version: Option<String>,
  /// When present, modifications are not persisted. `All` processes every dry run stage.
  pub dry_run: Option<Vec<String>>,
  /// Name of the actor making the change; at most 128 printable characters.
  pub field_manager: Option<String>,
}

impl QueryOptions for CreateOptions {
  fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push_all(&mut pairs, "dryRun", self.dry_run.as_ref());
    push(&mut pairs, "fieldManager", self.field_manager.as_ref());
    pairs
  }
}

/// Options for replacing an object.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptions {
  pub kind: Option<String>,
  pub api_version: Option<String>,
  /// When present, modifications are not persisted. `All` processes every dry run stage.
  pub dry_run: Option<Vec<String>>,
  /// Name of the actor making the change; at most 128 printable characters.
  pub field_manager: Option<String>,
}

impl QueryOptions for UpdateOptions {
  fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push_all(&mut pairs, "dryRun", self.dry_run.as_ref());
    push(&mut pairs, "fieldManager", self.field_manager.as_ref());
    pairs
  }
}

/// Options for patching an object.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct PatchOptions {
  pub kind: Option<String>,
  pub api_version: Option<String>,
  /// When present, modifications are not persisted. `All` processes every dry run stage.
  pub dry_run: Option<Vec<String>>,
  /// Re-acquire fields owned by other managers on apply. Must be unset for non-apply patches.
  pub force: Option<bool>,
  /// Name of the actor making the change. Required for apply patches.
  pub field_manager: Option<String>,
}

impl QueryOptions for PatchOptions {
  fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push_all(&mut pairs, "dryRun", self.dry_run.as_ref());
    push(&mut pairs, "force", self.force.as_ref());
    push(&mut pairs, "fieldManager", self.field_manager.as_ref());
    pairs
  }
}
