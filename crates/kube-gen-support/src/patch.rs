use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The flavour of a patch request, which selects the request `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum PatchType {
  /// RFC 6902 JSON patch.
  Json,
  /// RFC 7386 JSON merge patch.
  Merge,
  #[default]
  StrategicMerge,
  /// Server-side apply.
  Apply,
}

#[derive(Debug, thiserror::Error)]
#[error("'{0}' is not a recognized patch content type")]
pub struct PatchTypeError(pub String);

impl PatchType {
  #[must_use]
  pub const fn content_type(self) -> &'static str {
    match self {
      Self::Json => "application/json-patch+json",
      Self::Merge => "application/merge-patch+json",
      Self::StrategicMerge => "application/strategic-merge-patch+json",
      Self::Apply => "application/apply-patch+yaml",
    }
  }

  /// Looks a patch type up by its `Content-Type`.
  pub fn from_content_type(content_type: &str) -> Result<Self, PatchTypeError> {
    match content_type {
      "application/json-patch+json" => Ok(Self::Json),
      "application/merge-patch+json" => Ok(Self::Merge),
      "application/strategic-merge-patch+json" => Ok(Self::StrategicMerge),
      "application/apply-patch+yaml" => Ok(Self::Apply),
      other => Err(PatchTypeError(other.to_string())),
    }
  }
}
