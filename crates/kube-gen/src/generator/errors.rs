use thiserror::Error;

/// Failures while mapping the OpenAPI document onto Rust definitions. All of them abort generation:
/// a document the generator does not understand would otherwise produce a partial, uncompilable tree.
#[derive(Debug, Error)]
pub enum GeneratorError {
  #[error("'{0}' is not a recognized Kubernetes name")]
  UnrecognizedName(String),

  #[error("'{schema_type},{format}' is not a recognized property type")]
  UnrecognizedPropertyType { schema_type: String, format: String },

  #[error("'{action}' is not a recognized action (operation {operation})")]
  UnrecognizedAction { operation: String, action: String },

  #[error("operation {operation} has a malformed x-kubernetes-group-version-kind: {reason}")]
  MalformedGroupVersionKind { operation: String, reason: String },

  #[error("operation {operation} has no x-kubernetes-action")]
  MissingAction { operation: String },

  #[error("reference '{0}' forms a cycle of type aliases")]
  AliasCycle(String),

  #[error("failed to resolve {context}: {message}")]
  Resolve { context: String, message: String },
}

impl GeneratorError {
  pub(crate) fn unrecognized_type(schema_type: Option<&str>, format: Option<&str>) -> Self {
    Self::UnrecognizedPropertyType {
      schema_type: schema_type.unwrap_or("null").to_string(),
      format: format.unwrap_or("null").to_string(),
    }
  }

  pub(crate) fn resolve(context: impl Into<String>, error: impl std::fmt::Display) -> Self {
    Self::Resolve {
      context: context.into(),
      message: error.to_string(),
    }
  }
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
