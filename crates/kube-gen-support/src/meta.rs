/// Access to the `kind` and `apiVersion` fields every Kubernetes object carries on the wire.
pub trait TypeMeta {
  fn kind(&self) -> Option<&str>;

  fn api_version(&self) -> Option<&str>;
}

/// A type that the API server identifies by group, version and kind.
pub trait Resource {
  /// The API group; empty for the core (legacy) group.
  const GROUP: &'static str;

  const VERSION: &'static str;

  const KIND: &'static str;

  /// The group version this type is served under, as written in `apiVersion`: `VERSION` for the
  /// core group, `GROUP/VERSION` otherwise.
  #[must_use]
  fn group_version() -> String {
    if Self::GROUP.is_empty() {
      Self::VERSION.to_string()
    } else {
      format!("{}/{}", Self::GROUP, Self::VERSION)
    }
  }
}

/// A type with standard object or list metadata.
pub trait HasMetadata {
  type Meta;

  fn metadata(&self) -> Option<&Self::Meta>;
}
