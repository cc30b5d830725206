//! Runtime vocabulary shared by the model and client trees that `kube-gen` writes.
//!
//! Generated model types implement [`TypeMeta`], [`Resource`] and [`HasMetadata`];
//! generated client traits take the option types defined here and return the
//! generated models.

mod int_or_string;
mod meta;
mod options;
mod patch;

pub use chrono;
pub use int_or_string::IntOrString;
pub use meta::{HasMetadata, Resource, TypeMeta};
pub use options::{CreateOptions, GetOptions, ListOptions, PatchOptions, QueryOptions, UpdateOptions};
pub use patch::{PatchType, PatchTypeError};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
pub use serde_json;

pub const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[inline]
#[must_use]
pub fn percent_encode_path_segment(segment: &str) -> String {
  utf8_percent_encode(segment, PATH_ENCODE_SET).to_string()
}

pub const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[inline]
#[must_use]
pub fn percent_encode_query_component(component: &str) -> String {
  utf8_percent_encode(component, QUERY_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
  #[test]
  fn test_percent_encode_query_component() {
    assert_eq!(super::percent_encode_query_component("app in (web)"), "app%20in%20%28web%29");
    assert_eq!(super::percent_encode_query_component("a+b"), "a%2Bb");
    assert_eq!(super::percent_encode_query_component("tier=frontend"), "tier%3Dfrontend");
    assert_eq!(super::percent_encode_query_component("simple"), "simple");
    assert_eq!(
      super::percent_encode_query_component("with-dash_underscore"),
      "with-dash_underscore"
    );
  }

  #[test]
  fn test_percent_encode_path_segment() {
    assert_eq!(super::percent_encode_path_segment("my-pod.v1"), "my-pod.v1");
    assert_eq!(super::percent_encode_path_segment("a/b"), "a%2Fb");
  }
}
