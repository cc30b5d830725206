use std::fmt;

use serde::{Deserialize, Serialize};

/// A value the API accepts either as an integer or as a string, such as a port number or name,
/// or a percentage like `"25%"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
  Int(i32),
  String(String),
}

impl Default for IntOrString {
  fn default() -> Self {
    Self::Int(0)
  }
}

impl fmt::Display for IntOrString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Int(value) => write!(f, "{value}"),
      Self::String(value) => f.write_str(value),
    }
  }
}

impl From<i32> for IntOrString {
  fn from(value: i32) -> Self {
    Self::Int(value)
  }
}

impl From<String> for IntOrString {
  fn from(value: String) -> Self {
    Self::String(value)
  }
}

impl From<&str> for IntOrString {
  fn from(value: &str) -> Self {
    Self::String(value.to_string())
  }
}
