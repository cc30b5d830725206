pub(crate) mod ast;
pub(crate) mod client;
pub(crate) mod codegen;
pub(crate) mod cycles;
pub mod errors;
pub(crate) mod model;
pub mod orchestrator;
pub mod output;
pub(crate) mod type_factory;
pub(crate) mod types;

#[cfg(test)]
mod tests;

/// Where the generated trees live inside the consuming crate.
///
/// Types in another package are referenced by absolute path from `model_module`, so the model tree
/// must be mounted there. Client traits live under `client_module`.
#[derive(Debug, Clone, bon::Builder)]
pub struct GeneratorConfig {
  #[builder(into, default = String::from("crate::model"))]
  pub model_module: String,
  #[builder(into, default = String::from("crate::client"))]
  pub client_module: String,
  /// Path of the support crate as seen from generated code.
  #[builder(into, default = String::from("kube_gen_support"))]
  pub support_crate: String,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}
