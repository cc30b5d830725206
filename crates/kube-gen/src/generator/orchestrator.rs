//! Orchestration for the Kubernetes model and client generation pipeline.
//!
//! `Orchestrator::generate` turns a parsed document into a model tree and a client tree, each a
//! `GeneratedTree` that `generate_code` writes with `GeneratedTree::write_to`. `Orchestrator::resources`
//! backs `kube-gen list resources`.

use super::{
  GeneratorConfig,
  client::{ClientGenerator, ClientOutput},
  codegen::{CodegenPaths, clients::TraitGenerator, file_header, models::StructGenerator, modules::ModuleTree},
  cycles::box_cyclic_references,
  model::ModelGenerator,
  output::GeneratedTree,
  type_factory::TypeFactory,
};

/// Runs model generation followed by client generation over one document.
pub struct Orchestrator {
  spec: oas3::Spec,
  config: GeneratorConfig,
}

/// Statistics about the generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
  pub models_generated: usize,
  /// Component schemas that map onto an existing type instead of a struct
  pub aliases_registered: usize,
  pub clients_generated: usize,
  pub methods_generated: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  /// Non-fatal problems, such as operations without a `200` response
  pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  pub model: GeneratedTree,
  pub client: GeneratedTree,
  pub stats: GenerationStats,
}

/// One client trait, as shown by `kube-gen list resources`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSummary {
  pub group: String,
  pub version: String,
  pub kind: String,
  pub client: String,
  pub methods: Vec<String>,
}

impl Orchestrator {
  pub fn new(spec: oas3::Spec, config: GeneratorConfig) -> Self {
    Self { spec, config }
  }

  pub fn title(&self) -> &str {
    &self.spec.info.title
  }

  pub fn version(&self) -> &str {
    &self.spec.info.version
  }

  /// Generates both trees.
  ///
  /// # Errors
  ///
  /// Fails on schema names, property types or actions the generator does not recognise, on
  /// unresolvable references and on configured module paths that are not valid Rust paths.
  pub fn generate(&self) -> anyhow::Result<GeneratedOutput> {
    let types = TypeFactory::new(&self.spec)?;

    let mut models = ModelGenerator::new(&self.spec, &types).generate()?;
    let cycle_details = box_cyclic_references(&mut models);

    let ClientOutput { clients, mut warnings } = ClientGenerator::new(&self.spec, &types).generate()?;

    let paths = CodegenPaths::new(&self.config)?;
    let header = file_header(self.title(), self.version());

    let struct_generator = StructGenerator::new(&paths);
    let mut model_tree = ModuleTree::default();
    for model in &models {
      let module = model.ty.module_path();
      if model_tree.insert(&module, model.ty.type_name(), struct_generator.generate(model)) {
        replaced(&mut warnings, &model.ty.schema, &model.ty.type_name(), &module);
      }
    }

    let trait_generator = TraitGenerator::new(&paths);
    let mut client_tree = ModuleTree::default();
    for client in &clients {
      if client_tree.insert(&client.module, client.name.clone(), trait_generator.generate(client)) {
        let source = format!("{}/{}", client.gvk.api_version(), client.gvk.kind);
        replaced(&mut warnings, &source, &client.name, &client.module);
      }
    }

    let stats = GenerationStats {
      models_generated: model_tree.type_count(),
      aliases_registered: types.alias_count(),
      clients_generated: client_tree.type_count(),
      methods_generated: clients.iter().map(|client| client.methods.len()).sum(),
      cycles_detected: cycle_details.len(),
      cycle_details,
      warnings,
    };

    Ok(GeneratedOutput {
      model: model_tree.render(&header)?,
      client: client_tree.render(&header)?,
      stats,
    })
  }

  /// Summarises the client traits the document yields without rendering any code.
  pub fn resources(&self) -> anyhow::Result<Vec<ResourceSummary>> {
    let types = TypeFactory::new(&self.spec)?;
    let ClientOutput { clients, .. } = ClientGenerator::new(&self.spec, &types).generate()?;

    Ok(
      clients
        .into_iter()
        .map(|client| ResourceSummary {
          client: format!("{}::{}", self.config.client_module, client.qualified_name()),
          methods: client.methods.iter().map(|method| method.name.clone()).collect(),
          group: client.gvk.group,
          version: client.gvk.version,
          kind: client.gvk.kind,
        })
        .collect(),
    )
  }
}

fn replaced(warnings: &mut Vec<String>, source: &str, type_name: &str, module: &[String]) {
  let warning = format!("{source} replaced an earlier {type_name} in module {}", module.join("::"));
  tracing::warn!("{warning}");
  warnings.push(warning);
}
