use std::path::{Path, PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    GeneratorConfig,
    orchestrator::{GenerationStats, Orchestrator},
    output::GeneratedTree,
  },
  ui::{Colors, GenerateCommand, colors::Role},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub model: Option<PathBuf>,
  pub client: Option<PathBuf>,
  pub generator: GeneratorConfig,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      model,
      client,
      model_module,
      client_module,
      support_crate,
      verbose,
      quiet,
    } = command;

    if model.is_none() && client.is_none() {
      anyhow::bail!("Nothing to generate: pass --model, --client or both");
    }
    if let (Some(model), Some(client)) = (&model, &client)
      && model == client
    {
      anyhow::bail!(
        "--model and --client both point at {}; each tree replaces its directory",
        model.display()
      );
    }

    Ok(Self {
      input,
      model,
      client,
      generator: GeneratorConfig::builder()
        .model_module(model_module)
        .client_module(client_module)
        .support_crate(support_crate)
        .build(),
      verbose,
      quiet,
    })
  }

  async fn load_spec(&self) -> anyhow::Result<oas3::Spec> {
    SpecLoader::open(&self.input).await?.parse()
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!(
        "{} {}",
        format_timestamp().with(self.colors.get(Role::Timestamp)),
        message.with(self.colors.get(Role::Primary))
      );
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.get(Role::Label)),
        value.with(self.colors.get(Role::Value))
      );
    }
  }

  fn log_loading(&self) {
    self.info(&format!("Loading OpenAPI document from: {}", self.config.input.display()));
  }

  fn log_generating(&self, orchestrator: &Orchestrator) {
    self.info(&format!(
      "Generating models and clients for {} {}...",
      orchestrator.title(),
      orchestrator.version()
    ));
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    if self.config.model.is_some() {
      self.stat("Models generated:", stats.models_generated.to_string());
      self.stat("", format!("{} schemas mapped to existing types", stats.aliases_registered));
    }
    if self.config.client.is_some() {
      self.stat("Clients generated:", stats.clients_generated.to_string());
      self.stat("", format!("{} methods", stats.methods_generated));
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.get(Role::Accent)),
          cycle.join(" -> ").with(self.colors.get(Role::Info))
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || !self.config.verbose {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.get(Role::Accent)),
        warning.as_str().with(self.colors.get(Role::Primary))
      );
    }
  }

  fn log_writing(&self, what: &str, tree: &GeneratedTree, dir: &Path) {
    self.info(&format!("Writing {} {what} files to: {}", tree.len(), dir.display()));
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.get(Role::Timestamp)),
        "Successfully generated Kubernetes models and clients".with(self.colors.get(Role::Success))
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let spec = config.load_spec().await?;

  let orchestrator = Orchestrator::new(spec, config.generator.clone());
  logger.log_generating(&orchestrator);
  let output = orchestrator.generate()?;
  logger.print_statistics(&output.stats);

  let trees: [(&str, Option<&PathBuf>, &GeneratedTree); 2] = [
    ("model", config.model.as_ref(), &output.model),
    ("client", config.client.as_ref(), &output.client),
  ];
  for (what, dir, tree) in trees {
    let Some(dir) = dir.filter(|_| !tree.is_empty()) else {
      continue;
    };
    logger.log_writing(what, tree, dir);
    tree.write_to(dir).await?;
  }

  logger.log_success();
  Ok(())
}
