#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::{Cli, Colors, Commands, ListCommands};

mod generator;
mod naming;
mod ui;
mod utils;

/// `RUST_LOG` wins; otherwise warnings only, or debug output with `--verbose`.
fn init_tracing(verbose: bool) {
  let default = if verbose { "kube_gen=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::from_modes(cli.color, cli.theme);

  match cli.command {
    Commands::List { list_command } => {
      init_tracing(false);
      match list_command {
        ListCommands::Resources { input } => ui::commands::list_resources(&input, &colors).await?,
      }
    }
    Commands::Generate(command) => {
      init_tracing(command.verbose);
      let config = ui::commands::GenerateConfig::from_command(command)?;
      ui::commands::generate_code(config, &colors).await?;
    }
  }

  Ok(())
}
