use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "kube-gen")]
#[command(author, version, about = "Kubernetes OpenAPI to Rust model and client generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a Kubernetes OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate model structs and client traits
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
#[command(group = clap::ArgGroup::new("outputs").required(true).multiple(true))]
pub struct GenerateCommand {
  /// Path to the Kubernetes OpenAPI v3 document (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Directory that receives the model tree. Its previous contents are deleted
  #[arg(long, value_name = "DIR", group = "outputs")]
  pub model: Option<PathBuf>,

  /// Directory that receives the client traits. Its previous contents are deleted
  #[arg(long, value_name = "DIR", group = "outputs")]
  pub client: Option<PathBuf>,

  /// Rust path at which the model tree is mounted in the consuming crate
  #[arg(long, value_name = "PATH", default_value = "crate::model")]
  pub model_module: String,

  /// Rust path at which the client tree is mounted in the consuming crate
  #[arg(long, value_name = "PATH", default_value = "crate::client")]
  pub client_module: String,

  /// Path of the support crate as seen from generated code
  #[arg(long, value_name = "PATH", default_value = "kube_gen_support")]
  pub support_crate: String,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the client traits the document yields, one per group/version/kind
  Resources {
    /// Path to the Kubernetes OpenAPI v3 document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
