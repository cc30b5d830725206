use std::{ffi::OsStr, path::Path};

use anyhow::Context as _;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3::OpenApiV3Spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// A memory-mapped OpenAPI document waiting to be parsed.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = SpecFormat::from_path(path);
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("opening OpenAPI document {}", path.display()))?;

    Ok(Self { file, format })
  }

  pub fn parse(&self) -> anyhow::Result<oas3::Spec> {
    parse_spec(self.file.as_slice(), self.format)
  }
}

/// Parses an OpenAPI v3 document held in memory.
pub fn parse_spec(content: &[u8], format: SpecFormat) -> anyhow::Result<oas3::Spec> {
  match format {
    SpecFormat::Json => {
      serde_json::from_slice::<OpenApiV3Spec>(content).context("parsing OpenAPI document as JSON")
    }
    SpecFormat::Yaml => {
      let content = std::str::from_utf8(content)?;
      oas3::from_yaml(content).context("parsing OpenAPI document as YAML")
    }
  }
}
