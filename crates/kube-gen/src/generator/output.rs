use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

use anyhow::Context;

/// A generated source tree: file paths relative to the output directory, mapped to their contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedTree {
  files: BTreeMap<PathBuf, String>,
}

impl GeneratedTree {
  /// Adds a file. The first contents recorded for a path win.
  pub fn insert(&mut self, path: impl Into<PathBuf>, contents: String) -> bool {
    let path = path.into();
    if self.files.contains_key(&path) {
      return false;
    }
    self.files.insert(path, contents);
    true
  }

  #[cfg(test)]
  pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
    self.files.get(path.as_ref()).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  #[cfg(test)]
  pub fn paths(&self) -> impl Iterator<Item = &Path> {
    self.files.keys().map(PathBuf::as_path)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
    self.files.iter().map(|(path, contents)| (path.as_path(), contents.as_str()))
  }

  /// Replaces `dir` with the tree: an existing directory is deleted first, then every file is written
  /// with its parent directories created as needed.
  pub async fn write_to(&self, dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::try_exists(dir).await.unwrap_or(false) {
      tokio::fs::remove_dir_all(dir)
        .await
        .with_context(|| format!("Failed to delete {}", dir.display()))?;
      tracing::warn!("Deleted {}", dir.display());
    }

    for (relative, contents) in self.iter() {
      let path = dir.join(relative);
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
          .await
          .with_context(|| format!("Failed to create {}", parent.display()))?;
      }
      tracing::debug!("Writing {}", path.display());
      tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
  }
}
