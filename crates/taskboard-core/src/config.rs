use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use serde::Deserialize;
use tracing::{
  debug,
  info,
  warn
};

pub const DEFAULT_BIND: &str =
  "127.0.0.1:8000";
pub const DEFAULT_DATA_DIR: &str =
  "~/.taskboard";
pub const DEFAULT_DATA_FILE: &str =
  "tasks.json";

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub bind:         String,
  pub data_dir:     PathBuf,
  pub data_file:    String,
  #[serde(skip)]
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind:         DEFAULT_BIND
        .to_string(),
      data_dir:     PathBuf::from(
        DEFAULT_DATA_DIR
      ),
      data_file:    DEFAULT_DATA_FILE
        .to_string(),
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    config_override
  ))]
  pub fn load(
    config_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let path = resolve_config_path(
      config_override
    );
    let Some(path) = path else {
      warn!(
        "no config file found; using \
         defaults"
      );
      return Ok(Self::default());
    };

    info!(config = %path.display(), "loading config");
    let path = expand_tilde(&path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    let mut cfg = Self::from_toml_str(
      &text
    )
    .with_context(|| {
      format!(
        "invalid config file {}",
        path.display()
      )
    })?;
    cfg.loaded_files.push(path);
    Ok(cfg)
  }

  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    toml::from_str(text).map_err(
      |err| anyhow!("{err}")
    )
  }

  /// Applies `TASKBOARD_DATA` and
  /// `TASKBOARD_BIND` from the process
  /// environment.
  pub fn apply_env(&mut self) {
    self.apply_env_from(|key| {
      std::env::var(key).ok()
    });
  }

  pub fn apply_env_from<F>(
    &mut self,
    lookup: F
  ) where
    F: Fn(&str) -> Option<String>
  {
    if let Some(data) =
      lookup("TASKBOARD_DATA")
        .filter(|v| !v.trim().is_empty())
    {
      debug!(data = %data, "data dir from environment");
      self.data_dir = PathBuf::from(data);
    }
    if let Some(bind) =
      lookup("TASKBOARD_BIND")
        .filter(|v| !v.trim().is_empty())
    {
      debug!(bind = %bind, "bind address from environment");
      self.bind = bind;
    }
  }

  #[tracing::instrument(skip(self))]
  pub fn apply_overrides(
    &mut self,
    data_dir: Option<&Path>,
    bind: Option<&str>
  ) {
    if let Some(dir) = data_dir {
      debug!(dir = %dir.display(), "applying data dir override");
      self.data_dir = dir.to_path_buf();
    }
    if let Some(bind) = bind {
      debug!(bind, "applying bind override");
      self.bind = bind.to_string();
    }
  }
}

#[tracing::instrument(skip(cfg))]
pub fn resolve_data_dir(
  cfg: &Config
) -> anyhow::Result<PathBuf> {
  let dir = expand_tilde(&cfg.data_dir);

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

fn resolve_config_path(
  override_path: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) =
    std::env::var("TASKBOARD_CONFIG")
  {
    if env_path == "/dev/null" {
      return None;
    }
    return Some(PathBuf::from(
      env_path
    ));
  }

  let candidate = dirs::config_dir()?
    .join("taskboard")
    .join("config.toml");
  candidate.exists().then_some(candidate)
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}
