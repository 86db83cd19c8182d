use std::collections::HashMap;
use std::path::Path;

/// Snapshot of the environment variables a load reads from.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Loads `env_file` (or `.env` in the working directory when `None`) into the
    /// process environment, then snapshots it. A missing file is not an error.
    pub fn from_system(env_file: Option<&Path>) -> Self {
        let loaded = match env_file {
            Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
            None => dotenvy::dotenv(),
        };
        if let Err(err) = loaded {
            tracing::debug!(error = %err, "no dotenv file loaded");
        }
        Self::from_process()
    }

    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut vars = HashMap::new();
        for (k, v) in pairs {
            vars.insert((*k).to_string(), (*v).to_string());
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    /// Like [`Env::get`], but unset, empty and whitespace-only values are all `None`.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}
