//! Startup configuration loaded from an optional JSON file.
//!
//! git-steward reads a single file named `.git-steward` from the working
//! directory it was launched in. The file is optional, but when present it
//! must be valid JSON: a malformed config is a fatal startup error rather
//! than something to guess around. The loaded [`Conf`] is constructed once in
//! `main` and passed to the scan explicitly; there is no ambient global.

use crate::core::error::{GitStewardError, Result};
use crate::core::process::DEFAULT_CONCURRENCY_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed relative name of the optional config file
pub const CONFIG_FILE_NAME: &str = ".git-steward";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Conf {
    /// Directory whose immediate children are scanned
    pub path: PathBuf,
    /// Capacity of the git invocation permit pool
    pub concurrency: usize,
}

impl Default for Conf {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./"),
            concurrency: DEFAULT_CONCURRENCY_LIMIT,
        }
    }
}

impl Conf {
    /// Load the config from [`CONFIG_FILE_NAME`] in the current directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load the config from `path`, falling back to defaults when the file is
    /// missing or empty. A present, non-empty file must parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Ok(Self::default()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut conf: Conf = serde_json::from_str(&content)
            .map_err(|e| GitStewardError::config_parse(path, e))?;
        conf.validate();
        Ok(conf)
    }

    fn validate(&mut self) {
        if self.path.as_os_str().is_empty() {
            self.path = PathBuf::from("./");
        }
        if self.concurrency == 0 {
            self.concurrency = DEFAULT_CONCURRENCY_LIMIT;
        }
    }
}
