// Dotenv-style credential file

use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

use checkin_core::domain::Credentials;
use checkin_core::port::CredentialSource;
use checkin_core::{AppError, Result};

/// `KEY=value` with optional single quotes; keys are upper-case letters and `_`
fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Z_]+)\s*=\s*'?(.*?)'?\s*$").expect("env line pattern is valid")
    })
}

/// Parse `KEY=value` lines, ignoring anything that does not match
///
/// Later duplicates win.
pub fn parse_env_lines(text: &str) -> HashMap<String, String> {
    let re = line_regex();
    text.lines()
        .filter_map(|line| re.captures(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Credential source backed by a file on disk
///
/// The file is read on every `load()`; nothing is cached.
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for FileCredentialSource {
    fn load(&self) -> Result<Credentials> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::Config(format!(
                "cannot read credential file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let pairs = parse_env_lines(&text);
        debug!(path = %self.path.display(), keys = pairs.len(), "Credential file loaded");

        Credentials::from_pairs(&pairs)
    }
}
