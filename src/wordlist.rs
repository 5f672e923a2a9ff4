use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("wordlist file not found: {0}")]
    Missing(PathBuf),
    #[error("failed to read wordlist file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Immutable set of known-breached passwords. Membership is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Wordlist {
    entries: HashSet<String>,
}

impl Wordlist {
    /// Parse newline-delimited content into a deduplicated set.
    ///
    /// - trailing whitespace (including `\r`) is stripped
    /// - blank lines are ignored
    /// - leading whitespace is kept, it can be part of a password
    pub fn parse_str(s: &str) -> Self {
        let entries = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { entries }
    }

    /// Load a wordlist from disk. Non UTF-8 files are read as Latin-1.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordlistError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => WordlistError::Missing(path.to_path_buf()),
            _ => WordlistError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let content = String::from_utf8(bytes)
            .unwrap_or_else(|e| e.into_bytes().into_iter().map(char::from).collect());
        let list = Self::parse_str(&content);
        info!(path = %path.display(), entries = list.len(), "loaded breach wordlist");
        Ok(list)
    }

    /// Load a wordlist, or fall back to an empty one so the service still starts.
    /// With an empty list every check reports "not found".
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "continuing with an empty wordlist");
                Self::default()
            }
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Wordlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_trailing_whitespace_and_dedups() {
        let list = Wordlist::parse_str("password123  \nletmein\r\npassword123\n\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("password123"));
        assert!(list.contains("letmein"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let list = Wordlist::parse_str("Dragon\n");
        assert!(list.contains("Dragon"));
        assert!(!list.contains("dragon"));
    }

    #[test]
    fn leading_whitespace_is_significant() {
        let list = Wordlist::parse_str("  spaced\n");
        assert!(list.contains("  spaced"));
        assert!(!list.contains("spaced"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Wordlist::load("/definitely/not/here/rockyou.txt").unwrap_err();
        assert!(matches!(err, WordlistError::Missing(_)));
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let list = Wordlist::load_or_empty("/definitely/not/here/rockyou.txt");
        assert!(list.is_empty());
        assert!(!list.contains("password"));
    }
}
