//! Narrators and emotions as reported by the engine's listing flags.

use std::fmt;

use serde::Serialize;

/// A voice profile exposed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Narrator {
    name: String,
}

impl Narrator {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An expressive style belonging to one narrator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Emotion {
    name: String,
}

impl Emotion {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Split listing output into one name per line, dropping blank lines.
///
/// A trailing `\r` is removed so CRLF output parses the same as LF.
pub(crate) fn parse_listing(stdout: &str) -> Vec<&str> {
    stdout
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_drops_trailing_empty_lines() {
        assert_eq!(parse_listing("A\nB\n\n"), vec!["A", "B"]);
    }

    #[test]
    fn test_parse_listing_crlf() {
        assert_eq!(parse_listing("Japanese Female1\r\nJapanese Male1\r\n"), vec![
            "Japanese Female1",
            "Japanese Male1"
        ]);
    }

    #[test]
    fn test_parse_listing_empty() {
        assert!(parse_listing("").is_empty());
        assert!(parse_listing("\n\n").is_empty());
    }

    #[test]
    fn test_display_and_json() {
        let narrator = Narrator::new("Japanese Female1");
        assert_eq!(narrator.to_string(), "Japanese Female1");

        let emotions = vec![Emotion::new("happy"), Emotion::new("sad")];
        assert_eq!(
            serde_json::to_string(&emotions).unwrap(),
            r#"["happy","sad"]"#
        );
    }
}
