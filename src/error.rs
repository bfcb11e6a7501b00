//! Error type shared by the client, the options validator and the CLI.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("speed must be between 50 and 200, got {0}")]
    SpeedOutOfRange(i32),

    #[error("pitch must be between -300 and 300, got {0}")]
    PitchOutOfRange(i32),

    #[error("invalid emotion: {name} not found for narrator {narrator}")]
    InvalidEmotion { name: String, narrator: String },

    #[error("failed to list emotion: {0}")]
    EmotionLookup(#[source] Box<Error>),

    #[error("invalid emotion setting {0:?}, expected name=value")]
    InvalidEmotionSetting(String),

    #[error("unknown narrator: {0}")]
    UnknownNarrator(String),

    #[error("no narrator given, pass --narrator or set defaults.narrator")]
    NoNarrator,

    #[error("no default VOICEPEAK path for {0}, set one explicitly")]
    UnsupportedPlatform(String),

    #[error("failed to run {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited with {status}{}", program.display(), stderr_suffix(stderr))]
    Failed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_messages() {
        assert_eq!(
            Error::SpeedOutOfRange(201).to_string(),
            "speed must be between 50 and 200, got 201"
        );
        assert_eq!(
            Error::PitchOutOfRange(-301).to_string(),
            "pitch must be between -300 and 300, got -301"
        );
    }

    #[test]
    fn test_emotion_lookup_keeps_source() {
        use std::error::Error as _;

        let err = Error::EmotionLookup(Box::new(Error::UnknownNarrator("x".into())));
        assert_eq!(err.to_string(), "failed to list emotion: unknown narrator: x");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_stderr_suffix() {
        assert_eq!(stderr_suffix("  \n"), "");
        assert_eq!(stderr_suffix("boom\n"), ": boom");
    }
}
