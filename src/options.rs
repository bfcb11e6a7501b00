//! Optional synthesis parameters and their validation.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::narrator::{Emotion, Narrator};

pub const SPEED_RANGE: RangeInclusive<i32> = 50..=200;
pub const PITCH_RANGE: RangeInclusive<i32> = -300..=300;

/// Source of a narrator's emotion names for validation.
///
/// `Client` answers with a live `--list-emotion` call; a pre-fetched list
/// answers without touching the engine.
pub trait EmotionLookup {
    fn emotions(&self, narrator: &Narrator) -> Result<Vec<Emotion>>;
}

impl EmotionLookup for &[Emotion] {
    fn emotions(&self, _narrator: &Narrator) -> Result<Vec<Emotion>> {
        Ok(self.to_vec())
    }
}

impl EmotionLookup for Vec<Emotion> {
    fn emotions(&self, _narrator: &Narrator) -> Result<Vec<Emotion>> {
        Ok(self.clone())
    }
}

/// Emotion name plus intensity, written `name=value` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionSetting {
    pub name: String,
    pub value: i32,
}

impl EmotionSetting {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for EmotionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl FromStr for EmotionSetting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidEmotionSetting(s.to_string());
        let (name, value) = s.split_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }
        let value = value.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(name, value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SayOptions {
    pub speed: Option<i32>,
    pub pitch: Option<i32>,
    pub emotion: Option<EmotionSetting>,
}

impl SayOptions {
    pub fn speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn pitch(mut self, pitch: i32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn emotion(mut self, name: impl Into<String>, value: i32) -> Self {
        self.emotion = Some(EmotionSetting::new(name, value));
        self
    }

    /// Check ranges, then confirm the emotion exists for `narrator`.
    ///
    /// The lookup is only consulted when an emotion is set.
    pub fn validate(&self, narrator: &Narrator, lookup: &dyn EmotionLookup) -> Result<()> {
        if let Some(speed) = self.speed {
            if !SPEED_RANGE.contains(&speed) {
                return Err(Error::SpeedOutOfRange(speed));
            }
        }
        if let Some(pitch) = self.pitch {
            if !PITCH_RANGE.contains(&pitch) {
                return Err(Error::PitchOutOfRange(pitch));
            }
        }

        if let Some(emotion) = &self.emotion {
            let available = lookup
                .emotions(narrator)
                .map_err(|e| Error::EmotionLookup(Box::new(e)))?;
            debug!(
                "Checking emotion {} against {} known for {narrator}",
                emotion.name,
                available.len()
            );
            if !available.iter().any(|e| e.name() == emotion.name) {
                return Err(Error::InvalidEmotion {
                    name: emotion.name.clone(),
                    narrator: narrator.name().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Engine flags for the fields that are set, in speed/pitch/emotion order.
    pub(crate) fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(speed) = self.speed {
            args.push("--speed".to_string());
            args.push(speed.to_string());
        }
        if let Some(pitch) = self.pitch {
            args.push("--pitch".to_string());
            args.push(pitch.to_string());
        }
        if let Some(emotion) = &self.emotion {
            args.push("--emotion".to_string());
            args.push(emotion.to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingLookup;

    impl EmotionLookup for FailingLookup {
        fn emotions(&self, narrator: &Narrator) -> Result<Vec<Emotion>> {
            Err(Error::UnknownNarrator(narrator.name().to_string()))
        }
    }

    fn narrator() -> Narrator {
        Narrator::new("Japanese Female1")
    }

    fn emotions() -> Vec<Emotion> {
        vec![Emotion::new("happy"), Emotion::new("sad")]
    }

    #[test]
    fn test_speed_bounds() {
        let lookup = emotions();
        for ok in [50, 200] {
            assert!(SayOptions::default().speed(ok).validate(&narrator(), &lookup).is_ok());
        }
        for bad in [49, 201] {
            let err = SayOptions::default()
                .speed(bad)
                .validate(&narrator(), &lookup)
                .unwrap_err();
            assert!(matches!(err, Error::SpeedOutOfRange(v) if v == bad));
        }
    }

    #[test]
    fn test_pitch_bounds() {
        let lookup = emotions();
        for ok in [-300, 300] {
            assert!(SayOptions::default().pitch(ok).validate(&narrator(), &lookup).is_ok());
        }
        for bad in [-301, 301] {
            let err = SayOptions::default()
                .pitch(bad)
                .validate(&narrator(), &lookup)
                .unwrap_err();
            assert!(matches!(err, Error::PitchOutOfRange(v) if v == bad));
        }
    }

    #[test]
    fn test_emotion_present_is_accepted() {
        let opts = SayOptions::default().emotion("happy", 50);
        assert!(opts.validate(&narrator(), &emotions()).is_ok());
    }

    #[test]
    fn test_emotion_absent_is_rejected() {
        let opts = SayOptions::default().emotion("angry", 50);
        let err = opts.validate(&narrator(), &emotions()).unwrap_err();
        match err {
            Error::InvalidEmotion { name, narrator } => {
                assert_eq!(name, "angry");
                assert_eq!(narrator, "Japanese Female1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookup_failure_is_wrapped() {
        let opts = SayOptions::default().emotion("happy", 10);
        let err = opts.validate(&narrator(), &FailingLookup).unwrap_err();
        assert!(matches!(err, Error::EmotionLookup(_)));
    }

    #[test]
    fn test_lookup_skipped_without_emotion() {
        let opts = SayOptions::default().speed(100).pitch(0);
        assert!(opts.validate(&narrator(), &FailingLookup).is_ok());
    }

    #[test]
    fn test_range_checked_before_lookup() {
        let opts = SayOptions::default().speed(10).emotion("happy", 10);
        let err = opts.validate(&narrator(), &FailingLookup).unwrap_err();
        assert!(matches!(err, Error::SpeedOutOfRange(10)));
    }

    #[test]
    fn test_to_args_order() {
        let opts = SayOptions::default().emotion("happy", 30).pitch(-20).speed(120);
        assert_eq!(
            opts.to_args(),
            vec!["--speed", "120", "--pitch", "-20", "--emotion", "happy=30"]
        );
        assert!(SayOptions::default().to_args().is_empty());
    }

    #[test]
    fn test_emotion_setting_parse() {
        assert_eq!(
            "happy=40".parse::<EmotionSetting>().unwrap(),
            EmotionSetting::new("happy", 40)
        );
        assert_eq!(
            " sad = -5 ".parse::<EmotionSetting>().unwrap(),
            EmotionSetting::new("sad", -5)
        );
        for bad in ["happy", "=10", "happy=", "happy=loud"] {
            assert!(matches!(
                bad.parse::<EmotionSetting>(),
                Err(Error::InvalidEmotionSetting(_))
            ));
        }
    }
}
