//! voicepeak-rs: drive the VOICEPEAK text-to-speech engine from Rust.
//!
//! The engine is an external executable. [`Client`] runs it once per call to
//! list narrators and emotions, synthesize speech to a file, or print its
//! usage.

pub mod client;
pub mod config;
pub mod error;
pub mod narrator;
pub mod options;

pub use client::{say_args, Client};
pub use config::Config;
pub use error::{Error, Result};
pub use narrator::{Emotion, Narrator};
pub use options::{EmotionLookup, EmotionSetting, SayOptions};
