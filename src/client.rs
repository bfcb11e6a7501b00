//! VOICEPEAK engine client.
//!
//! Every operation spawns the engine once, blocks until it exits and
//! reports a non-zero exit as an error. Nothing is cached between calls.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, info};

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::narrator::{parse_listing, Emotion, Narrator};
use crate::options::{EmotionLookup, SayOptions};

#[derive(Debug, Clone)]
pub struct Client {
    executable: PathBuf,
}

impl Client {
    /// Client for the engine's default install location on this platform.
    ///
    /// Fails with [`Error::UnsupportedPlatform`] where there is none.
    pub fn new() -> Result<Self> {
        config::default_executable(std::env::consts::OS).map(Self::with_executable)
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Client using `VOICEPEAK_PATH`, then `config.executable`, then the
    /// platform default.
    pub fn from_config(config: &Config) -> Result<Self> {
        let env_override = std::env::var_os(config::EXECUTABLE_ENV).map(PathBuf::from);
        let executable =
            config::resolve_executable(env_override, config, std::env::consts::OS)?;
        info!("Using VOICEPEAK at {}", executable.display());
        Ok(Self::with_executable(executable))
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn list_narrators(&self) -> Result<Vec<Narrator>> {
        let stdout = self.capture(&["--list-narrator"])?;
        let narrators: Vec<Narrator> = parse_listing(&stdout)
            .into_iter()
            .map(Narrator::new)
            .collect();
        debug!("Listed {} narrators", narrators.len());
        Ok(narrators)
    }

    pub fn list_emotions(&self, narrator: &Narrator) -> Result<Vec<Emotion>> {
        let stdout = self.capture(&["--list-emotion", narrator.name()])?;
        let emotions: Vec<Emotion> = parse_listing(&stdout)
            .into_iter()
            .map(Emotion::new)
            .collect();
        debug!("Listed {} emotions for {narrator}", emotions.len());
        Ok(emotions)
    }

    /// Synthesize `text` into `out_path`.
    ///
    /// An emotion in `options` is checked with a live `--list-emotion` call.
    pub fn say(
        &self,
        text: &str,
        out_path: &Path,
        narrator: &Narrator,
        options: Option<&SayOptions>,
    ) -> Result<()> {
        self.say_with_lookup(text, out_path, narrator, options, self)
    }

    /// Like [`Client::say`], with emotions checked against `lookup`.
    pub fn say_with_lookup(
        &self,
        text: &str,
        out_path: &Path,
        narrator: &Narrator,
        options: Option<&SayOptions>,
        lookup: &dyn EmotionLookup,
    ) -> Result<()> {
        if let Some(options) = options {
            options.validate(narrator, lookup)?;
        }
        let args = say_args(text, out_path, narrator, options);
        self.run(&args, Stdio::null())?;
        info!("Synthesized {} chars to {}", text.chars().count(), out_path.display());
        Ok(())
    }

    /// Print the engine's own usage to this process's stdout/stderr.
    pub fn help(&self) -> Result<()> {
        self.run(&["--help"], Stdio::inherit())
    }

    fn capture<S: AsRef<std::ffi::OsStr>>(&self, args: &[S]) -> Result<String> {
        let output = self.command(args).stdin(Stdio::null()).output().map_err(|source| {
            Error::Spawn {
                program: self.executable.clone(),
                source,
            }
        })?;
        self.check(&output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run<S: AsRef<std::ffi::OsStr>>(&self, args: &[S], stdout: Stdio) -> Result<()> {
        let status = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                program: self.executable.clone(),
                source,
            })?;
        if !status.success() {
            return Err(Error::Failed {
                program: self.executable.clone(),
                status,
                stderr: String::new(),
            });
        }
        Ok(())
    }

    fn command<S: AsRef<std::ffi::OsStr>>(&self, args: &[S]) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(args);
        debug!(
            "Running {} {:?}",
            self.executable.display(),
            args.iter().map(|a| a.as_ref()).collect::<Vec<_>>()
        );
        cmd
    }

    fn check(&self, output: &Output) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }
        Err(Error::Failed {
            program: self.executable.clone(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl EmotionLookup for Client {
    fn emotions(&self, narrator: &Narrator) -> Result<Vec<Emotion>> {
        self.list_emotions(narrator)
    }
}

/// Engine arguments for one `--say` invocation. Options are not validated here.
pub fn say_args(
    text: &str,
    out_path: &Path,
    narrator: &Narrator,
    options: Option<&SayOptions>,
) -> Vec<std::ffi::OsString> {
    let mut args: Vec<std::ffi::OsString> = vec![
        "--say".into(),
        text.into(),
        "-o".into(),
        out_path.into(),
        "--narrator".into(),
        narrator.name().into(),
    ];
    if let Some(options) = options {
        args.extend(options.to_args().into_iter().map(Into::into));
    }
    args
}
