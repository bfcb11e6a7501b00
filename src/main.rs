//! voicepeak-rs: command-line front end for the VOICEPEAK engine.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use voicepeak_rs::{Client, Config, EmotionSetting, Error, Narrator, SayOptions};

#[derive(Parser, Debug)]
#[command(name = "voicepeak-rs", about = "Text-to-speech with VOICEPEAK")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// VOICEPEAK executable (overrides config and VOICEPEAK_PATH)
    #[arg(short, long)]
    executable: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List available narrators
    Narrators {
        /// Print a JSON array instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// List emotions for a narrator
    Emotions {
        narrator: String,
        #[arg(long)]
        json: bool,
    },
    /// Synthesize text to an audio file
    Say {
        text: String,
        #[arg(short, long)]
        output: PathBuf,
        /// Narrator name (defaults to config defaults.narrator)
        #[arg(short, long)]
        narrator: Option<String>,
        /// 50-200
        #[arg(long, allow_hyphen_values = true)]
        speed: Option<i32>,
        /// -300-300
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<i32>,
        /// name=value
        #[arg(long)]
        emotion: Option<String>,
    },
    /// Show the engine's own --help
    EngineHelp,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> voicepeak_rs::Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let client = match args.executable {
        Some(path) => Client::with_executable(path),
        None => Client::from_config(&config)?,
    };
    debug!("Engine: {}", client.executable().display());

    match args.command {
        Cmd::Narrators { json } => {
            let narrators = client.list_narrators()?;
            print_names(&narrators, json);
        }
        Cmd::Emotions { narrator, json } => {
            let narrator = find_narrator(&client, &narrator)?;
            let emotions = client.list_emotions(&narrator)?;
            print_names(&emotions, json);
        }
        Cmd::Say {
            text,
            output,
            narrator,
            speed,
            pitch,
            emotion,
        } => {
            let name = narrator
                .or_else(|| config.defaults.narrator.clone())
                .ok_or(Error::NoNarrator)?;
            let narrator = find_narrator(&client, &name)?;
            let options = SayOptions {
                speed: speed.or(config.defaults.speed),
                pitch: pitch.or(config.defaults.pitch),
                emotion: emotion
                    .as_deref()
                    .map(str::parse::<EmotionSetting>)
                    .transpose()?,
            };
            client.say(&text, &output, &narrator, Some(&options))?;
            info!("Wrote {}", output.display());
        }
        Cmd::EngineHelp => client.help()?,
    }
    Ok(())
}

fn find_narrator(client: &Client, name: &str) -> voicepeak_rs::Result<Narrator> {
    client
        .list_narrators()?
        .into_iter()
        .find(|n| n.name() == name)
        .ok_or_else(|| Error::UnknownNarrator(name.to_string()))
}

fn print_names<T: std::fmt::Display + serde::Serialize>(items: &[T], json: bool) {
    if json {
        match serde_json::to_string_pretty(items) {
            Ok(s) => println!("{s}"),
            Err(e) => error!("Failed to encode JSON: {e}"),
        }
        return;
    }
    for item in items {
        println!("{item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_say_args() {
        let args = Args::try_parse_from([
            "voicepeak-rs",
            "say",
            "hello",
            "-o",
            "out.wav",
            "--pitch",
            "-120",
            "--emotion",
            "happy=30",
        ])
        .unwrap();
        match args.command {
            Cmd::Say {
                text,
                output,
                narrator,
                speed,
                pitch,
                emotion,
            } => {
                assert_eq!(text, "hello");
                assert_eq!(output, PathBuf::from("out.wav"));
                assert!(narrator.is_none());
                assert!(speed.is_none());
                assert_eq!(pitch, Some(-120));
                assert_eq!(emotion.as_deref(), Some("happy=30"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let args = Args::try_parse_from([
            "voicepeak-rs",
            "-v",
            "-e",
            "/opt/voicepeak",
            "emotions",
            "Japanese Female1",
            "--json",
        ])
        .unwrap();
        assert!(args.verbose);
        assert_eq!(args.executable, Some(PathBuf::from("/opt/voicepeak")));
        assert!(matches!(
            args.command,
            Cmd::Emotions { ref narrator, json: true } if narrator == "Japanese Female1"
        ));
    }

    #[test]
    fn test_say_requires_output() {
        assert!(Args::try_parse_from(["voicepeak-rs", "say", "hello"]).is_err());
    }
}
