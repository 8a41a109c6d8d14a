use chat_sanitizer::config::Config;
use chat_sanitizer::helper::{media_helpers, sanitization_helpers, youtube_helpers};
use chat_sanitizer::models::EnvelopeDefaults;
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "sanitize_cli", author, version, about = "Sanitizes chat messages from the command line.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional .env file providing DEFAULT_SENDER_NAME / DEFAULT_SENDER_COLOR / LOG_LEVEL.
    #[arg(long, global = true, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the HTML fragment for a raw message.
    Message { text: Option<String> },
    /// Sanitize a JSON envelope ({"message", "name", "color"}) and print it as JSON.
    Envelope { json: Option<String> },
    /// Print the media kind of a URL, or "unsafe".
    Classify { url: String },
    /// Print the YouTube video id encoded in a URL.
    YoutubeId { url: String },
}

/// Uses the positional argument when given, otherwise all of stdin.
fn input_or_stdin(arg: &Option<String>) -> io::Result<String> {
    match arg {
        Some(text) => Ok(text.clone()),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Runs one subcommand and returns the line to print, or the error to report.
fn run_command(command: &Commands, defaults: &EnvelopeDefaults) -> Result<String, String> {
    match command {
        Commands::Message { text } => input_or_stdin(text)
            .map(|raw| sanitization_helpers::sanitize_message(&raw))
            .map_err(|e| format!("Error reading stdin: {}", e)),
        Commands::Envelope { json } => input_or_stdin(json)
            .map(|raw| sanitization_helpers::sanitize_envelope_json_with(&raw, defaults))
            .map_err(|e| format!("Error reading stdin: {}", e)),
        Commands::Classify { url } => media_helpers::classify_media(url.trim())
            .map(|kind| kind.to_string())
            .ok_or_else(|| format!("'{}' is not a safe http(s) URL.", url)),
        Commands::YoutubeId { url } => youtube_helpers::extract_youtube_id(url.trim())
            .ok_or_else(|| format!("No YouTube video id found in '{}'.", url)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (defaults, log_level) = match &cli.env_file {
        Some(path) => match Config::from_env(path) {
            Ok(config) => (config.envelope_defaults(), config.log_level),
            Err(e) => {
                eprintln!("❌ Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => (EnvelopeDefaults::default(), "warn".to_string()),
    };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(log_level));

    match run_command(&cli.command, &defaults) {
        Ok(output) => println!("{}", output),
        Err(message) => {
            eprintln!("❌ {}", message);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
