use anyhow::Context;
use clap::{Parser, Subcommand};
use minecipher_protocol::{CipherRequest, GameHost, Operation, cipher_types, minecipher_info};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::{self, Read};
use tracing_subscriber::filter::LevelFilter;

mod play;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode text with a cipher
    Encode(CipherArgs),
    /// Decode text with a cipher
    Decode(CipherArgs),
    /// List the supported cipher types
    Ciphers,
    /// Show the rules, difficulty presets and game ciphers
    Info,
    /// Play a round in the terminal
    Play(PlayArgs),
}

#[derive(clap::Args, Debug)]
struct CipherArgs {
    /// Cipher id, e.g. caesar or rail_fence
    #[arg(short, long)]
    cipher: String,

    /// Key for ciphers that need one
    #[arg(short, long)]
    key: Option<String>,

    /// Text to transform, read from stdin when missing
    text: Option<String>,
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    round: play::RoundSettings,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn level_filter(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

fn transform(args: CipherArgs, operation: Operation, json: bool) -> anyhow::Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Could not read text from stdin")?;
            text.trim_end_matches(['\r', '\n']).into()
        }
    };

    let request = CipherRequest::new(text, args.cipher, args.key);
    let response = request
        .apply(operation)
        .with_context(|| format!("Could not {operation} with {}", request.cipher_type))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.result);
    }
    Ok(())
}

fn play(args: PlayArgs, json: bool) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let mut host = GameHost::new(SmallRng::seed_from_u64(seed));
    let input = io::stdin().lock();
    let output = io::stdout().lock();
    if json {
        play::run_json(&mut host, &args.round, input, output)
    } else {
        play::run_text(&mut host, &args.round, input, output)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_filter(args.verbose.log_level_filter()))
        .with_writer(io::stderr)
        .init();
    log::debug!("{args:?}");

    match args.command {
        Command::Encode(cipher) => transform(cipher, Operation::Encode, args.json),
        Command::Decode(cipher) => transform(cipher, Operation::Decode, args.json),
        Command::Ciphers if args.json => {
            println!("{}", serde_json::to_string_pretty(&cipher_types())?);
            Ok(())
        }
        Command::Ciphers => {
            print!("{}", render::ciphers());
            Ok(())
        }
        Command::Info if args.json => {
            println!("{}", serde_json::to_string_pretty(&minecipher_info())?);
            Ok(())
        }
        Command::Info => {
            print!("{}", render::info(&minecipher_info()));
            Ok(())
        }
        Command::Play(play) => self::play(play, args.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_play_flags() {
        let args = Args::parse_from([
            "minecipher", "play", "-d", "hard", "-c", "vigenere", "-k", "CODE", "--seed", "7", "--json",
        ]);

        assert!(args.json);
        let Command::Play(play) = args.command else {
            panic!("expected play");
        };
        assert_eq!(play.seed, Some(7));
        assert_eq!(play.round.difficulty, "hard");
        assert_eq!(play.round.key.as_deref(), Some("CODE"));
    }

    #[test]
    fn play_defaults_to_medium_caesar() {
        let args = Args::parse_from(["minecipher", "play"]);

        let Command::Play(play) = args.command else {
            panic!("expected play");
        };
        assert_eq!(play.round.difficulty, "Medium");
        assert_eq!(play.round.cipher, "caesar");
        assert_eq!(play.seed, None);
    }

    #[test]
    fn maps_verbosity_levels() {
        assert_eq!(level_filter(log::LevelFilter::Off), LevelFilter::OFF);
        assert_eq!(level_filter(log::LevelFilter::Debug), LevelFilter::DEBUG);
    }
}
