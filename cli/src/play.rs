use anyhow::{Context, bail};
use minecipher_core::Coord;
use minecipher_protocol::{GameCommand, GameEvent, GameHost};
use rand::Rng;
use std::io::{BufRead, Write};

use crate::render;

/// Round settings used for the first game and for a bare `new`.
#[derive(clap::Args, Clone, Debug, PartialEq, Eq)]
pub struct RoundSettings {
    /// Difficulty preset: Easy, Medium or Hard
    #[arg(short, long, default_value = "Medium")]
    pub difficulty: String,

    /// Cipher hiding the word, see the `ciphers` subcommand
    #[arg(short, long, default_value = "caesar")]
    pub cipher: String,

    /// Cipher key, each cipher has a default
    #[arg(short, long)]
    pub key: Option<String>,
}

impl RoundSettings {
    pub fn command(&self) -> GameCommand {
        GameCommand::New {
            difficulty: self.difficulty.clone(),
            cipher: self.cipher.clone(),
            key: self.key.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(GameCommand),
    Help,
    Quit,
}

pub fn parse_line(line: &str, settings: &RoundSettings) -> anyhow::Result<Input> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Command(GameCommand::Snapshot));
    };

    let input = match verb.to_ascii_lowercase().as_str() {
        "r" | "reveal" => {
            let (row, col) = parse_coords(&mut words)?;
            Input::Command(GameCommand::Reveal { row, col })
        }
        "f" | "flag" => {
            let (row, col) = parse_coords(&mut words)?;
            Input::Command(GameCommand::Flag { row, col })
        }
        "g" | "guess" => Input::Command(GameCommand::Guess {
            text: words.collect::<Vec<_>>().join(" "),
        }),
        "s" | "show" => Input::Command(GameCommand::Snapshot),
        "n" | "new" => {
            let mut settings = settings.clone();
            if let Some(difficulty) = words.next() {
                settings.difficulty = difficulty.into();
            }
            if let Some(cipher) = words.next() {
                settings.cipher = cipher.into();
                settings.key = words.next().map(String::from);
            }
            Input::Command(settings.command())
        }
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => bail!("Unknown command '{other}', type 'help' for the list"),
    };
    Ok(input)
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<(Coord, Coord)> {
    let mut next = |name: &str| -> anyhow::Result<Coord> {
        let word = words.next().with_context(|| format!("Missing {name}"))?;
        word.parse().with_context(|| format!("Invalid {name} '{word}'"))
    };
    let coords = (next("row")?, next("column")?);
    if words.next().is_some() {
        bail!("Expected only a row and a column");
    }
    Ok(coords)
}

/// Interactive text game reading one command per line.
pub fn run_text<R: Rng>(
    host: &mut GameHost<R>,
    settings: &RoundSettings,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    if let GameEvent::Error { message } = host.handle(settings.command()) {
        bail!("Could not start a game: {message}");
    }
    writeln!(output, "{}", render::HELP)?;
    show(host, &mut output)?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };

        match parse_line(&line?, settings) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => writeln!(output, "{}", render::HELP)?,
            Ok(Input::Command(command)) => {
                let event = host.handle(command);
                if let Some(line) = render::event(&event) {
                    writeln!(output, "{line}")?;
                }
                if !matches!(event, GameEvent::Error { .. }) {
                    show(host, &mut output)?;
                }
            }
            Err(err) => writeln!(output, "{err:#}")?,
        }
    }
    Ok(())
}

/// Line protocol: one JSON command in, one JSON event out.
pub fn run_json<R: Rng>(
    host: &mut GameHost<R>,
    settings: &RoundSettings,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let event = host.handle(settings.command());
    writeln!(output, "{}", serde_json::to_string(&event)?)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = match serde_json::from_str::<GameCommand>(&line) {
            Ok(command) => host.handle(command),
            Err(err) => GameEvent::Error {
                message: format!("Invalid command: {err}"),
            },
        };
        writeln!(output, "{}", serde_json::to_string(&event)?)?;
        output.flush()?;
    }
    Ok(())
}

fn show<R: Rng>(host: &GameHost<R>, output: &mut impl Write) -> anyhow::Result<()> {
    if let Some(session) = host.session() {
        writeln!(output, "{}", render::board(&session.snapshot()))?;
    }
    Ok(())
}
