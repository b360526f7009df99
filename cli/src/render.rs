use minecipher_core::{CellView, CipherKind, GuessOutcome, SessionSnapshot};
use minecipher_protocol::{GameEvent, MineCipherInfo};

pub const HELP: &str = "\
Commands:
  r ROW COL            reveal a tile
  f ROW COL            toggle a flag
  g WORD               guess the hidden word
  s                    show the board again
  new [DIFF] [CIPHER] [KEY]
                       start another round
  help                 show this help
  quit                 leave the game";

pub fn cell_glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
    }
}

/// Text board with row and column numbers, followed by the collected letters
/// and the status line.
pub fn board(snapshot: &SessionSnapshot) -> String {
    let difficulty = snapshot.difficulty.map(|d| d.name()).unwrap_or("Custom");
    let mut out = format!(
        "{difficulty} | {} | guesses {}/{} | mines left {}\n",
        snapshot.cipher.display_name(),
        snapshot.remaining_guesses,
        snapshot.max_guesses,
        snapshot.mines_left,
    );

    out.push_str("   ");
    out.extend((0..snapshot.size.1).map(|col| format!("{col:>3}")));
    out.push('\n');
    for (row, cells) in snapshot.cells.rows().into_iter().enumerate() {
        out.push_str(&format!("{row:>3}"));
        out.extend(cells.iter().map(|&cell| format!("{:>3}", cell_glyph(cell))));
        out.push('\n');
    }

    let letters: Vec<String> = snapshot
        .revealed_letters
        .iter()
        .map(|letter| letter.map_or_else(|| "_".into(), String::from))
        .collect();
    out.push_str(&format!("Letters: {}\n", letters.join(" ")));
    out.push_str(&snapshot.message);
    if let Some(word) = &snapshot.target_word {
        out.push_str(&format!("\nThe word was {word}."));
    }
    out
}

/// One line summarizing what a command did, if there is anything to say
/// beyond the board itself.
pub fn event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::Started { snapshot } => Some(format!(
            "New round: {}",
            snapshot.cipher_example
        )),
        GameEvent::Revealed { report, message } if !report.disclosed.is_empty() => {
            let found: Vec<String> = report
                .disclosed
                .iter()
                .map(|letter| format!("{} (#{})", letter.letter, letter.index + 1))
                .collect();
            Some(format!("Found {}. {message}", found.join(", ")))
        }
        GameEvent::Revealed { .. } => None,
        GameEvent::Flagged { row, col, flagged } => Some(if *flagged {
            format!("Flag placed at {row} {col}.")
        } else {
            format!("Flag removed at {row} {col}.")
        }),
        GameEvent::Guessed { report, .. } if report.outcome == GuessOutcome::Ignored => {
            Some("Empty guess ignored.".into())
        }
        GameEvent::Guessed { message, .. } => Some(message.clone()),
        GameEvent::Snapshot { .. } => None,
        GameEvent::Error { message } => Some(format!("Error: {message}")),
    }
}

pub fn ciphers() -> String {
    CipherKind::ALL
        .iter()
        .map(|kind| {
            let key = match kind.default_key() {
                Some(key) => format!("key required, game default {key}"),
                None if kind.requires_key() => "key required".into(),
                None => "no key".into(),
            };
            format!("{:<12} {:<20} {key}\n", kind.id(), kind.display_name())
        })
        .collect()
}

pub fn info(info: &MineCipherInfo) -> String {
    let mut out = format!(
        "{}\n\nHow to play: {}\nTo win: {}\nYou lose if: {}\nFinal-word guesses: {}\n\n",
        info.overview, info.info_cards.how, info.info_cards.win, info.info_cards.lose, info.max_guesses
    );

    out.push_str("Difficulties:\n");
    out.extend(info.difficulties.iter().map(|difficulty| {
        format!(
            "  {:<8} {}x{} board, {} letter word\n",
            difficulty.name, difficulty.rows, difficulty.cols, difficulty.word_length
        )
    }));
    out.push_str("\nCiphers:\n");
    out.extend(
        info.ciphers
            .iter()
            .map(|cipher| format!("  {:<12} {}\n", cipher.id, cipher.example)),
    );
    out
}
