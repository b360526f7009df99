use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Wrong final-word guesses allowed before the board explodes.
pub const MAX_GUESSES: u8 = 5;

/// Boards generated before giving up on fitting the word in the safe cells.
pub const MAX_BOARD_ATTEMPTS: usize = 16;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Latest status line for the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    #[default]
    CollectLetters,
    BoardCleared,
    IncorrectGuess { remaining: u8 },
    HitMine,
    OutOfGuesses,
    Solved,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Status::*;
        match self {
            CollectLetters => f.write_str("Reveal safe tiles to collect cipher letters."),
            BoardCleared => {
                f.write_str("All safe tiles revealed. Submit the final word to win the round.")
            }
            IncorrectGuess { remaining } => {
                write!(f, "Incorrect guess. {remaining} tries remaining.")
            }
            HitMine => f.write_str("You hit a mine! Game over."),
            OutOfGuesses => f.write_str("Out of guesses! The board has been revealed."),
            Solved => f.write_str("Correct! You solved the cipher."),
        }
    }
}

/// Everything needed to set up a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub cipher: Cipher,
    pub mine_probability: f64,
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty, cipher: Cipher) -> Self {
        Self {
            difficulty,
            cipher,
            mine_probability: RandomBoardGenerator::DEFAULT_MINE_PROBABILITY,
        }
    }

    /// Resolves the names a host receives, falling back to the default key
    /// of the cipher when none is given.
    pub fn parse(difficulty: &str, cipher_id: &str, key: Option<&str>) -> Result<Self> {
        let difficulty = difficulty.parse()?;
        let kind: CipherKind = cipher_id.parse()?;
        if !kind.is_game_cipher() {
            return Err(GameError::NotAGameCipher);
        }
        Ok(Self::new(difficulty, Cipher::with_default_key(kind, key)?))
    }
}

/// Letter shown to the player the first time its cell is revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosedLetter {
    pub index: usize,
    pub letter: char,
    pub position: Coord2,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub revealed: Vec<Coord2>,
    pub disclosed: Vec<DisclosedLetter>,
    pub state: SessionState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReport {
    pub flagged: bool,
    pub changed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// Blank guess, nothing was spent.
    Ignored,
    Correct,
    Incorrect,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessReport {
    pub outcome: GuessOutcome,
    pub state: SessionState,
    pub remaining_guesses: u8,
}

/// What the player sees of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    Exploded,
}

/// Render-ready copy of the whole session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub difficulty: Option<Difficulty>,
    pub cipher: CipherKind,
    pub cipher_example: String,
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub revealed_letters: Vec<Option<char>>,
    pub remaining_guesses: u8,
    pub max_guesses: u8,
    pub mines_left: isize,
    pub state: SessionState,
    pub board_cleared: bool,
    pub status: Status,
    pub message: String,
    /// Only disclosed once the session is over.
    pub target_word: Option<String>,
}

/// One round of the game: a board, a hidden cipher word and the guesses left.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    difficulty: Option<Difficulty>,
    cipher: Cipher,
    board: Board,
    target_word: String,
    binding: CipherBinding,
    revealed_letters: Vec<Option<char>>,
    disclosed: BTreeSet<Coord2>,
    remaining_guesses: u8,
    state: SessionState,
    board_cleared: bool,
    triggered_mine: Option<Coord2>,
    status: Status,
}

impl GameSession {
    /// Picks a word, generates a board and hides the encoded word in it.
    ///
    /// Boards with fewer safe cells than letters are thrown away and
    /// generated again, up to [`MAX_BOARD_ATTEMPTS`] times.
    pub fn setup<R: Rng + ?Sized>(
        config: &SessionConfig,
        words: &WordBank,
        rng: &mut R,
    ) -> Result<Self> {
        let profile = config.difficulty.profile();
        let generator = RandomBoardGenerator::new(config.mine_probability);
        let target_word = String::from(words.choose(profile.word_length, rng)?);

        let mut last_error = GameError::InvalidBoardShape;
        for attempt in 1..=MAX_BOARD_ATTEMPTS {
            let board = generator.generate(profile.size, rng)?;
            match Self::with_board(board, &target_word, config.cipher.clone(), rng) {
                Ok(mut session) => {
                    session.difficulty = Some(config.difficulty);
                    log::debug!(
                        "new {} session with {} cipher after {} board(s)",
                        profile.name,
                        config.cipher.kind(),
                        attempt
                    );
                    return Ok(session);
                }
                Err(err @ GameError::InsufficientSafeCells { .. }) => {
                    log::warn!("Board attempt {attempt} rejected: {err}");
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }

    /// Starts a session on a prepared board. The word is trimmed and upper-cased.
    pub fn with_board<R: Rng + ?Sized>(
        board: Board,
        target_word: &str,
        cipher: Cipher,
        rng: &mut R,
    ) -> Result<Self> {
        let target_word = target_word.trim().to_ascii_uppercase();
        let binding = CipherBinding::bind(&board, &target_word, &cipher, rng)?;

        Ok(Self {
            difficulty: None,
            cipher,
            revealed_letters: vec![None; target_word.len()],
            board,
            target_word,
            binding,
            disclosed: BTreeSet::new(),
            remaining_guesses: MAX_GUESSES,
            state: SessionState::Playing,
            board_cleared: false,
            triggered_mine: None,
            status: Status::CollectLetters,
        })
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn binding(&self) -> &CipherBinding {
        &self.binding
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    /// Encoded letters in word order, `None` until their cell is revealed.
    pub fn revealed_letters(&self) -> &[Option<char>] {
        &self.revealed_letters
    }

    pub fn remaining_guesses(&self) -> u8 {
        self.remaining_guesses
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// All safe cells are open. The word still has to be guessed to win.
    pub fn board_cleared(&self) -> bool {
        self.board_cleared
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealReport> {
        self.check_playing()?;

        let mut report = RevealReport::default();
        match self.board.reveal(coords)? {
            RevealOutcome::NoChange => {}
            RevealOutcome::HitMine(mine) => {
                self.triggered_mine = Some(mine);
                self.end_game(false, Status::HitMine);
            }
            RevealOutcome::Revealed(opened) => {
                report.disclosed = opened.iter().filter_map(|&pos| self.disclose(pos)).collect();
                report.revealed = opened;
                if !self.board_cleared && self.board.is_cleared() {
                    log::debug!("board cleared");
                    self.board_cleared = true;
                    self.status = Status::BoardCleared;
                }
            }
        }
        report.state = self.state;
        Ok(report)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        self.check_playing()?;

        let outcome = self.board.toggle_flag(coords)?;
        Ok(FlagReport {
            flagged: self.board[coords].is_flagged(),
            changed: outcome.has_update(),
        })
    }

    /// Compares a guess against the target word, ignoring case and surrounding
    /// whitespace. A blank guess costs nothing.
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessReport> {
        self.check_playing()?;

        let guess = guess.trim().to_ascii_uppercase();
        let outcome = if guess.is_empty() {
            GuessOutcome::Ignored
        } else if guess == self.target_word {
            self.end_game(true, Status::Solved);
            GuessOutcome::Correct
        } else {
            self.remaining_guesses = self.remaining_guesses.saturating_sub(1);
            if self.remaining_guesses == 0 {
                self.end_game(false, Status::OutOfGuesses);
            } else {
                self.status = Status::IncorrectGuess {
                    remaining: self.remaining_guesses,
                };
            }
            GuessOutcome::Incorrect
        };

        Ok(GuessReport {
            outcome,
            state: self.state,
            remaining_guesses: self.remaining_guesses,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let cells = Array2::from_shape_fn(self.board.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            self.cell_view(coords)
        });

        SessionSnapshot {
            difficulty: self.difficulty,
            cipher: self.cipher.kind(),
            cipher_example: self.cipher.kind().example().into(),
            size: self.board.size(),
            cells,
            revealed_letters: self.revealed_letters.clone(),
            remaining_guesses: self.remaining_guesses,
            max_guesses: MAX_GUESSES,
            mines_left: self.board.mines_left(),
            state: self.state,
            board_cleared: self.board_cleared,
            status: self.status,
            message: self.status.to_string(),
            target_word: self.is_finished().then(|| self.target_word.clone()),
        }
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        let cell = self.board[coords];
        match cell.state {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed if self.triggered_mine == Some(coords) => CellView::Exploded,
            CellState::Revealed => match cell.adjacent_mines() {
                Some(count) => CellView::Revealed(count),
                None => CellView::Mine,
            },
        }
    }

    /// Records the letter under `coords` the first time it is revealed.
    fn disclose(&mut self, coords: Coord2) -> Option<DisclosedLetter> {
        let bound = *self.binding.at(coords)?;
        let slot = self.revealed_letters.get_mut(bound.index)?;
        if !self.disclosed.insert(coords) {
            return None;
        }
        *slot = Some(bound.encoded);
        log::debug!("disclosed letter {} at {:?}", bound.index, coords);
        Some(DisclosedLetter {
            index: bound.index,
            letter: bound.encoded,
            position: coords,
        })
    }

    fn end_game(&mut self, won: bool, status: Status) {
        if self.state.is_finished() {
            return;
        }

        self.status = status;
        if won {
            self.state = SessionState::Won;
        } else {
            self.state = SessionState::Lost;
            self.board.reveal_mines();
        }
        log::debug!("session ended: {:?}", self.state);
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
