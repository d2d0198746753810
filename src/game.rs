//! Console play against the minimax computer.
//!
//! The game reads the user's moves as `row col` pairs from any [`BufRead`] and renders
//! the board to any [`Write`], so it runs the same against stdin/stdout and in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use derive_more::{Display, Error, From};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::min_max::{best_move, choose_best_move, score_possible_moves, Player, SearchError};
use crate::ttt::{BoardStatus, GameBoard, Position, PositionError};

/// How the computer picks its move when it starts the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opening {
    /// Any cell, uniformly at random.
    Random,
    /// The minimax choice, which is always `(0, 0)` on an empty board.
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub first: Player,
    pub opening: Opening,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { first: Player::Min, opening: Opening::Random }
    }
}

#[derive(Debug, Display, Error, From)]
pub enum GameError {
    #[display("failed to talk to the console: {_0}")]
    #[from]
    Io(io::Error),
    #[display("input ended before the game was over")]
    InputClosed,
    #[display("search failed: {_0}")]
    #[from]
    Search(SearchError),
}

/// Why a move typed by the user was rejected.
#[derive(Debug, Display, Error, From)]
pub enum MoveError {
    #[display("{token:?} is not a cell coordinate")]
    NotANumber { token: String },
    #[display("{_0}")]
    #[from]
    OutOfRange(PositionError),
    #[display("cell {position} is already taken")]
    Occupied { position: Position },
}

pub struct Game<R, W, G> {
    board: GameBoard,
    config: GameConfig,
    input: R,
    output: W,
    rng: G,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write, G: Rng> Game<R, W, G> {
    pub fn new(config: GameConfig, input: R, output: W, rng: G) -> Self {
        Self {
            board: GameBoard::empty(),
            config,
            input,
            output,
            rng,
            pending: VecDeque::new(),
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    /// Plays one game to the end and returns how it finished.
    pub fn run(&mut self) -> Result<BoardStatus, GameError> {
        info!(first = ?self.config.first, opening = ?self.config.opening, "game started");
        self.display_board()?;
        if self.config.first == Player::Max {
            self.play_opening()?;
        }

        while !self.board.is_terminal() {
            let user_move = self.read_user_move()?;
            self.board.place(user_move, Player::Min);
            self.display_board()?;
            writeln!(self.output)?;
            if self.board.is_terminal() {
                break;
            }
            self.play_computer_move()?;
        }

        let status = self.board.status();
        info!(?status, "game over");
        match status {
            BoardStatus::MaxWon => writeln!(self.output, "Computer wins!")?,
            BoardStatus::MinWon => writeln!(self.output, "You win!")?,
            _ => writeln!(self.output, "Draw!")?,
        }
        Ok(status)
    }

    fn play_opening(&mut self) -> Result<(), GameError> {
        let opening_move = match self.config.opening {
            Opening::Random => *self.board.empty_cells()
                .choose(&mut self.rng)
                .ok_or(SearchError::NoCandidateMoves)?,
            Opening::Search => best_move(&self.board)?.min_max_move,
        };
        debug!(position = %opening_move, "computer opens");
        self.board.place(opening_move, Player::Max);
        self.display_board()
    }

    fn play_computer_move(&mut self) -> Result<(), GameError> {
        let scored_moves = score_possible_moves(&self.board);
        writeln!(self.output, "Evaluating options...")?;
        for scored in &scored_moves {
            writeln!(self.output, "Cell: {} Minimax: {}", scored.min_max_move, scored.score)?;
        }
        let best = choose_best_move(&scored_moves)?.min_max_move;
        self.board.place(best, Player::Max);

        writeln!(self.output)?;
        writeln!(self.output, "Computer's move: {}", best)?;
        self.display_board()?;
        writeln!(self.output)?;
        Ok(())
    }

    fn read_user_move(&mut self) -> Result<Position, GameError> {
        write!(self.output, "User's move: (row col) ")?;
        self.output.flush()?;
        loop {
            let row = self.next_token()?;
            let col = self.next_token()?;
            match self.parse_move(&row, &col) {
                Ok(position) => return Ok(position),
                Err(err) => {
                    debug!(error = %err, "rejected user move");
                    write!(self.output, "Invalid move. Please choose another move: ")?;
                    self.output.flush()?;
                }
            }
        }
    }

    fn parse_move(&self, row: &str, col: &str) -> Result<Position, MoveError> {
        let parse = |token: &str| token.parse::<usize>()
            .map_err(|_| MoveError::NotANumber { token: token.to_string() });
        let position = Position::try_new(parse(row)?, parse(col)?)?;
        if !self.board.is_empty(position) {
            return Err(MoveError::Occupied { position });
        }
        Ok(position)
    }

    fn next_token(&mut self) -> Result<String, GameError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }
            self.pending.extend(line.split_whitespace().map(String::from));
        }
    }

    fn display_board(&mut self) -> Result<(), GameError> {
        writeln!(self.output)?;
        write!(self.output, "{}", self.board)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::game::{Game, GameConfig, GameError, Opening};
    use crate::min_max::Player;
    use crate::ttt::{BoardStatus, CellState, Position};

    /// Every cell in row-major order: the user always takes the first free one.
    const FIRST_FREE_CELL: &str = "0 0\n0 1\n0 2\n1 0\n1 1\n1 2\n2 0\n2 1\n2 2\n";

    fn play(config: GameConfig, input: &str, seed: u64) -> (Result<BoardStatus, GameError>, crate::ttt::GameBoard, String) {
        let mut output = Vec::new();
        let (result, board) = {
            let mut game = Game::new(config, input.as_bytes(), &mut output, StdRng::seed_from_u64(seed));
            let result = game.run();
            (result, *game.board())
        };
        (result, board, String::from_utf8(output).unwrap())
    }

    #[test]
    fn computer_never_loses() {
        let configs = [
            GameConfig { first: Player::Min, opening: Opening::Random },
            GameConfig { first: Player::Max, opening: Opening::Search },
            GameConfig { first: Player::Max, opening: Opening::Random },
        ];
        for config in configs {
            for seed in 0..3 {
                let (result, board, output) = play(config, FIRST_FREE_CELL, seed);
                let status = result.unwrap();
                assert_ne!(status, BoardStatus::MinWon, "{:?} seed {}\n{}", config, seed, output);
                assert_eq!(board.status(), status);
                assert!(output.contains("Evaluating options..."));
                assert!(output.ends_with("Computer wins!\n") || output.ends_with("Draw!\n"));
            }
        }
    }

    #[test]
    fn invalid_moves_are_retried() {
        let (result, board, output) = play(GameConfig::default(), "9 9\nfoo bar\n0 0\n", 0);
        assert!(matches!(result, Err(GameError::InputClosed)));
        assert_eq!(output.matches("Invalid move. Please choose another move: ").count(), 2);
        assert_eq!(board.cell(Position::new(0, 0)), CellState::O);
        // centre is the only reply to a corner opening that does not lose
        assert!(output.contains("Cell: (0, 1) Minimax: -1"));
        assert!(output.contains("Cell: (1, 1) Minimax: 0"));
        assert!(output.contains("Computer's move: (1, 1)"));
        assert_eq!(board.cell(Position::new(1, 1)), CellState::X);
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let (result, board, output) = play(GameConfig::default(), "0 0\n0 0\n1 1\n", 0);
        assert!(matches!(result, Err(GameError::InputClosed)));
        // the second "0 0" is taken; "1 1" was taken by the computer as well
        assert_eq!(output.matches("Invalid move").count(), 2);
        assert_eq!(board.empty_cells().len(), 7);
    }

    #[test]
    fn search_opening_takes_first_corner() {
        let config = GameConfig { first: Player::Max, opening: Opening::Search };
        let (result, board, _) = play(config, "", 0);
        assert!(matches!(result, Err(GameError::InputClosed)));
        assert_eq!(board.cell(Position::new(0, 0)), CellState::X);
        assert_eq!(board.empty_cells().len(), 8);
    }

    #[test]
    fn random_opening_is_seeded() {
        let config = GameConfig { first: Player::Max, opening: Opening::Random };
        let (_, first, _) = play(config, "", 42);
        let (_, second, _) = play(config, "", 42);
        assert_eq!(first, second);
        assert_eq!(first.empty_cells().len(), 8);
    }

    #[test]
    fn user_first_waits_for_input() {
        let (result, board, output) = play(GameConfig::default(), "", 0);
        assert!(matches!(result, Err(GameError::InputClosed)));
        assert_eq!(board, crate::ttt::GameBoard::empty());
        assert!(output.ends_with("User's move: (row col) "));
    }
}
