//! Command-line interface for the console game.

use clap::{Parser, ValueEnum};

use ttt_minimax::game::{GameConfig, Opening};
use ttt_minimax::min_max::Player;

/// Play tic-tac-toe against a computer that searches the whole game tree
#[derive(Parser, Debug)]
#[command(name = "ttt-minimax")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Who makes the first move
    #[arg(long, value_enum, default_value_t = FirstMover::User)]
    pub first: FirstMover,

    /// How the computer picks its first move when it starts
    #[arg(long, value_enum, default_value_t = OpeningArg::Random)]
    pub opening: OpeningArg,

    /// Seed for the random opening, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log search details to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstMover {
    User,
    Computer,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpeningArg {
    Random,
    Search,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            first: match self.first {
                FirstMover::User => Player::Min,
                FirstMover::Computer => Player::Max,
            },
            opening: match self.opening {
                OpeningArg::Random => Opening::Random,
                OpeningArg::Search => Opening::Search,
            },
        }
    }
}
