pub mod stats;

use std::ops::Not;

use derive_more::{Display, Error};
use strum_macros::EnumIter;
use tracing::{debug, info, instrument};

use crate::min_max::stats::{NullStats, Stats};
use crate::ttt::{BoardStatus, GameBoard, Position};

pub const MAX_WON: i32 = 1;
pub const DRAW: i32 = 0;
pub const MIN_WON: i32 = -1;

#[derive(Eq, PartialEq, Hash)]
#[derive(Debug, Copy, Clone, EnumIter)]
pub enum Player {
    Min,
    Max,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::Min => Player::Max,
            Player::Max => Player::Min,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct ScoredMove {
    pub score: i32,
    pub min_max_move: Position,
}

impl ScoredMove {
    pub fn new(score: i32, min_max_move: Position) -> ScoredMove {
        ScoredMove { score, min_max_move }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    #[display("no candidate moves to choose from, the position is already decided")]
    NoCandidateMoves,
}

/// Value of `state` under optimal play with `player` to move, from Max's point of view.
pub fn evaluate(state: &GameBoard, player: Player) -> i32 {
    evaluate_with_stats(state, player, &mut NullStats)
}

pub fn evaluate_with_stats<ST: Stats>(state: &GameBoard, player: Player, stats: &mut ST) -> i32 {
    min_max_eval(state, player, 0, stats)
}

/// Scores every move Max can make from `state`, in row-major order.
/// A decided position has no moves to score.
pub fn score_possible_moves(state: &GameBoard) -> Vec<ScoredMove> {
    score_possible_moves_with_stats(state, &mut NullStats)
}

#[instrument(level = "debug", skip_all)]
pub fn score_possible_moves_with_stats<ST: Stats>(state: &GameBoard, stats: &mut ST) -> Vec<ScoredMove> {
    if state.is_terminal() {
        return Vec::new();
    }
    stats.record_state_expanded(0);
    state.empty_cells().into_iter().map(|pos| {
        let next_state = state.with_move(pos, Player::Max);
        let score = min_max_eval(&next_state, Player::Min, 1, stats);
        debug!(position = %pos, score, "scored root move");
        ScoredMove::new(score, pos)
    }).collect()
}

/// Keeps the first move whose score beats everything before it, so the earliest
/// of several equally good moves wins.
pub fn choose_best_move(scored_moves: &[ScoredMove]) -> Result<&ScoredMove, SearchError> {
    scored_moves.iter()
        .fold(None, |best: Option<&ScoredMove>, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })
        .ok_or(SearchError::NoCandidateMoves)
}

pub fn best_move(state: &GameBoard) -> Result<ScoredMove, SearchError> {
    let scored_moves = score_possible_moves(state);
    let best = *choose_best_move(&scored_moves)?;
    info!(position = %best.min_max_move, score = best.score, "chose move");
    Ok(best)
}

fn terminal_score(state: &GameBoard) -> Option<i32> {
    match state.status() {
        BoardStatus::MaxWon => Some(MAX_WON),
        BoardStatus::MinWon => Some(MIN_WON),
        BoardStatus::Draw => Some(DRAW),
        BoardStatus::Ongoing => None,
    }
}

fn min_max_eval<ST: Stats>(state: &GameBoard, player: Player, depth: usize, stats: &mut ST) -> i32 {
    if let Some(score) = terminal_score(state) {
        stats.record_state_scored(depth);
        return score;
    }
    stats.record_state_expanded(depth);

    // an ongoing state has at least one child, so the fold seeds never leak out
    let scores = state.empty_cells().into_iter().map(|pos| {
        let next_state = state.with_move(pos, player);
        min_max_eval(&next_state, !player, depth + 1, stats)
    });
    match player {
        Player::Max => scores.fold(MIN_WON, i32::max),
        Player::Min => scores.fold(MAX_WON, i32::min),
    }
}
