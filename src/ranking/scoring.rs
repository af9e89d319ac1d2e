//! Per-match point formula.
//!
//! ```text
//! points = goals*8 + assists*5 + tackles*1 + saves*2 + mvp_votes*3 - worst_votes*3
//! ```
//!
//! Saves only count for goalkeepers. Goals conceded are tracked for display
//! and never scored.

use serde::{Deserialize, Serialize};

use crate::models::game::MatchEvent;
use crate::models::player::Position;

// Stat points
pub const POINTS_PER_GOAL: i64 = 8;
pub const POINTS_PER_ASSIST: i64 = 5;
pub const POINTS_PER_TACKLE: i64 = 1;
pub const POINTS_PER_SAVE: i64 = 2;   // Goalkeepers only

// Vote points
pub const POINTS_PER_MVP_VOTE: i64 = 3;
pub const POINTS_PER_WORST_VOTE: i64 = -3;

/// Points of one match split into what the player did and how peers voted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointBreakdown {
    pub stat_points: i64,
    pub vote_points: i64,
}

impl PointBreakdown {
    pub fn total(&self) -> i64 {
        self.stat_points + self.vote_points
    }
}

/// Saves that count for this position.
pub fn effective_saves(position: Position, event: &MatchEvent) -> u32 {
    if position.is_goalkeeper() { event.saves } else { 0 }
}

/// Goals conceded that are attributed to this position.
pub fn effective_goals_conceded(position: Position, event: &MatchEvent) -> u32 {
    if position.is_goalkeeper() { event.goals_conceded } else { 0 }
}

pub fn score_breakdown(position: Position, event: &MatchEvent) -> PointBreakdown {
    let stat_points = i64::from(event.goals) * POINTS_PER_GOAL
        + i64::from(event.assists) * POINTS_PER_ASSIST
        + i64::from(event.tackles) * POINTS_PER_TACKLE
        + i64::from(effective_saves(position, event)) * POINTS_PER_SAVE;

    let vote_points = i64::from(event.mvp_votes) * POINTS_PER_MVP_VOTE
        + i64::from(event.worst_votes) * POINTS_PER_WORST_VOTE;

    PointBreakdown { stat_points, vote_points }
}

/// Total points of one finalized match. May be negative.
pub fn score_event(position: Position, event: &MatchEvent) -> i64 {
    score_breakdown(position, event).total()
}
