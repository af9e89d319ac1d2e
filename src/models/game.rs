use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Voting,
    Finalized,
}

/// A single match ("partida") of a pelada.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub pelada_id: Uuid,
    pub match_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: MatchStatus,
}

impl Match {
    pub fn new(id: Uuid, pelada_id: Uuid, match_date: NaiveDate, status: MatchStatus) -> Self {
        Self {
            id,
            pelada_id,
            match_date,
            start_time: None,
            end_time: None,
            status,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status == MatchStatus::Finalized
    }
}

/// What one player did in one match, including the peer votes received
/// once voting closed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchEvent {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub goals: u32,
    pub assists: u32,
    pub tackles: u32,
    pub saves: u32,
    pub goals_conceded: u32,
    pub mvp_votes: u32,
    pub worst_votes: u32,
}

impl MatchEvent {
    pub fn new(match_id: Uuid, player_id: Uuid) -> Self {
        Self {
            match_id,
            player_id,
            ..Default::default()
        }
    }
}
