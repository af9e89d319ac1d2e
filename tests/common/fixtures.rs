#![allow(dead_code)]

use chrono::NaiveDate;
use uuid::Uuid;

use rei_da_pelada_backend::models::game::{Match, MatchEvent, MatchStatus};
use rei_da_pelada_backend::models::pelada::Pelada;
use rei_da_pelada_backend::models::player::{Player, Position};
use rei_da_pelada_backend::ranking::EventSnapshot;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Invalid test date")
}

/// Statistics of one player in one match, in the order the app records them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Line {
    pub goals: u32,
    pub assists: u32,
    pub tackles: u32,
    pub saves: u32,
    pub goals_conceded: u32,
    pub mvp: u32,
    pub worst: u32,
}

impl Line {
    pub fn goals(goals: u32) -> Self {
        Self { goals, ..Default::default() }
    }
}

/// Builds snapshots with predictable ids: every new entity gets an id larger
/// than the previous one, so creation order is id order.
pub struct League {
    pub snapshot: EventSnapshot,
    next_id: u128,
}

impl League {
    pub fn new() -> Self {
        Self {
            snapshot: EventSnapshot::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> Uuid {
        let id = Uuid::from_u128(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn player(&mut self, name: &str, position: Position) -> Uuid {
        let id = self.next_id();
        self.snapshot.insert_player(Player::new(id, name, position));
        id
    }

    pub fn pelada(&mut self, name: &str, members: &[Uuid]) -> Uuid {
        let id = self.next_id();
        self.snapshot.insert_pelada(Pelada::new(id, name));
        for member in members {
            self.snapshot.add_member(id, *member);
        }
        id
    }

    pub fn game(&mut self, pelada_id: Uuid, match_date: NaiveDate, status: MatchStatus) -> Uuid {
        let id = self.next_id();
        self.snapshot.insert_match(Match::new(id, pelada_id, match_date, status));
        id
    }

    pub fn finalized(&mut self, pelada_id: Uuid, match_date: NaiveDate) -> Uuid {
        self.game(pelada_id, match_date, MatchStatus::Finalized)
    }

    pub fn record(&mut self, match_id: Uuid, player_id: Uuid, line: Line) {
        self.snapshot.insert_event(MatchEvent {
            match_id,
            player_id,
            goals: line.goals,
            assists: line.assists,
            tackles: line.tackles,
            saves: line.saves,
            goals_conceded: line.goals_conceded,
            mvp_votes: line.mvp,
            worst_votes: line.worst,
        });
    }

    pub fn into_snapshot(self) -> EventSnapshot {
        self.snapshot
    }
}

/// Player A and goalkeeper B from the scoring walkthrough, one finalized 2023
/// match each in the same pelada.
pub struct TwoPlayerLeague {
    pub league: League,
    pub pelada_id: Uuid,
    pub match_id: Uuid,
    pub player_a: Uuid,
    pub keeper_b: Uuid,
}

pub fn two_player_league() -> TwoPlayerLeague {
    let mut league = League::new();
    let player_a = league.player("Alice", Position::Forward);
    let keeper_b = league.player("Bruno", Position::Goalkeeper);
    let pelada_id = league.pelada("Pelada de Quinta", &[player_a, keeper_b]);
    let match_id = league.finalized(pelada_id, date(2023, 5, 4));
    league.record(match_id, player_a, Line { goals: 2, assists: 1, mvp: 1, ..Default::default() });
    league.record(match_id, keeper_b, Line { saves: 3, worst: 1, ..Default::default() });

    TwoPlayerLeague {
        league,
        pelada_id,
        match_id,
        player_a,
        keeper_b,
    }
}
