use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::config::settings::RankingSettings;
use crate::models::game::{Match, MatchEvent};
use crate::models::pelada::Pelada;
use crate::models::player::{Player, Position};
use crate::ranking::error::RankingError;
use crate::ranking::scope::RankingScope;
use crate::ranking::scoring;
use crate::ranking::snapshot::EventSnapshot;

/// Explicit inputs every computation needs besides the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingContext {
    /// Reference date for rolling windows.
    pub as_of: NaiveDate,
    pub settings: RankingSettings,
}

impl RankingContext {
    pub fn new(as_of: NaiveDate, settings: RankingSettings) -> Self {
        Self { as_of, settings }
    }
}

/// Sums over the qualifying matches of one player.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAggregate {
    pub player_id: Uuid,
    pub matches: u32,
    pub goals: u64,
    pub assists: u64,
    pub tackles: u64,
    pub saves: u64,
    pub goals_conceded: u64,
    pub mvp_votes: u64,
    pub worst_votes: u64,
    pub total_points: i64,
}

impl PlayerAggregate {
    pub fn new(player_id: Uuid) -> Self {
        Self {
            player_id,
            matches: 0,
            goals: 0,
            assists: 0,
            tackles: 0,
            saves: 0,
            goals_conceded: 0,
            mvp_votes: 0,
            worst_votes: 0,
            total_points: 0,
        }
    }

    fn add(&mut self, position: Position, event: &MatchEvent) {
        self.matches += 1;
        self.goals += u64::from(event.goals);
        self.assists += u64::from(event.assists);
        self.tackles += u64::from(event.tackles);
        self.saves += u64::from(scoring::effective_saves(position, event));
        self.goals_conceded += u64::from(scoring::effective_goals_conceded(position, event));
        self.mvp_votes += u64::from(event.mvp_votes);
        self.worst_votes += u64::from(event.worst_votes);
        self.total_points += scoring::score_event(position, event);
    }

    /// Mean points per match, 0.0 when no match qualified.
    pub fn average_points(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.total_points as f64 / f64::from(self.matches)
        }
    }

    /// Compare averages exactly: a/m <=> b/n  as  a*n <=> b*m.
    pub fn cmp_average(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.total_points) * i128::from(other.matches.max(1));
        let rhs = i128::from(other.total_points) * i128::from(self.matches.max(1));
        lhs.cmp(&rhs)
    }
}

/// Global totals of a player plus one row per pelada they played in.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlayerStats {
    pub general: PlayerAggregate,
    pub per_pelada: Vec<(Pelada, PlayerAggregate)>,
}

impl PlayerStats {
    /// The pelada with the most finalized matches. Ties go to the lowest pelada id.
    pub fn primary_pelada(&self) -> Option<&Pelada> {
        self.per_pelada
            .iter()
            .min_by(|(a, a_totals), (b, b_totals)| {
                b_totals.matches.cmp(&a_totals.matches).then(a.id.cmp(&b.id))
            })
            .map(|(pelada, _)| pelada)
    }
}

pub struct Aggregator<'a> {
    snapshot: &'a EventSnapshot,
    context: RankingContext,
}

impl<'a> Aggregator<'a> {
    pub fn new(snapshot: &'a EventSnapshot, context: RankingContext) -> Self {
        Self { snapshot, context }
    }

    /// Per-player aggregates for a scope, ordered by player id.
    ///
    /// Players below `min_matches` qualifying matches are left out, so a
    /// player without matches never shows up.
    #[tracing::instrument(name = "Aggregate ranking scope", skip(self))]
    pub fn aggregate(&self, scope: &RankingScope) -> Result<Vec<PlayerAggregate>, RankingError> {
        if let Some(pelada_id) = scope.pelada_id() {
            self.require_pelada(pelada_id)?;
        }

        let min_matches = self.context.settings.min_matches.max(1);
        let aggregates: Vec<PlayerAggregate> = self
            .collect(scope, |_| true)
            .into_values()
            .filter(|agg| agg.matches >= min_matches)
            .collect();

        tracing::debug!("Aggregated {} players", aggregates.len());
        Ok(aggregates)
    }

    /// Totals of one player in a scope, regardless of `min_matches`.
    pub fn player_totals(&self, player_id: Uuid, scope: &RankingScope) -> PlayerAggregate {
        self.collect(scope, |event| event.player_id == player_id)
            .remove(&player_id)
            .unwrap_or_else(|| PlayerAggregate::new(player_id))
    }

    /// Global totals and per-pelada totals of one player, in one pass over the events.
    pub fn player_stats(&self, player_id: Uuid) -> Result<PlayerStats, RankingError> {
        if self.snapshot.player(player_id).is_none() {
            return Err(RankingError::PlayerNotFound(player_id));
        }

        let mut general = PlayerAggregate::new(player_id);
        let mut per_pelada: BTreeMap<Uuid, PlayerAggregate> = BTreeMap::new();
        for (player, game, event) in self
            .qualifying_events(&RankingScope::Global)
            .filter(|(_, _, event)| event.player_id == player_id)
        {
            general.add(player.position, event);
            per_pelada
                .entry(game.pelada_id)
                .or_insert_with(|| PlayerAggregate::new(player_id))
                .add(player.position, event);
        }

        let per_pelada = per_pelada
            .into_iter()
            .filter_map(|(pelada_id, totals)| {
                let pelada = self.snapshot.pelada(pelada_id)?.clone();
                Some((pelada, totals))
            })
            .collect();

        Ok(PlayerStats { general, per_pelada })
    }

    /// Distinct years with at least one finalized match, ascending.
    pub fn available_years(&self, pelada_id: Uuid) -> Result<Vec<i32>, RankingError> {
        self.require_pelada(pelada_id)?;
        let years: BTreeSet<i32> = self
            .snapshot
            .matches()
            .filter(|m| m.pelada_id == pelada_id && m.is_finalized())
            .map(|m| m.match_date.year())
            .collect();
        Ok(years.into_iter().collect())
    }

    /// The pelada each player has the most finalized matches in.
    /// Ties go to the lowest pelada id.
    pub fn primary_peladas(&self) -> HashMap<Uuid, &'a Pelada> {
        let mut counts: BTreeMap<(Uuid, Uuid), u32> = BTreeMap::new();
        for (_, game, event) in self.qualifying_events(&RankingScope::Global) {
            *counts.entry((event.player_id, game.pelada_id)).or_insert(0) += 1;
        }

        let mut best: HashMap<Uuid, (Uuid, u32)> = HashMap::new();
        for ((player_id, pelada_id), count) in counts {
            // BTreeMap order visits pelada ids ascending, so strict > keeps the lowest on ties
            match best.get(&player_id) {
                Some(&(_, current)) if current >= count => {}
                _ => {
                    best.insert(player_id, (pelada_id, count));
                }
            }
        }

        best.into_iter()
            .filter_map(|(player_id, (pelada_id, _))| {
                self.snapshot.pelada(pelada_id).map(|p| (player_id, p))
            })
            .collect()
    }

    /// Events that may be scored for this scope: the match exists, is
    /// finalized and falls inside the scope, and the player is known.
    ///
    /// This is the only path into the scoring function.
    pub(crate) fn qualifying_events(
        &self,
        scope: &RankingScope,
    ) -> impl Iterator<Item = (&'a Player, &'a Match, &'a MatchEvent)> + '_ {
        let snapshot = self.snapshot;
        let context = self.context;
        let scope = *scope;
        snapshot.events().filter_map(move |event| {
            let Some(game) = snapshot.game(event.match_id) else {
                tracing::warn!("Skipping event for unknown match {}", event.match_id);
                return None;
            };
            if !game.is_finalized()
                || !scope.includes(game, context.as_of, context.settings.last_month_days)
            {
                return None;
            }
            let Some(player) = snapshot.player(event.player_id) else {
                tracing::warn!("Skipping event for unknown player {}", event.player_id);
                return None;
            };
            Some((player, game, event))
        })
    }

    fn collect(
        &self,
        scope: &RankingScope,
        keep: impl Fn(&MatchEvent) -> bool,
    ) -> BTreeMap<Uuid, PlayerAggregate> {
        let mut per_player: BTreeMap<Uuid, PlayerAggregate> = BTreeMap::new();
        for (player, _, event) in self.qualifying_events(scope).filter(|(_, _, e)| keep(e)) {
            per_player
                .entry(player.id)
                .or_insert_with(|| PlayerAggregate::new(player.id))
                .add(player.position, event);
        }
        per_player
    }

    fn require_pelada(&self, pelada_id: Uuid) -> Result<&'a Pelada, RankingError> {
        self.snapshot
            .pelada(pelada_id)
            .ok_or(RankingError::PeladaNotFound(pelada_id))
    }
}
