use std::collections::{BTreeMap, HashMap, HashSet};

use uuid::Uuid;

use crate::models::game::{Match, MatchEvent};
use crate::models::pelada::Pelada;
use crate::models::player::Player;

/// Which part of the stored data a request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFilter {
    All,
    Pelada(Uuid),
    /// Everything belonging to the pelada that owns this match.
    Match(Uuid),
}

/// Immutable input of one ranking computation.
///
/// Events are keyed by `(match_id, player_id)` so a pair has at most one
/// event and iteration order is stable.
#[derive(Debug, Clone, Default)]
pub struct EventSnapshot {
    players: HashMap<Uuid, Player>,
    peladas: HashMap<Uuid, Pelada>,
    memberships: HashSet<(Uuid, Uuid)>,
    matches: HashMap<Uuid, Match>,
    events: BTreeMap<(Uuid, Uuid), MatchEvent>,
}

impl EventSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn insert_pelada(&mut self, pelada: Pelada) {
        self.peladas.insert(pelada.id, pelada);
    }

    pub fn add_member(&mut self, pelada_id: Uuid, player_id: Uuid) {
        self.memberships.insert((pelada_id, player_id));
    }

    pub fn insert_match(&mut self, game: Match) {
        self.matches.insert(game.id, game);
    }

    /// Returns the event it replaced, if any.
    pub fn insert_event(&mut self, event: MatchEvent) -> Option<MatchEvent> {
        self.events.insert((event.match_id, event.player_id), event)
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn pelada(&self, id: Uuid) -> Option<&Pelada> {
        self.peladas.get(&id)
    }

    pub fn game(&self, id: Uuid) -> Option<&Match> {
        self.matches.get(&id)
    }

    pub fn is_member(&self, pelada_id: Uuid, player_id: Uuid) -> bool {
        self.memberships.contains(&(pelada_id, player_id))
    }

    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    pub fn events(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.values()
    }

    /// Events of a single match, ordered by player id.
    pub fn events_of_match(&self, match_id: Uuid) -> impl Iterator<Item = &MatchEvent> {
        self.events
            .range((match_id, Uuid::nil())..=(match_id, Uuid::from_u128(u128::MAX)))
            .map(|(_, event)| event)
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Copy of the part of this snapshot selected by `filter`.
    ///
    /// Players are always kept whole so names resolve for every event.
    pub fn restricted(&self, filter: SnapshotFilter) -> EventSnapshot {
        let pelada_id = match filter {
            SnapshotFilter::All => return self.clone(),
            SnapshotFilter::Pelada(id) => Some(id),
            SnapshotFilter::Match(match_id) => self.game(match_id).map(|m| m.pelada_id),
        };
        let Some(pelada_id) = pelada_id else {
            return EventSnapshot {
                players: self.players.clone(),
                ..Default::default()
            };
        };

        let matches: HashMap<Uuid, Match> = self
            .matches
            .iter()
            .filter(|(_, m)| m.pelada_id == pelada_id)
            .map(|(id, m)| (*id, m.clone()))
            .collect();
        let events = self
            .events
            .iter()
            .filter(|((match_id, _), _)| matches.contains_key(match_id))
            .map(|(key, event)| (*key, *event))
            .collect();

        EventSnapshot {
            players: self.players.clone(),
            peladas: self
                .peladas
                .get(&pelada_id)
                .map(|p| HashMap::from([(p.id, p.clone())]))
                .unwrap_or_default(),
            memberships: self
                .memberships
                .iter()
                .filter(|(p, _)| *p == pelada_id)
                .copied()
                .collect(),
            matches,
            events,
        }
    }
}
