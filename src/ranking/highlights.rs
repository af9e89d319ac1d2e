//! Standout players of a single match and of a pelada's whole history.

use serde::Serialize;
use uuid::Uuid;

use crate::models::game::MatchEvent;
use crate::models::player::{Player, PlayerSummary, Position};
use crate::ranking::aggregator::{Aggregator, PlayerAggregate};
use crate::ranking::error::RankingError;
use crate::ranking::scope::RankingScope;
use crate::ranking::scoring;
use crate::ranking::snapshot::EventSnapshot;

/// A highlighted player and the number that earned the highlight.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Highlight {
    pub jogador: PlayerSummary,
    pub valor: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PodiumEntry {
    pub posicao: u32,
    pub jogador: PlayerSummary,
    pub pontos: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct TeamOfTheRound {
    pub goleiro: Option<PlayerSummary>,
    pub zagueiros: Vec<PlayerSummary>,
    pub meio_campos: Vec<PlayerSummary>,
    pub atacantes: Vec<PlayerSummary>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MatchHighlights {
    pub partida_id: Uuid,
    pub artilheiro: Option<Highlight>,
    pub garcom: Option<Highlight>,
    pub xerife: Option<Highlight>,
    pub paredao: Option<Highlight>,
    pub mvp: Option<Highlight>,
    pub bola_murcha: Option<Highlight>,
    pub top_3: Vec<PodiumEntry>,
    pub time_da_rodada: TeamOfTheRound,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PeladaHighlights {
    pub pelada_id: Uuid,
    pub rei: Option<Highlight>,
    pub artilheiro: Option<Highlight>,
    pub garcom: Option<Highlight>,
    pub xerife: Option<Highlight>,
    pub paredao: Option<Highlight>,
}

struct ScoredEvent<'a> {
    player: &'a Player,
    event: &'a MatchEvent,
    points: i64,
}

/// Highlights of one finalized match. Ties go to the lowest player id.
pub fn match_highlights(
    snapshot: &EventSnapshot,
    match_id: Uuid,
) -> Result<MatchHighlights, RankingError> {
    let game = snapshot
        .game(match_id)
        .ok_or(RankingError::MatchNotFound(match_id))?;
    if !game.is_finalized() {
        return Err(RankingError::MatchNotFinalized(match_id));
    }

    let scored: Vec<ScoredEvent> = snapshot
        .events_of_match(match_id)
        .filter_map(|event| {
            let player = snapshot.player(event.player_id)?;
            Some(ScoredEvent {
                player,
                event,
                points: scoring::score_event(player.position, event),
            })
        })
        .collect();

    let by_points = sorted_by_points(&scored);

    let keepers: Vec<&ScoredEvent> = scored
        .iter()
        .filter(|s| scoring::effective_saves(s.player.position, s.event) > 0)
        .collect();

    Ok(MatchHighlights {
        partida_id: match_id,
        artilheiro: positive_leader(scored.iter(), |s| i64::from(s.event.goals)),
        garcom: positive_leader(scored.iter(), |s| i64::from(s.event.assists)),
        xerife: positive_leader(scored.iter(), |s| i64::from(s.event.tackles)),
        paredao: leader(keepers.into_iter(), |s| s.points).map(|s| highlight(s.player, s.points)),
        mvp: by_points.first().map(|s| highlight(s.player, s.points)),
        bola_murcha: worst(&scored).map(|s| highlight(s.player, s.points)),
        top_3: by_points
            .iter()
            .take(3)
            .enumerate()
            .map(|(index, s)| PodiumEntry {
                posicao: (index + 1) as u32,
                jogador: PlayerSummary::from(s.player),
                pontos: s.points,
            })
            .collect(),
        time_da_rodada: team_of_the_round(&by_points),
    })
}

/// All-time highlights of a pelada. Zero counters produce no highlight.
pub fn pelada_highlights(
    aggregator: &Aggregator<'_>,
    snapshot: &EventSnapshot,
    pelada_id: Uuid,
) -> Result<PeladaHighlights, RankingError> {
    let aggregates = aggregator.aggregate(&RankingScope::PeladaAllTime(pelada_id))?;

    let pick = |key: fn(&PlayerAggregate) -> i64, require_positive: bool| -> Option<Highlight> {
        let best = leader_by_id(aggregates.iter(), key)?;
        let value = key(best);
        if require_positive && value <= 0 {
            return None;
        }
        snapshot.player(best.player_id).map(|p| highlight(p, value))
    };

    Ok(PeladaHighlights {
        pelada_id,
        rei: pick(|a| a.total_points, false),
        artilheiro: pick(|a| a.goals as i64, true),
        garcom: pick(|a| a.assists as i64, true),
        xerife: pick(|a| a.tackles as i64, true),
        paredao: pick(|a| a.saves as i64, true),
    })
}

fn highlight(player: &Player, valor: i64) -> Highlight {
    Highlight {
        jogador: PlayerSummary::from(player),
        valor,
    }
}

fn sorted_by_points<'s, 'a>(scored: &'s [ScoredEvent<'a>]) -> Vec<&'s ScoredEvent<'a>> {
    let mut sorted: Vec<&ScoredEvent> = scored.iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points).then(a.player.id.cmp(&b.player.id)));
    sorted
}

fn leader<'s, 'a: 's>(
    entries: impl Iterator<Item = &'s ScoredEvent<'a>>,
    key: impl Fn(&ScoredEvent) -> i64,
) -> Option<&'s ScoredEvent<'a>> {
    entries.min_by(|a, b| key(b).cmp(&key(a)).then(a.player.id.cmp(&b.player.id)))
}

fn positive_leader<'s, 'a: 's>(
    entries: impl Iterator<Item = &'s ScoredEvent<'a>>,
    key: impl Fn(&ScoredEvent) -> i64,
) -> Option<Highlight> {
    let best = leader(entries, &key)?;
    let value = key(best);
    (value > 0).then(|| highlight(best.player, value))
}

fn worst<'s, 'a>(scored: &'s [ScoredEvent<'a>]) -> Option<&'s ScoredEvent<'a>> {
    scored
        .iter()
        .min_by(|a, b| a.points.cmp(&b.points).then(a.player.id.cmp(&b.player.id)))
}

fn leader_by_id<'s>(
    entries: impl Iterator<Item = &'s PlayerAggregate>,
    key: fn(&PlayerAggregate) -> i64,
) -> Option<&'s PlayerAggregate> {
    entries.min_by(|a, b| key(b).cmp(&key(a)).then(a.player_id.cmp(&b.player_id)))
}

fn team_of_the_round(by_points: &[&ScoredEvent]) -> TeamOfTheRound {
    let best_of = |position: Position, count: usize| -> Vec<PlayerSummary> {
        by_points
            .iter()
            .filter(|s| s.player.position == position)
            .take(count)
            .map(|s| PlayerSummary::from(s.player))
            .collect()
    };

    TeamOfTheRound {
        goleiro: best_of(Position::Goalkeeper, 1).into_iter().next(),
        zagueiros: best_of(Position::Defender, 2),
        meio_campos: best_of(Position::Midfielder, 2),
        atacantes: best_of(Position::Forward, 1),
    }
}
