use uuid::Uuid;

use crate::ranking::aggregator::PlayerAggregate;

/// A player with their 1-based place in a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedPlayer {
    pub position: u32,
    pub aggregate: PlayerAggregate,
}

/// The slices a leaderboard screen consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingPage {
    pub ranking: Vec<RankedPlayer>,
    pub top: Vec<RankedPlayer>,
    /// The requester's own row, only when it is not already in `top`.
    pub user_position: Option<RankedPlayer>,
}

/// Order by average points descending, then by player id ascending, and
/// number the result 1..=n without gaps.
pub fn rank_players(mut aggregates: Vec<PlayerAggregate>) -> Vec<RankedPlayer> {
    aggregates.sort_by(|a, b| match b.cmp_average(a) {
        std::cmp::Ordering::Equal => a.player_id.cmp(&b.player_id),
        other => other,
    });

    aggregates
        .into_iter()
        .enumerate()
        .map(|(index, aggregate)| RankedPlayer {
            position: (index + 1) as u32,
            aggregate,
        })
        .collect()
}

pub fn paginate(ranked: Vec<RankedPlayer>, requester: Option<Uuid>, top_n: usize) -> RankingPage {
    let top: Vec<RankedPlayer> = ranked.iter().take(top_n).copied().collect();

    let user_position = requester.and_then(|player_id| {
        ranked
            .iter()
            .find(|r| r.aggregate.player_id == player_id)
            .filter(|r| r.position as usize > top_n)
            .copied()
    });

    RankingPage {
        ranking: ranked,
        top,
        user_position,
    }
}
