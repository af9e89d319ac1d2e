use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::game::{Match, MatchEvent};
use crate::models::pelada::{Membership, Pelada};
use crate::models::player::Player;
use crate::ranking::error::RankingError;
use crate::ranking::snapshot::{EventSnapshot, SnapshotFilter};

#[derive(Debug, FromRow)]
struct MatchEventRow {
    match_id: Uuid,
    player_id: Uuid,
    goals: i32,
    assists: i32,
    tackles: i32,
    saves: i32,
    goals_conceded: i32,
    mvp_votes: i32,
    worst_votes: i32,
}

impl TryFrom<MatchEventRow> for MatchEvent {
    type Error = RankingError;

    fn try_from(row: MatchEventRow) -> Result<Self, Self::Error> {
        let counter = |name: &str, value: i32| {
            u32::try_from(value).map_err(|_| {
                RankingError::InvalidData(format!(
                    "negative {} ({}) for player {} in match {}",
                    name, value, row.player_id, row.match_id
                ))
            })
        };

        Ok(MatchEvent {
            match_id: row.match_id,
            player_id: row.player_id,
            goals: counter("goals", row.goals)?,
            assists: counter("assists", row.assists)?,
            tackles: counter("tackles", row.tackles)?,
            saves: counter("saves", row.saves)?,
            goals_conceded: counter("goals_conceded", row.goals_conceded)?,
            mvp_votes: counter("mvp_votes", row.mvp_votes)?,
            worst_votes: counter("worst_votes", row.worst_votes)?,
        })
    }
}

/// Resolve the pelada a filter is about. `None` means every pelada.
async fn resolve_pelada(pool: &PgPool, filter: SnapshotFilter) -> Result<Option<Uuid>, RankingError> {
    match filter {
        SnapshotFilter::All => Ok(None),
        SnapshotFilter::Pelada(pelada_id) => Ok(Some(pelada_id)),
        SnapshotFilter::Match(match_id) => {
            let pelada_id: Option<Uuid> = sqlx::query_scalar(
                "SELECT pelada_id FROM matches WHERE id = $1",
            )
            .bind(match_id)
            .fetch_optional(pool)
            .await?;
            pelada_id.ok_or(RankingError::MatchNotFound(match_id))
                .map(Some)
        }
    }
}

/// Read everything a ranking computation needs in one pass.
///
/// Matches of every status are loaded; only the engine decides which ones count.
#[tracing::instrument(
    name = "Load ranking snapshot",
    skip(pool)
)]
pub async fn load_snapshot(pool: &PgPool, filter: SnapshotFilter) -> Result<EventSnapshot, RankingError> {
    let pelada_id = resolve_pelada(pool, filter).await?;

    let players = sqlx::query_as::<_, Player>(
        r#"
        SELECT id, name, position, photo_url
        FROM players
        "#,
    )
    .fetch_all(pool)
    .await?;

    let peladas = sqlx::query_as::<_, Pelada>(
        r#"
        SELECT id, name
        FROM peladas
        WHERE $1::uuid IS NULL OR id = $1
        "#,
    )
    .bind(pelada_id)
    .fetch_all(pool)
    .await?;

    let memberships = sqlx::query_as::<_, Membership>(
        r#"
        SELECT pelada_id, player_id
        FROM pelada_members
        WHERE active = TRUE
        AND ($1::uuid IS NULL OR pelada_id = $1)
        "#,
    )
    .bind(pelada_id)
    .fetch_all(pool)
    .await?;

    let matches = sqlx::query_as::<_, Match>(
        r#"
        SELECT id, pelada_id, match_date, start_time, end_time, status
        FROM matches
        WHERE $1::uuid IS NULL OR pelada_id = $1
        "#,
    )
    .bind(pelada_id)
    .fetch_all(pool)
    .await?;

    let events = sqlx::query_as::<_, MatchEventRow>(
        r#"
        SELECT
            e.match_id,
            e.player_id,
            e.goals,
            e.assists,
            e.tackles,
            e.saves,
            e.goals_conceded,
            e.mvp_votes,
            e.worst_votes
        FROM match_events e
        JOIN matches m ON m.id = e.match_id
        WHERE $1::uuid IS NULL OR m.pelada_id = $1
        "#,
    )
    .bind(pelada_id)
    .fetch_all(pool)
    .await?;

    let mut snapshot = EventSnapshot::new();
    players.into_iter().for_each(|p| snapshot.insert_player(p));
    peladas.into_iter().for_each(|p| snapshot.insert_pelada(p));
    memberships
        .into_iter()
        .for_each(|m| snapshot.add_member(m.pelada_id, m.player_id));
    matches.into_iter().for_each(|m| snapshot.insert_match(m));
    for row in events {
        snapshot.insert_event(MatchEvent::try_from(row)?);
    }

    tracing::debug!("Loaded snapshot with {} events", snapshot.event_count());
    Ok(snapshot)
}
