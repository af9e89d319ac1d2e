use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::RankingSettings;
use crate::db::ranking_queries;
use crate::models::pelada::Pelada;
use crate::models::ranking::{
    AvailableYearsResponse, PlayerStatsResponse, RankingEntry, RankingQuery, RankingResponse,
};
use crate::ranking::highlights::{self, MatchHighlights, PeladaHighlights};
use crate::ranking::{
    paginate, rank_players, Aggregator, EventSnapshot, RankedPlayer, RankingContext,
    RankingError, RankingScope, SnapshotFilter,
};

/// Where snapshots come from.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    Postgres(PgPool),
    /// Fixed data set, used by tests and embedders.
    InMemory(Arc<EventSnapshot>),
}

impl SnapshotSource {
    pub fn in_memory(snapshot: EventSnapshot) -> Self {
        SnapshotSource::InMemory(Arc::new(snapshot))
    }

    pub async fn load(&self, filter: SnapshotFilter) -> Result<EventSnapshot, RankingError> {
        match self {
            SnapshotSource::Postgres(pool) => ranking_queries::load_snapshot(pool, filter).await,
            SnapshotSource::InMemory(snapshot) => Ok(snapshot.restricted(filter)),
        }
    }
}

/// Read-side service behind the ranking endpoints.
///
/// Each call loads its own snapshot and computes from scratch, so calls can
/// run concurrently and repeated calls on unchanged data agree.
#[derive(Debug, Clone)]
pub struct RankingService {
    source: SnapshotSource,
    settings: RankingSettings,
}

impl RankingService {
    pub fn new(source: SnapshotSource, settings: RankingSettings) -> Self {
        Self { source, settings }
    }

    fn context(&self, as_of: NaiveDate) -> RankingContext {
        RankingContext::new(as_of, self.settings)
    }

    /// Leaderboard across every pelada, annotated with each player's primary pelada.
    #[tracing::instrument(name = "Compute global ranking", skip(self))]
    pub async fn global_ranking(
        &self,
        requester: Option<Uuid>,
        as_of: NaiveDate,
    ) -> Result<RankingResponse, RankingError> {
        let snapshot = self.source.load(SnapshotFilter::All).await?;
        let aggregator = Aggregator::new(&snapshot, self.context(as_of));
        let primary = aggregator.primary_peladas();

        self.build_response(&snapshot, &aggregator, &RankingScope::Global, requester, |player_id| {
            primary.get(&player_id).copied()
        })
    }

    /// Leaderboard of one pelada for the window named in `query`.
    #[tracing::instrument(name = "Compute pelada ranking", skip(self))]
    pub async fn pelada_ranking(
        &self,
        requester: Uuid,
        pelada_id: Uuid,
        query: &RankingQuery,
        as_of: NaiveDate,
    ) -> Result<RankingResponse, RankingError> {
        // Reject bad parameters before touching storage
        let scope = RankingScope::for_pelada(pelada_id, query.tipo.as_deref(), query.ano.as_deref())?;

        let snapshot = self.member_snapshot(requester, pelada_id).await?;
        let aggregator = Aggregator::new(&snapshot, self.context(as_of));

        self.build_response(&snapshot, &aggregator, &scope, Some(requester), |_| None)
    }

    pub async fn available_years(
        &self,
        requester: Uuid,
        pelada_id: Uuid,
    ) -> Result<AvailableYearsResponse, RankingError> {
        let snapshot = self.member_snapshot(requester, pelada_id).await?;
        // Years do not depend on the reference date
        let aggregator = Aggregator::new(&snapshot, self.context(NaiveDate::MIN));
        Ok(AvailableYearsResponse {
            success: true,
            anos: aggregator.available_years(pelada_id)?,
        })
    }

    pub async fn pelada_highlights(
        &self,
        requester: Uuid,
        pelada_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<PeladaHighlights, RankingError> {
        let snapshot = self.member_snapshot(requester, pelada_id).await?;
        let aggregator = Aggregator::new(&snapshot, self.context(as_of));
        highlights::pelada_highlights(&aggregator, &snapshot, pelada_id)
    }

    pub async fn match_highlights(
        &self,
        requester: Uuid,
        match_id: Uuid,
    ) -> Result<MatchHighlights, RankingError> {
        let snapshot = self.source.load(SnapshotFilter::Match(match_id)).await?;
        let game = snapshot
            .game(match_id)
            .ok_or(RankingError::MatchNotFound(match_id))?;
        if !snapshot.is_member(game.pelada_id, requester) {
            return Err(RankingError::NotMember(game.pelada_id));
        }
        highlights::match_highlights(&snapshot, match_id)
    }

    #[tracing::instrument(name = "Compute player stats", skip(self))]
    pub async fn player_stats(
        &self,
        player_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<PlayerStatsResponse, RankingError> {
        let snapshot = self.source.load(SnapshotFilter::All).await?;
        let aggregator = Aggregator::new(&snapshot, self.context(as_of));
        let stats = aggregator.player_stats(player_id)?;
        let player = snapshot
            .player(player_id)
            .ok_or(RankingError::PlayerNotFound(player_id))?;
        Ok(PlayerStatsResponse::new(player, stats.primary_pelada(), &stats))
    }

    async fn member_snapshot(
        &self,
        requester: Uuid,
        pelada_id: Uuid,
    ) -> Result<EventSnapshot, RankingError> {
        let snapshot = self.source.load(SnapshotFilter::Pelada(pelada_id)).await?;
        if snapshot.pelada(pelada_id).is_none() {
            return Err(RankingError::PeladaNotFound(pelada_id));
        }
        if !snapshot.is_member(pelada_id, requester) {
            tracing::warn!("Player {} is not a member of pelada {}", requester, pelada_id);
            return Err(RankingError::NotMember(pelada_id));
        }
        Ok(snapshot)
    }

    fn build_response<'s>(
        &self,
        snapshot: &'s EventSnapshot,
        aggregator: &Aggregator<'s>,
        scope: &RankingScope,
        requester: Option<Uuid>,
        primary_pelada: impl Fn(Uuid) -> Option<&'s Pelada>,
    ) -> Result<RankingResponse, RankingError> {
        let aggregates = aggregator.aggregate(scope)?;
        let page = paginate(rank_players(aggregates), requester, self.settings.top_n);

        let to_entry = |ranked: &RankedPlayer| -> Result<RankingEntry, RankingError> {
            let player = snapshot.player(ranked.aggregate.player_id).ok_or_else(|| {
                RankingError::InvalidData(format!("unknown player {}", ranked.aggregate.player_id))
            })?;
            Ok(RankingEntry::new(ranked, player, primary_pelada(player.id)))
        };

        let ranking = page.ranking.iter().map(&to_entry).collect::<Result<Vec<_>, _>>()?;
        let top_10 = page.top.iter().map(&to_entry).collect::<Result<Vec<_>, _>>()?;
        let user_position = page.user_position.as_ref().map(&to_entry).transpose()?;

        tracing::info!(
            "Ranking '{}' computed: {} players, requester ranked: {}",
            scope.window(),
            ranking.len(),
            user_position.is_some()
        );

        Ok(RankingResponse {
            success: true,
            tipo: scope.window(),
            ano: scope.year(),
            ranking,
            top_10,
            user_position,
        })
    }
}
