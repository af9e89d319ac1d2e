// src/models/ranking.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::round_one_decimal;
use crate::models::pelada::Pelada;
use crate::models::player::{Player, Position};
use crate::ranking::aggregator::{PlayerAggregate, PlayerStats};
use crate::ranking::scope::RankingWindow;
use crate::ranking::standings::RankedPlayer;

/// Query string of the pelada ranking endpoint: `?tipo=geral|ano|mes&ano=2024`.
/// `ano` stays a string so a malformed year gets a proper error message.
#[derive(Debug, Deserialize, Default)]
pub struct RankingQuery {
    pub tipo: Option<String>,
    pub ano: Option<String>,
}

/// One leaderboard row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RankingEntry {
    pub usuario_id: Uuid,
    pub nome: String,
    pub posicao_campo: Position,
    pub foto_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelada: Option<String>,
    pub media_pontos: f64,
    pub position: u32,
    pub total_pontos: i64,
    pub total_partidas: u32,
    pub total_gols: u64,
    pub total_assistencias: u64,
    pub total_desarmes: u64,
    pub total_defesas: u64,
    pub total_gols_sofridos: u64,
    pub votos_mvp: u64,
    pub votos_bola_murcha: u64,
}

impl RankingEntry {
    pub fn new(ranked: &RankedPlayer, player: &Player, pelada: Option<&Pelada>) -> Self {
        let agg = &ranked.aggregate;
        Self {
            usuario_id: player.id,
            nome: player.name.clone(),
            posicao_campo: player.position,
            foto_url: player.photo_url.clone(),
            pelada: pelada.map(|p| p.name.clone()),
            media_pontos: round_one_decimal(agg.average_points()),
            position: ranked.position,
            total_pontos: agg.total_points,
            total_partidas: agg.matches,
            total_gols: agg.goals,
            total_assistencias: agg.assists,
            total_desarmes: agg.tackles,
            total_defesas: agg.saves,
            total_gols_sofridos: agg.goals_conceded,
            votos_mvp: agg.mvp_votes,
            votos_bola_murcha: agg.worst_votes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RankingResponse {
    pub success: bool,
    pub tipo: RankingWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano: Option<i32>,
    pub ranking: Vec<RankingEntry>,
    pub top_10: Vec<RankingEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_position: Option<RankingEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AvailableYearsResponse {
    pub success: bool,
    pub anos: Vec<i32>,
}

/// Totals shown on a player's profile.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatsSummary {
    pub total_partidas: u32,
    pub total_gols: u64,
    pub total_assistencias: u64,
    pub total_desarmes: u64,
    pub total_defesas: u64,
    pub total_gols_sofridos: u64,
    pub votos_mvp: u64,
    pub votos_bola_murcha: u64,
    pub total_pontos: i64,
    pub media_pontos: f64,
}

impl From<&PlayerAggregate> for StatsSummary {
    fn from(agg: &PlayerAggregate) -> Self {
        Self {
            total_partidas: agg.matches,
            total_gols: agg.goals,
            total_assistencias: agg.assists,
            total_desarmes: agg.tackles,
            total_defesas: agg.saves,
            total_gols_sofridos: agg.goals_conceded,
            votos_mvp: agg.mvp_votes,
            votos_bola_murcha: agg.worst_votes,
            total_pontos: agg.total_points,
            media_pontos: round_one_decimal(agg.average_points()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PeladaStatsRow {
    pub pelada_id: Uuid,
    pub pelada_nome: String,
    #[serde(flatten)]
    pub stats: StatsSummary,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerStatsResponse {
    pub jogador: Player,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelada_principal: Option<String>,
    pub estatisticas_gerais: StatsSummary,
    pub estatisticas_por_pelada: Vec<PeladaStatsRow>,
}

impl PlayerStatsResponse {
    pub fn new(player: &Player, primary: Option<&Pelada>, stats: &PlayerStats) -> Self {
        Self {
            jogador: player.clone(),
            pelada_principal: primary.map(|p| p.name.clone()),
            estatisticas_gerais: StatsSummary::from(&stats.general),
            estatisticas_por_pelada: stats
                .per_pelada
                .iter()
                .map(|(pelada, agg)| PeladaStatsRow {
                    pelada_id: pelada.id,
                    pelada_nome: pelada.name.clone(),
                    stats: StatsSummary::from(agg),
                })
                .collect(),
        }
    }
}
