use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::game::Match;
use crate::ranking::error::RankingError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

/// Time window of a pelada ranking, as named by the `tipo` query parameter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankingWindow {
    Geral,
    Ano,
    Mes,
}

impl FromStr for RankingWindow {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geral" | "general" => Ok(RankingWindow::Geral),
            "ano" | "yearly" => Ok(RankingWindow::Ano),
            "mes" | "mês" | "monthly" | "ultimo_mes" => Ok(RankingWindow::Mes),
            other => Err(RankingError::InvalidScope(other.to_string())),
        }
    }
}

impl fmt::Display for RankingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RankingWindow::Geral => "geral",
            RankingWindow::Ano => "ano",
            RankingWindow::Mes => "mes",
        };
        write!(f, "{}", s)
    }
}

/// Which finalized matches feed a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingScope {
    /// Every pelada the player took part in.
    Global,
    PeladaAllTime(Uuid),
    PeladaYear { pelada_id: Uuid, year: i32 },
    /// Rolling window ending on the reference date.
    PeladaLastMonth(Uuid),
}

impl RankingScope {
    /// Build a pelada scope from the raw `tipo` / `ano` query parameters.
    ///
    /// A missing `tipo` means the all-time ranking. `tipo=ano` never falls
    /// back to a default year.
    pub fn for_pelada(
        pelada_id: Uuid,
        tipo: Option<&str>,
        ano: Option<&str>,
    ) -> Result<Self, RankingError> {
        let window = match tipo.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t.parse::<RankingWindow>()?,
            None => RankingWindow::Geral,
        };

        match window {
            RankingWindow::Geral => Ok(RankingScope::PeladaAllTime(pelada_id)),
            RankingWindow::Mes => Ok(RankingScope::PeladaLastMonth(pelada_id)),
            RankingWindow::Ano => {
                let raw = ano
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .ok_or(RankingError::MissingYear)?;
                let year = parse_year(raw)?;
                Ok(RankingScope::PeladaYear { pelada_id, year })
            }
        }
    }

    pub fn pelada_id(&self) -> Option<Uuid> {
        match self {
            RankingScope::Global => None,
            RankingScope::PeladaAllTime(id)
            | RankingScope::PeladaLastMonth(id)
            | RankingScope::PeladaYear { pelada_id: id, .. } => Some(*id),
        }
    }

    pub fn window(&self) -> RankingWindow {
        match self {
            RankingScope::Global | RankingScope::PeladaAllTime(_) => RankingWindow::Geral,
            RankingScope::PeladaYear { .. } => RankingWindow::Ano,
            RankingScope::PeladaLastMonth(_) => RankingWindow::Mes,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            RankingScope::PeladaYear { year, .. } => Some(*year),
            _ => None,
        }
    }

    /// Whether a match falls inside this scope. Match status is not checked here.
    pub fn includes(&self, game: &Match, as_of: NaiveDate, last_month_days: i64) -> bool {
        match self {
            RankingScope::Global => true,
            RankingScope::PeladaAllTime(id) => game.pelada_id == *id,
            RankingScope::PeladaYear { pelada_id, year } => {
                game.pelada_id == *pelada_id && game.match_date.year() == *year
            }
            RankingScope::PeladaLastMonth(id) => {
                let start = last_month_start(as_of, last_month_days);
                game.pelada_id == *id && game.match_date >= start && game.match_date <= as_of
            }
        }
    }
}

/// First day of the rolling window that ends on `as_of`.
pub fn last_month_start(as_of: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days.max(0))
        .and_then(|delta| as_of.checked_sub_signed(delta))
        .unwrap_or(NaiveDate::MIN)
}

fn parse_year(raw: &str) -> Result<i32, RankingError> {
    let year = raw
        .parse::<i32>()
        .map_err(|_| RankingError::InvalidYear(raw.to_string()))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(RankingError::InvalidYear(raw.to_string()));
    }
    Ok(year)
}
