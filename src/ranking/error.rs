use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Invalid ranking type '{0}'. Use geral, ano or mes")]
    InvalidScope(String),

    #[error("Ranking type 'ano' requires the 'ano' parameter")]
    MissingYear,

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Pelada not found: {0}")]
    PeladaNotFound(Uuid),

    #[error("Player not found: {0}")]
    PlayerNotFound(Uuid),

    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("Match {0} is not finalized yet")]
    MatchNotFinalized(Uuid),

    #[error("Player is not an active member of pelada {0}")]
    NotMember(Uuid),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RankingError {
    /// Errors caused by the request itself rather than by the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RankingError::InvalidData(_) | RankingError::Database(_))
    }
}
