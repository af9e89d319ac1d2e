use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Pelada {
    pub id: Uuid,
    pub name: String,
}

impl Pelada {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Active membership of a player in a pelada.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub pelada_id: Uuid,
    pub player_id: Uuid,
}
