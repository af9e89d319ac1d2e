use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Field position. Stored in English, shown with the app's Portuguese labels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum Position {
    #[serde(rename = "Goleiro", alias = "goalkeeper")]
    Goalkeeper,
    #[serde(rename = "Zagueiro", alias = "defender")]
    Defender,
    #[serde(rename = "Meio-campo", alias = "midfielder")]
    Midfielder,
    #[serde(rename = "Atacante", alias = "forward")]
    Forward,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub position: Position,
    pub photo_url: Option<String>,
}

impl Player {
    pub fn new(id: Uuid, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            photo_url: None,
        }
    }
}

/// Compact player card embedded in highlight payloads.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerSummary {
    pub usuario_id: Uuid,
    pub nome: String,
    pub posicao_campo: Position,
    pub foto_url: Option<String>,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            usuario_id: player.id,
            nome: player.name.clone(),
            posicao_campo: player.position,
            foto_url: player.photo_url.clone(),
        }
    }
}
