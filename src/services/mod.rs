pub mod ranking_service;

pub use ranking_service::{RankingService, SnapshotSource};
