pub mod aggregator;
pub mod error;
pub mod highlights;
pub mod scope;
pub mod scoring;
pub mod snapshot;
pub mod standings;

pub use aggregator::{Aggregator, PlayerAggregate, RankingContext};
pub use error::RankingError;
pub use scope::{RankingScope, RankingWindow};
pub use snapshot::{EventSnapshot, SnapshotFilter};
pub use standings::{paginate, rank_players, RankedPlayer, RankingPage};
