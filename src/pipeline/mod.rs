pub mod aggregator;
pub mod enricher;
pub mod heroes;
pub mod orchestrator;
pub mod profile;

pub use aggregator::PlayerAggregator;
pub use enricher::{EnrichedMatches, MatchEnricher};
pub use heroes::HeroCatalog;
pub use orchestrator::{PipelineSettings, RequestOrchestrator};
pub use profile::{ProfileLookup, ProfileResolver};
