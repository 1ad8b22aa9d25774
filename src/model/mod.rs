pub mod profile;
pub mod scores;

pub use profile::{ScoringProfile, StrategyKind};
pub use scores::{PathwayScore, PatientScores, ScoreRow, ScoreTable};
