// Core algorithm exports
pub mod finder;
pub mod scoring;
pub mod session;

pub use finder::{rank, LocationFinder, RankResult};
pub use scoring::{calculate_match_score, coverage, score};
pub use session::{FinderPhase, FinderSession, SessionError};
