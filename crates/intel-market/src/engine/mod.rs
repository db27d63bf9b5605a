//! Briefing engine
//!
//! Coordinates the individual tools into one company briefing

pub mod briefing;
pub mod result;

pub use briefing::{BriefingOrchestrator, MAX_BRIEFING_ARTICLES, looks_like_symbol};
pub use result::{Briefing, FetchOutcome};
