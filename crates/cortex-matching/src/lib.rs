//! # cortex-matching
//!
//! The candidate-matching engine. Everything here is a pure function of
//! its inputs: the caller loads a snapshot of the candidate pool, the
//! project's requests and its collaborations, and gets back a ranked,
//! truncated list. Nothing is persisted.
//!
//! - [`timezone`]: IANA name to current UTC offset, fail-soft
//! - [`scoring`]: the 0-100 fit score for one candidate
//! - [`filter`]: exclusion set and eligibility predicate
//! - [`ranker`]: filter, score, sort, truncate

pub mod filter;
pub mod ranker;
pub mod scoring;
pub mod timezone;

pub use filter::{exclusion_set, CandidateFilter, ExclusionSet};
pub use ranker::{MatchInput, MatchRanker, RankedCandidate, DEFAULT_LIMIT};
pub use scoring::{fit_score, ScoreBreakdown};
pub use timezone::{is_known_timezone, OffsetResolver, TimezoneOffsetResolver};
