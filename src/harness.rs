//! The classifier test harness.
//!
//! - [`queries`]: the built-in query suite and query file loading
//! - [`runner`]: [`TestRunner`], the sequential run loop, and the
//!   [`RunPresenter`] hooks it reports through
//! - [`pacer`]: the fixed delay between classify calls
//! - [`summary`]: intent frequency statistics
//! - [`report`]: per-query records and the final [`RunReport`]

pub mod pacer;
pub mod queries;
pub mod report;
pub mod runner;
pub mod summary;

pub use pacer::{FixedDelay, NoDelay, Pacer};
pub use queries::{DEFAULT_QUERIES, default_queries, load_queries};
pub use report::{QueryOutcome, QueryRecord, RunReport};
pub use runner::{RunPresenter, RunState, TestRunner};
pub use summary::{DEFAULT_TOP_INTENTS, IntentCount, IntentTally, RunSummary};
