//! Text analysis used by the bundled classifier backends.
//!
//! Queries are turned into a stream of normalized [`Token`](token::Token)s
//! by an [`Analyzer`](analyzer::Analyzer). Backends only ever see token text;
//! offsets are kept so cue matches can be traced back to the query.

pub mod analyzer;
pub mod token;

pub use analyzer::{Analyzer, StandardAnalyzer};
pub use token::{Token, TokenStream};
