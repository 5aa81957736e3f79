//! Ingestion and aggregation for the SanityBoard leaderboard.
//!
//! [`store::RunStore`] discovers run directories and loads their documents,
//! [`aggregate`] derives overview counts and the leaderboard ordering, and
//! [`view::FilterState`] projects the ordered collection into what a client
//! asked to see.

pub mod aggregate;
pub mod error;
pub mod store;
pub mod view;

pub use aggregate::*;
pub use error::*;
pub use store::*;
pub use view::*;
