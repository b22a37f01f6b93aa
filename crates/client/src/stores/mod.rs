//! Client-side state stores.

pub mod competitions;

pub use competitions::CompetitionStore;
