//! Domain layer for the Marquee movie service.
//!
//! Holds the canonical movie representation, the normalizer that produces it
//! from upstream payloads, and the in-memory favorites / search-history
//! stores together with the stats derived from them. Nothing here performs
//! network I/O.

pub mod error;
pub mod favorites;
pub mod history;
pub mod movie;
pub mod normalize;
pub mod stats;
pub mod types;
