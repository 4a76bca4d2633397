pub mod favorites;
pub mod movies;
pub mod stats;
