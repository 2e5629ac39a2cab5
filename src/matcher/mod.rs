// Matcher module: weighted scoring of catalog entries against extracted attributes.

pub mod scoring;

pub use scoring::{Matcher, ScoringMatcher};
