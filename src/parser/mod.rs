// Parser module: structured attribute extraction from free-text descriptions.

pub mod description_parser;

pub use description_parser::{DescriptionParser, Parser};
