// Free-text description parsing against the vocabulary tables.
use crate::model::ExtractedAttributes;
use crate::vocab;

pub trait Parser {
    fn parse(&self, raw: &str) -> ExtractedAttributes;
}

pub struct DescriptionParser;

impl DescriptionParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for DescriptionParser {
    /// Extracts a partial attribute record from a description. Pure and
    /// deterministic; unrecognized input yields unset fields, never an error.
    /// For every field only the first (left-to-right) matching token counts.
    fn parse(&self, raw: &str) -> ExtractedAttributes {
        let lowered = raw.to_lowercase();
        let trimmed = strip_noise(&lowered);
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        let make = tokens
            .iter()
            .find(|t| vocab::make_alias(t).is_some() || vocab::is_known_make(t))
            .map(|t| vocab::make_alias(t).unwrap_or(t).to_string());

        let model_idx = tokens.iter().position(|t| vocab::is_known_model(t));
        let model = model_idx.map(|i| tokens[i].to_string());

        let badge = model_idx.and_then(|i| extract_badge(&tokens[i + 1..]));

        let fuel_type = tokens
            .iter()
            .find(|t| vocab::is_fuel_token(t))
            .map(|t| vocab::fuel_alias(t).unwrap_or(t).to_string());

        let transmission_type = tokens
            .iter()
            .find(|t| vocab::is_transmission_token(t))
            .map(|t| t.to_string());

        let drive_type = tokens
            .iter()
            .find_map(|t| vocab::drive_alias(t))
            .map(|canonical| canonical.to_string());

        ExtractedAttributes {
            make,
            model,
            badge,
            fuel_type,
            transmission_type,
            drive_type,
        }
    }
}

/// Cuts the text at the earliest noise marker, discarding the marker and
/// everything after it. Input is already lower-cased.
fn strip_noise(text: &str) -> &str {
    let cut = vocab::NOISE_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .min();
    match cut {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Joins the tokens between the model and the first boundary token into the
/// badge phrase. Hyphens and slashes inside tokens become spaces ("gti-performance"
/// and "gti/performance" both read "gti performance").
fn extract_badge(after_model: &[&str]) -> Option<String> {
    let end = after_model
        .iter()
        .position(|t| vocab::is_badge_boundary(t))
        .unwrap_or(after_model.len());

    let badge = after_model[..end]
        .iter()
        .map(|t| t.replace(['-', '/'], " "))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    if badge.is_empty() { None } else { Some(badge) }
}
