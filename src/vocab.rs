// Vocabulary tables. The only place recognized makes, models, fuels,
// transmissions, drive types and noise phrases are defined — extending
// the recognized vocabulary means extending a table, not the parser.

pub const MAKE_SYNONYMS: &[(&str, &str)] = &[("vw", "volkswagen")];

pub const KNOWN_MAKES: &[&str] = &["volkswagen", "toyota"];

pub const KNOWN_MODELS: &[&str] = &[
    "golf", "amarok", "tiguan", "rav4", "camry", "kluger", "86",
];

pub const FUEL_SYNONYMS: &[(&str, &str)] = &[("hybrid", "hybrid-petrol")];

pub const FUEL_TOKENS: &[&str] = &["petrol", "diesel", "hybrid"];

pub const TRANSMISSION_TOKENS: &[&str] = &["automatic", "manual"];

pub const DRIVE_SYNONYMS: &[(&str, &str)] = &[
    ("4x4", "Four Wheel Drive"),
    ("4wd", "Four Wheel Drive"),
    ("fwd", "Front Wheel Drive"),
    ("rwd", "Rear Wheel Drive"),
];

/// Literal tokens that end the badge window. Drive aliases are boundaries
/// too ("hybrid" deliberately is not).
pub const BADGE_BOUNDARY_TOKENS: &[&str] = &["petrol", "diesel", "automatic", "manual"];

/// Phrase fragments marking the start of irrelevant trailing text, e.g.
/// "... for sale, well looked after". Matched as literal fragments.
pub const NOISE_MARKERS: &[&str] = &[
    " with ",
    " engine swap",
    " swap engine",
    " swap ",
    " for sale",
    " owned",
    " kms",
];

pub fn make_alias(token: &str) -> Option<&'static str> {
    MAKE_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
}

pub fn is_known_make(token: &str) -> bool {
    KNOWN_MAKES.contains(&token)
}

pub fn is_known_model(token: &str) -> bool {
    KNOWN_MODELS.contains(&token)
}

pub fn fuel_alias(token: &str) -> Option<&'static str> {
    FUEL_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
}

pub fn is_fuel_token(token: &str) -> bool {
    FUEL_TOKENS.contains(&token)
}

pub fn is_transmission_token(token: &str) -> bool {
    TRANSMISSION_TOKENS.contains(&token)
}

pub fn drive_alias(token: &str) -> Option<&'static str> {
    DRIVE_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
}

pub fn is_badge_boundary(token: &str) -> bool {
    BADGE_BOUNDARY_TOKENS.contains(&token) || drive_alias(token).is_some()
}
