// Server module: HTTP transport in front of the matching core.

pub mod routes;

pub use routes::{AppState, HttpApi};
