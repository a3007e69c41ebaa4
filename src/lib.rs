//! # Draw Oracle
//!
//! Lottery number generation with an offline fallback engine.
//!
//! ## Architecture
//!
//! - **models**: Game rules, presets, requests and results
//! - **calculate**: Frequency analysis, the local selector, odds, simulation
//! - **strategy**: Ordered prediction strategies with fall-through
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation
//!
//! Nothing here predicts a lottery. Draws are uniformly random; the engine
//! only shapes random picks around user filters and past frequencies.

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod strategy;

pub use models::*;

/// Parse a typed number list such as "7, 13 21".
///
/// Splits on whitespace and commas, keeps positive integers in first-seen
/// order and silently drops anything else.
pub fn parse_number_list(s: &str) -> Vec<u32> {
    let mut out = Vec::new();
    for token in s.split(|c: char| c.is_whitespace() || c == ',') {
        let Ok(n) = token.trim().parse::<u32>() else {
            continue;
        };
        if n > 0 && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}
