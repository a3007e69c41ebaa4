//! Offline prediction engine.
//!
//! - **frequency**: hot/cold analysis of free-form draw history
//! - **selector**: entry generation under lucky/unwanted constraints
//! - **odds**: prize-division odds for standard and system entries
//! - **simulate**: random draws for scoring entries
//! - **demo**: sample history text
//!
//! Everything here is synchronous and stateless; randomness is passed in.

pub mod demo;
pub mod frequency;
pub mod odds;
pub mod selector;
pub mod simulate;

pub use frequency::{analyze, FrequencyProfile};
pub use selector::{generate, SelectionError, Selector, SelectorTuning};

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A fresh RNG for one request, seeded when reproducibility is wanted.
pub fn request_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    }
}
