//! Mock identifier
//!
//! Deliberately fake: the image bytes are never inspected. After an artificial
//! processing delay the result is a uniformly random catalog entry with a
//! random confidence score. The delay suspends only the current request task.

use rand::Rng;
use serde::Serialize;
use std::time::Duration;

use crate::catalog::Pokemon;
use crate::config::AppState;

/// A catalog entry plus the attached confidence score
#[derive(Debug, Clone, Serialize)]
pub struct Identification {
    #[serde(flatten)]
    pub pokemon: Pokemon,
    pub confidence: f64,
}

/// "Identify" an image: random catalog pick with confidence in [0.85, 0.99)
pub async fn identify(_image: &[u8], state: &AppState) -> Identification {
    tokio::time::sleep(Duration::from_millis(state.config.identify.delay_ms)).await;

    let mut rng = rand::thread_rng();
    let pokemon = state.catalog[rng.gen_range(0..state.catalog.len())].clone();
    let confidence = rng.gen_range(0.85..0.99);

    Identification { pokemon, confidence }
}
