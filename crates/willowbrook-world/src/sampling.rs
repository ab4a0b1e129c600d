//! Weighted selection and noise helpers shared by the daily models.
//!
//! Every random draw in the simulation goes through a caller-supplied
//! [`Rng`], so a single seeded generator owned by the orchestrator fixes
//! the whole play-through.

use rand::Rng;

/// A list of `(value, weight)` entries sampled with one roll.
///
/// A random value in `[0, total_weight())` walks the cumulative weights
/// and selects the first entry whose running total exceeds it. Entries with
/// zero or negative weight are never chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTable<T> {
    entries: Vec<(T, f64)>,
}

impl<T: Copy> WeightedTable<T> {
    /// Build a table, dropping entries that could never be selected.
    pub fn new(entries: impl IntoIterator<Item = (T, f64)>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|(_, weight)| weight.is_finite() && *weight > 0.0)
            .collect();
        Self { entries }
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }

    /// Whether no entry can be selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select the entry for a roll in `[0, total_weight())`. Rolls past the
    /// end select the last entry.
    pub fn select(&self, roll: f64) -> Option<T> {
        let mut cumulative = 0.0;
        for (value, weight) in &self.entries {
            cumulative += weight;
            if roll < cumulative {
                return Some(*value);
            }
        }
        self.entries.last().map(|(value, _)| *value)
    }

    /// Draw one entry.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let roll = rng.random::<f64>() * self.total_weight();
        self.select(roll)
    }
}

/// Draw from a normal distribution with mean 0 (Box-Muller transform).
pub fn gaussian(rng: &mut impl Rng, std_dev: f64) -> f64 {
    // 1 - u keeps the logarithm argument in (0, 1].
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    let radius = (-2.0 * u1.ln()).sqrt();
    radius * (core::f64::consts::TAU * u2).cos() * std_dev
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
