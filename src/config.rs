//! TOML-backed solver configuration.
//!
//! ```toml
//! [solver]
//! max_epochs = 100
//! tolerance = 0.0
//! distance = "manhattan"    # manhattan | chebyshev | euclidean
//! aggregator = "max"        # max | sum
//! ```

use crate::{
    error::EbslError,
    solver::{
        chebyshev_distance, euclidean_distance, manhattan_distance, MaxDistance, SolverOptions,
        SumDistance, DEFAULT_MAX_EPOCHS,
    },
};
use serde::{Deserialize, Serialize};
use std::{fs::read_to_string, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceKind {
    Manhattan,
    Chebyshev,
    Euclidean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatorKind {
    Max,
    Sum,
}

/// The `[solver]` table. Missing keys fall back to the solver defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_epochs: usize,
    pub tolerance: f64,
    pub distance: DistanceKind,
    pub aggregator: AggregatorKind,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_epochs: DEFAULT_MAX_EPOCHS,
            tolerance: 0.0,
            distance: DistanceKind::Manhattan,
            aggregator: AggregatorKind::Max,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    solver: SolverConfig,
}

impl SolverConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EbslError> {
        tracing::debug!("reading solver config from {:?}", path.as_ref());
        let content = read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)?;
        Ok(file.solver)
    }

    /// Materializes the configuration into solver options. Rejects a zero
    /// epoch cap.
    pub fn to_options(&self) -> Result<SolverOptions, EbslError> {
        let options = SolverOptions::default()
            .with_max_epochs(self.max_epochs)?
            .with_tolerance(self.tolerance);
        let options = match self.distance {
            DistanceKind::Manhattan => options.with_distance(manhattan_distance),
            DistanceKind::Chebyshev => options.with_distance(chebyshev_distance),
            DistanceKind::Euclidean => options.with_distance(euclidean_distance),
        };
        Ok(match self.aggregator {
            AggregatorKind::Max => options.with_aggregator(MaxDistance::default()),
            AggregatorKind::Sum => options.with_aggregator(SumDistance::default()),
        })
    }
}
