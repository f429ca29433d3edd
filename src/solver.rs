//! Gauss–Seidel fixed-point iteration over the synthesized equations.
//!
//! Each epoch walks every equation in the order produced by
//! [`synthesize_equations`](crate::equation::synthesize_equations),
//! re-evaluates its right-hand side and overwrites `R` in place, so later
//! equations within the same epoch observe earlier updates. That in-place
//! visibility is what lets referential cycles in `R` converge instead of
//! diverging; the equation order is therefore part of the observable
//! contract and must not be permuted.

use crate::{
    equation::{evaluate_expression, Equation, EquationContext},
    error::EbslError,
    opinion::Opinion,
};

pub const DEFAULT_MAX_EPOCHS: usize = 100;

pub type DistanceFn = Box<dyn Fn(&Opinion, &Opinion) -> f64>;
pub type EpochStartFn = Box<dyn FnMut(usize) -> Result<(), EbslError>>;
pub type EpochEndFn = Box<dyn FnMut(usize, f64) -> Result<(), EbslError>>;

/// `|Δb| + |Δd| + |Δu|`. The default distance.
pub fn manhattan_distance(prev: &Opinion, new: &Opinion) -> f64 {
    (prev.belief - new.belief).abs()
        + (prev.disbelief - new.disbelief).abs()
        + (prev.uncertainty - new.uncertainty).abs()
}

/// `max(|Δb|, |Δd|, |Δu|)`.
pub fn chebyshev_distance(prev: &Opinion, new: &Opinion) -> f64 {
    (prev.belief - new.belief)
        .abs()
        .max((prev.disbelief - new.disbelief).abs())
        .max((prev.uncertainty - new.uncertainty).abs())
}

/// `√(Δb² + Δd² + Δu²)`.
pub fn euclidean_distance(prev: &Opinion, new: &Opinion) -> f64 {
    let db = prev.belief - new.belief;
    let dd = prev.disbelief - new.disbelief;
    let du = prev.uncertainty - new.uncertainty;
    (db * db + dd * dd + du * du).sqrt()
}

/// Folds the per-equation distances of one epoch into the epoch error.
pub trait DistanceAggregator {
    fn reset(&mut self);
    fn add(&mut self, distance: f64);
    fn result(&self) -> f64;
}

/// Maximum distance across the epoch. The default aggregator.
///
/// A reset aggregator with no added distances reports `f64::MAX`, so an
/// empty equation set never satisfies a finite tolerance and the solve runs
/// to the epoch cap.
#[derive(Debug, Clone)]
pub struct MaxDistance {
    seeded: bool,
    max: f64,
}

impl Default for MaxDistance {
    fn default() -> Self {
        MaxDistance {
            seeded: false,
            max: f64::MAX,
        }
    }
}

impl DistanceAggregator for MaxDistance {
    fn reset(&mut self) {
        self.seeded = false;
        self.max = f64::MAX;
    }

    fn add(&mut self, distance: f64) {
        if self.seeded {
            self.max = self.max.max(distance);
        } else {
            self.seeded = true;
            self.max = distance;
        }
    }

    fn result(&self) -> f64 {
        self.max
    }
}

/// Running sum of distances across the epoch.
#[derive(Debug, Default, Clone)]
pub struct SumDistance {
    sum: f64,
}

impl DistanceAggregator for SumDistance {
    fn reset(&mut self) {
        self.sum = 0.0;
    }

    fn add(&mut self, distance: f64) {
        self.sum += distance;
    }

    fn result(&self) -> f64 {
        self.sum
    }
}

/// Solver configuration, applied through the builder methods.
///
/// Defaults: 100 epochs, Manhattan distance, [`MaxDistance`] aggregation,
/// tolerance `0.0` (run to the cap), no callbacks.
pub struct SolverOptions {
    max_epochs: usize,
    tolerance: f64,
    distance: DistanceFn,
    aggregator: Box<dyn DistanceAggregator>,
    on_epoch_start: Option<EpochStartFn>,
    on_epoch_end: Option<EpochEndFn>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            max_epochs: DEFAULT_MAX_EPOCHS,
            tolerance: 0.0,
            distance: Box::new(manhattan_distance),
            aggregator: Box::new(MaxDistance::default()),
            on_epoch_start: None,
            on_epoch_end: None,
        }
    }
}

impl SolverOptions {
    /// Caps the iteration count. Zero is rejected.
    pub fn with_max_epochs(mut self, max_epochs: usize) -> Result<Self, EbslError> {
        if max_epochs == 0 {
            return Err(EbslError::EpochMustBePositive);
        }
        self.max_epochs = max_epochs;
        Ok(self)
    }

    /// Early-stop threshold on the aggregated epoch error.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Distance between the previous and freshly evaluated opinion of one
    /// equation. See [`manhattan_distance`], [`chebyshev_distance`],
    /// [`euclidean_distance`], or pass a custom closure.
    pub fn with_distance<F>(mut self, distance: F) -> Self
    where
        F: Fn(&Opinion, &Opinion) -> f64 + 'static,
    {
        self.distance = Box::new(distance);
        self
    }

    pub fn with_aggregator<A>(mut self, aggregator: A) -> Self
    where
        A: DistanceAggregator + 'static,
    {
        self.aggregator = Box::new(aggregator);
        self
    }

    /// Invoked before each epoch; an `Err` aborts the solve with that error.
    pub fn on_epoch_start<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) -> Result<(), EbslError> + 'static,
    {
        self.on_epoch_start = Some(Box::new(callback));
        self
    }

    /// Invoked after each epoch with the aggregated error; an `Err` aborts
    /// the solve with that error.
    pub fn on_epoch_end<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, f64) -> Result<(), EbslError> + 'static,
    {
        self.on_epoch_end = Some(Box::new(callback));
        self
    }
}

/// Iterates the equation system to its fixed point.
///
/// Returns `Ok` when the epoch error drops to the tolerance or the epoch cap
/// is exhausted (callers observe residual error through `on_epoch_end`);
/// returns the first evaluation or callback error otherwise.
pub fn solve_equations<C>(
    context: &mut C,
    equations: &[Equation],
    options: SolverOptions,
) -> Result<(), EbslError>
where
    C: EquationContext,
{
    let SolverOptions {
        max_epochs,
        tolerance,
        distance,
        mut aggregator,
        mut on_epoch_start,
        mut on_epoch_end,
    } = options;

    for epoch in 1..=max_epochs {
        if let Some(callback) = on_epoch_start.as_mut() {
            callback(epoch)?;
        }
        aggregator.reset();

        for equation in equations {
            let prev = context.final_referral(&equation.r);
            let new = evaluate_expression(context, &equation.expression)?;
            context.set_final_referral(equation.r, new);
            aggregator.add(distance(&prev, &new));
        }

        let error = aggregator.result();
        if let Some(callback) = on_epoch_end.as_mut() {
            callback(epoch, error)?;
        }
        tracing::debug!(epoch, error, "epoch complete");

        if error <= tolerance {
            return Ok(());
        }
    }

    Ok(())
}
