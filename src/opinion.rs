//! Evidence and opinion value types with the subjective-logic operators.
//!
//! An [`Opinion`] is a point on the manifold `belief + disbelief +
//! uncertainty = 1`. Every operator in this module is closed on that
//! manifold: results are renormalized by the divisor of the corresponding
//! closed form, so the invariant holds up to floating-point rounding.
//!
//! The three operators are scalar discounting (`α·x`), consensus (`x ⊕ y`)
//! and the fused form (`x ⊕ (α·y)`). The fused form performs the same
//! arithmetic as discount-then-fuse without materializing the intermediate
//! opinion; the expression evaluator uses it on its hot path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accumulated positive and negative observations for a single referral.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub positive: f64,
    pub negative: f64,
}

impl Evidence {
    pub fn new(positive: f64, negative: f64) -> Self {
        Evidence { positive, negative }
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{P: {}, N: {}}}", self.positive, self.negative)
    }
}

/// A subjective-logic opinion triple.
///
/// Constructed from [`Evidence`] with a fixed evidence unit `c`, or through
/// the algebra operators, all of which preserve `belief + disbelief +
/// uncertainty = 1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    pub belief: f64,
    pub disbelief: f64,
    pub uncertainty: f64,
}

impl Opinion {
    /// The neutral seed of the final referral matrix diagonal.
    pub const FULL_BELIEF: Opinion = Opinion {
        belief: 1.0,
        disbelief: 0.0,
        uncertainty: 0.0,
    };

    pub const FULL_DISBELIEF: Opinion = Opinion {
        belief: 0.0,
        disbelief: 1.0,
        uncertainty: 0.0,
    };

    /// The identity of the consensus operator.
    pub const FULL_UNCERTAINTY: Opinion = Opinion {
        belief: 0.0,
        disbelief: 0.0,
        uncertainty: 1.0,
    };

    pub fn new(belief: f64, disbelief: f64, uncertainty: f64) -> Self {
        Opinion {
            belief,
            disbelief,
            uncertainty,
        }
    }

    /// Converts evidence to an opinion using `c` as the soft threshold/"unit"
    /// of evidence (must be a positive number).
    pub fn from_evidence(c: u64, evidence: &Evidence) -> Self {
        let k = c as f64 + evidence.positive + evidence.negative;
        Opinion {
            belief: evidence.positive / k,
            disbelief: evidence.negative / k,
            uncertainty: c as f64 / k,
        }
    }

    /// Converts the opinion back to evidence under the same unit `c`.
    ///
    /// Undefined for zero uncertainty; terminal values such as
    /// [`Opinion::FULL_BELIEF`] cannot be mapped back to finite evidence.
    pub fn to_evidence(&self, c: u64) -> Evidence {
        debug_assert!(
            self.uncertainty > 0.0,
            "evidence is undefined for zero-uncertainty opinions"
        );
        Evidence {
            positive: c as f64 * self.belief / self.uncertainty,
            negative: c as f64 * self.disbelief / self.uncertainty,
        }
    }

    /// Scalar discounting `α·x`, in place.
    ///
    /// `α = 1` is the identity; `α = 0` collapses to full uncertainty.
    pub fn discount_by(&mut self, alpha: f64) -> &mut Self {
        let belief = alpha * self.belief;
        let disbelief = alpha * self.disbelief;
        let uncertainty = self.uncertainty;
        let k = belief + disbelief + uncertainty;
        self.belief = belief / k;
        self.disbelief = disbelief / k;
        self.uncertainty = uncertainty / k;
        self
    }

    /// Consensus `x ⊕ y`, in place.
    ///
    /// Commutative and associative with [`Opinion::FULL_UNCERTAINTY`] as
    /// identity. Fusing two zero-uncertainty operands divides by zero and is
    /// a programming error; the upstream conversion guarantees `u > 0` for
    /// every opinion derived from evidence.
    pub fn fuse(&mut self, y: &Opinion) -> &mut Self {
        let xu = self.uncertainty;
        let yu = y.uncertainty;
        let k = xu + yu - xu * yu;
        self.belief = (xu * y.belief + yu * self.belief) / k;
        self.disbelief = (xu * y.disbelief + yu * self.disbelief) / k;
        self.uncertainty = xu * yu / k;
        self
    }

    /// Fused `x ⊕ (α·y)`, in place.
    ///
    /// Equivalent to discounting `y` by `α` and then fusing, without the
    /// intermediate opinion. `α = 0` leaves `x` unchanged.
    pub fn fuse_discounted(&mut self, alpha: f64, y: &Opinion) -> &mut Self {
        if alpha == 0.0 {
            return self;
        }
        let xu = self.uncertainty;
        let yu = y.uncertainty;
        let k = yu + alpha * xu * (1.0 - yu);
        self.belief = (alpha * xu * y.belief + yu * self.belief) / k;
        self.disbelief = (alpha * xu * y.disbelief + yu * self.disbelief) / k;
        self.uncertainty = xu * yu / k;
        self
    }
}

impl fmt::Display for Opinion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{B: {}, D: {}, U: {}}}",
            self.belief, self.disbelief, self.uncertainty
        )
    }
}
