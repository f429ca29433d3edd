//! The expression algebra for final referral trust equations.

use crate::referral::Link;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic right-hand side of a final referral trust equation.
///
/// Synthesized trees are flat: a [`Expression::Consensus`] node only ever
/// holds [`Expression::Direct`] and [`Expression::Discount`] leaves, and
/// [`Expression::FullUncertainty`] survives only as the root of equations
/// that are never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// The identity of ⊕.
    FullUncertainty,
    /// The direct referral opinion `A[from, to]`.
    Direct(Link),
    /// The discounting rule `R[r] ⊠ A[a]`.
    Discount { r: Link, a: Link },
    /// The consensus `e₁ ⊕ … ⊕ eₙ` over the children, `n ≥ 2`.
    Consensus(Vec<Expression>),
}

impl Expression {
    pub fn is_full_uncertainty(&self) -> bool {
        matches!(self, Expression::FullUncertainty)
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Expression::Direct(_))
    }

    pub fn is_discount(&self) -> bool {
        matches!(self, Expression::Discount { .. })
    }

    pub fn is_consensus(&self) -> bool {
        matches!(self, Expression::Consensus(_))
    }

    /// Folds `term` into the accumulator under ⊕.
    ///
    /// Full uncertainty is absorbed on either side; anything else promotes
    /// the accumulator to a consensus list, appending in insertion order.
    pub fn circle_plus(self, term: Expression) -> Expression {
        match (self, term) {
            (Expression::FullUncertainty, term) => term,
            (acc, Expression::FullUncertainty) => acc,
            (Expression::Consensus(mut children), term) => {
                children.push(term);
                Expression::Consensus(children)
            }
            (acc, term) => Expression::Consensus(vec![acc, term]),
        }
    }
}

/// Renders the canonical form: consensus children are sorted
/// lexicographically, which is sound because ⊕ is commutative.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::FullUncertainty => write!(f, "U"),
            Expression::Direct(a) => write!(f, "A[{},{}]", a.from, a.to),
            Expression::Discount { r, a } => write!(
                f,
                "(R[{},{}] ⊠ A[{},{}])",
                r.from, r.to, a.from, a.to
            ),
            Expression::Consensus(children) => {
                let mut rendered: Vec<String> =
                    children.iter().map(|child| child.to_string()).collect();
                rendered.sort();
                write!(f, "{}", rendered.join(" ⊕ "))
            }
        }
    }
}
