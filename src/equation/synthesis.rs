//! Per-pair equation generation from the direct referral graph.

use crate::{equation::expression::Expression, referral::Link, trustgraph::TrustGraph};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A final referral trust equation `R[r] = expression`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub r: Link,
    pub expression: Expression,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "R[{},{}] = {}",
            self.r.from, self.r.to, self.expression
        )
    }
}

/// Builds the equation set for the final referral trust matrix.
///
/// For every source `i` and every `j ≠ i` reachable from `i`, the expression
/// folds one term per predecessor `k` of `j`:
///
/// - `k == i`: the direct hop `A[i,j]` (`R[i,i]` is full belief, absorbed);
/// - `k ≠ j` and `k` reachable from `i`: the discounted hop
///   `R[i,k] ⊠ A[k,j]`;
/// - anything else contributes full uncertainty and is skipped.
///
/// Pairs whose expression stays at full uncertainty are not emitted, and the
/// diagonal is never materialized.
///
/// The returned order is part of the solver contract: equations whose
/// expression is a lone direct hop come first, then ascending by `from`,
/// then by `to`. Direct equations seed `R` with non-trivial values before
/// any discounting term dereferences them.
pub fn synthesize_equations<I>(links: I) -> Vec<Equation>
where
    I: IntoIterator<Item = Link>,
{
    let graph = TrustGraph::from_links(links);
    let mut equations = Vec::new();

    for &from in graph.nodes() {
        let reach = graph.reachable_from(from);
        for &to in &reach {
            if to == from {
                continue;
            }
            let mut expression = Expression::FullUncertainty;
            if let Some(referrals) = graph.referrals_to(to) {
                for &k in referrals {
                    if k == from {
                        expression = expression.circle_plus(Expression::Direct(Link::new(k, to)));
                    } else if k != to && reach.contains(&k) {
                        expression = expression.circle_plus(Expression::Discount {
                            r: Link::new(from, k),
                            a: Link::new(k, to),
                        });
                    }
                }
            }
            if !expression.is_full_uncertainty() {
                equations.push(Equation {
                    r: Link::new(from, to),
                    expression,
                });
            }
        }
    }

    equations.sort_by_key(|equation| (!equation.expression.is_direct(), equation.r));
    tracing::debug!(
        count = equations.len(),
        "synthesized final referral trust equations"
    );
    equations
}
