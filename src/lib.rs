//! # ebsl-core
//!
//! A Rust library for computing transitive trust over directed graphs of
//! peer-to-peer assertions using Evidence-Based Subjective Logic (EBSL).
//!
//! ## Overview
//!
//! Every observed edge `(i → j)` carries an evidence pair (positive and
//! negative observations) which maps to an opinion triple `(b, d, u)` with
//! `b + d + u = 1`. From the sparse matrix `A` of direct referral opinions,
//! the library derives the final referral trust matrix `R`: `R[i, j]` is
//! `i`'s possibly-indirect opinion about `j`, defined as the fixed point of
//! `R[i,j] = ⊕ₖ (R[i,k] ⊠ A[k,j])` over all contributing paths.
//!
//! ### Key Features
//!
//! - **Symbolic equation synthesis**: a reachability predicate prunes the
//!   system down to genuinely contributing paths before any numerics run
//! - **Closed-form opinion algebra**: allocation-free ⊕, ⊠ and the fused
//!   ⊕·α operator used on the evaluator's hot path
//! - **Gauss–Seidel solver**: in-place fixed-point iteration with pluggable
//!   distance functions, error aggregation, tolerance, and epoch callbacks
//! - **Deterministic ordering**: BTree-backed matrices and a direct-first
//!   equation order make runs reproducible by construction
//!
//! ## Architecture
//!
//! - **[`opinion`]**: `Evidence`, `Opinion` and the subjective-logic operators
//! - **[`referral`]**: `Link` plus the `A`/`R` matrix newtypes
//! - **[`trustgraph`]**: forward/reverse adjacency indexes and DFS reachability
//! - **[`equation`]**: expression trees, synthesis, and stateful evaluation
//! - **[`solver`]**: the fixed-point loop and its configuration
//! - **[`report`]**: evidence file reader and discount output writer
//! - **[`config`]**: optional TOML solver configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use ebsl_core::{
//!     equation::{synthesize_equations, ReferralContext},
//!     opinion::Evidence,
//!     referral::{DirectReferralEvidence, Link},
//!     solver::{solve_equations, SolverOptions},
//! };
//!
//! # fn main() -> Result<(), ebsl_core::EbslError> {
//! let mut evidence = DirectReferralEvidence::default();
//! evidence.insert(Link::new(1, 2), Evidence::new(4.0, 1.0));
//! evidence.insert(Link::new(2, 3), Evidence::new(3.0, 0.0));
//!
//! let direct = evidence.to_opinions(2);
//! let equations = synthesize_equations(direct.links());
//!
//! let mut context = ReferralContext::new(direct);
//! solve_equations(&mut context, &equations, SolverOptions::default())?;
//!
//! for (link, opinion) in context.final_opinions().iter() {
//!     println!("{link}: {opinion}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod equation;
pub mod error;
pub mod opinion;
pub mod referral;
pub mod report;
pub mod solver;
pub mod trustgraph;

#[cfg(test)]
mod tests;

pub use error::EbslError;
