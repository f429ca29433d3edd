//! Contexts resolving expression leaves to opinions, and the final
//! functional trust aggregation built on top of them.

use crate::{
    error::EbslError,
    opinion::Opinion,
    referral::{DirectFunctionalTrust, DirectReferralOpinions, FinalReferralOpinions, Link},
};

/// Read surface for expression evaluation.
pub trait EvaluationContext {
    /// The direct referral opinion `A[link]`. A missing entry indicates a
    /// corrupted equation set and is fatal.
    fn direct(&self, link: &Link) -> Result<Opinion, EbslError>;

    /// The current final referral opinion `R[link]`, full belief when not
    /// yet assigned.
    fn final_referral(&self, link: &Link) -> Opinion;

    /// The confidence `α ∈ [0, 1]` extracted from a referral opinion when
    /// discounting. Belief mass by default; implementations may substitute
    /// another policy such as `max(0, b − d)`.
    fn discount(&self, opinion: &Opinion) -> f64 {
        opinion.belief
    }
}

/// Write surface the solver needs on top of [`EvaluationContext`].
pub trait EquationContext: EvaluationContext {
    /// Stores a freshly evaluated final referral opinion. Later equations in
    /// the same epoch observe the update (Gauss–Seidel).
    fn set_final_referral(&mut self, link: Link, value: Opinion);
}

/// Default context backed by the two referral matrices.
#[derive(Debug, Default, Clone)]
pub struct ReferralContext {
    direct: DirectReferralOpinions,
    final_referral: FinalReferralOpinions,
}

impl ReferralContext {
    pub fn new(direct: DirectReferralOpinions) -> Self {
        ReferralContext {
            direct,
            final_referral: FinalReferralOpinions::default(),
        }
    }

    pub fn direct_opinions(&self) -> &DirectReferralOpinions {
        &self.direct
    }

    pub fn final_opinions(&self) -> &FinalReferralOpinions {
        &self.final_referral
    }
}

impl EvaluationContext for ReferralContext {
    fn direct(&self, link: &Link) -> Result<Opinion, EbslError> {
        self.direct
            .get(link)
            .copied()
            .ok_or(EbslError::DirectReferralNotFound(*link))
    }

    fn final_referral(&self, link: &Link) -> Opinion {
        self.final_referral.get_or_full_belief(link)
    }
}

impl EquationContext for ReferralContext {
    fn set_final_referral(&mut self, link: Link, value: Opinion) {
        self.final_referral.insert(link, value);
    }
}

/// Aggregates the final functional trust of `of` about some capability.
///
/// Each direct functional opinion is fused in, discounted by `of`'s final
/// referral trust in its subject.
pub fn evaluate_functional_trust<C>(
    context: &C,
    of: u64,
    functional: &DirectFunctionalTrust,
) -> Opinion
where
    C: EvaluationContext + ?Sized,
{
    let mut result = Opinion::FULL_UNCERTAINTY;
    for (&subject, opinion) in functional {
        let alpha = context.discount(&context.final_referral(&Link::new(of, subject)));
        result.fuse_discounted(alpha, opinion);
    }
    result
}
