//! Stateful evaluation of expression trees against a context.

use crate::{
    equation::{context::EvaluationContext, expression::Expression},
    error::EbslError,
    opinion::Opinion,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EvaluatorState {
    NotEvaluated,
    InConsensus,
    Evaluated,
}

/// Evaluates `expression` against `context` and returns a fresh opinion.
///
/// The walker enforces the expression shape as a three-state machine: leaves
/// and consensus lists are accepted from `NotEvaluated`, only leaves are
/// accepted inside a consensus, and nothing is accepted after the root
/// evaluated. Every violation, including a final state other than
/// `Evaluated`, yields [`EbslError::InvalidExpression`].
///
/// The result never aliases the context's stored opinions: direct referral
/// lookups are copied before any mutation.
pub fn evaluate_expression<C>(context: &C, expression: &Expression) -> Result<Opinion, EbslError>
where
    C: EvaluationContext + ?Sized,
{
    let mut evaluator = ExpressionEvaluator {
        context,
        result: Opinion::FULL_UNCERTAINTY,
        state: EvaluatorState::NotEvaluated,
    };
    evaluator.walk(expression)?;
    if evaluator.state != EvaluatorState::Evaluated {
        return Err(EbslError::InvalidExpression);
    }
    Ok(evaluator.result)
}

struct ExpressionEvaluator<'a, C: ?Sized> {
    context: &'a C,
    result: Opinion,
    state: EvaluatorState,
}

impl<C> ExpressionEvaluator<'_, C>
where
    C: EvaluationContext + ?Sized,
{
    fn walk(&mut self, expression: &Expression) -> Result<(), EbslError> {
        match expression {
            Expression::FullUncertainty => match self.state {
                EvaluatorState::NotEvaluated => {
                    self.result = Opinion::FULL_UNCERTAINTY;
                    self.state = EvaluatorState::Evaluated;
                    Ok(())
                }
                _ => Err(EbslError::InvalidExpression),
            },
            Expression::Direct(a) => match self.state {
                EvaluatorState::NotEvaluated => {
                    self.result = self.context.direct(a)?;
                    self.state = EvaluatorState::Evaluated;
                    Ok(())
                }
                EvaluatorState::InConsensus => {
                    let direct = self.context.direct(a)?;
                    self.result.fuse(&direct);
                    Ok(())
                }
                EvaluatorState::Evaluated => Err(EbslError::InvalidExpression),
            },
            Expression::Discount { r, a } => match self.state {
                EvaluatorState::NotEvaluated => {
                    let alpha = self.context.discount(&self.context.final_referral(r));
                    let mut direct = self.context.direct(a)?;
                    direct.discount_by(alpha);
                    self.result = direct;
                    self.state = EvaluatorState::Evaluated;
                    Ok(())
                }
                EvaluatorState::InConsensus => {
                    let alpha = self.context.discount(&self.context.final_referral(r));
                    let direct = self.context.direct(a)?;
                    self.result.fuse_discounted(alpha, &direct);
                    Ok(())
                }
                EvaluatorState::Evaluated => Err(EbslError::InvalidExpression),
            },
            Expression::Consensus(children) => match self.state {
                EvaluatorState::NotEvaluated => {
                    self.state = EvaluatorState::InConsensus;
                    self.result = Opinion::FULL_UNCERTAINTY;
                    for child in children {
                        self.walk(child)?;
                    }
                    self.state = EvaluatorState::Evaluated;
                    Ok(())
                }
                // Nested consensus lists are rejected.
                _ => Err(EbslError::InvalidExpression),
            },
        }
    }
}
