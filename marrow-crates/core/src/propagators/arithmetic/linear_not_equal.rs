use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::notifications::DomainEvents;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`LinearNotEqualPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct LinearNotEqualPropagatorArgs<Var> {
    pub(crate) terms: Box<[Var]>,
    pub(crate) rhs: i32,
}

impl<Var> PropagatorConstructor for LinearNotEqualPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = LinearNotEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearNotEqualPropagatorArgs { terms, rhs } = self;

        for (i, term) in terms.iter().enumerate() {
            context.register(term.clone(), DomainEvents::BOUNDS, LocalId::from(i as u32));
        }

        LinearNotEqualPropagator { terms, rhs }
    }
}

/// Propagator for the constraint `\sum terms != rhs`.
///
/// Nothing can be deduced until at most one term is unfixed; the value which would make the
/// sum equal to `rhs` is then removed from that term.
#[derive(Clone, Debug)]
pub(crate) struct LinearNotEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var> Propagator for LinearNotEqualPropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "LinearNe"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let mut fixed_lhs = 0_i64;
        let mut unfixed = None;

        for term in self.terms.iter() {
            if context.is_fixed(term) {
                fixed_lhs += i64::from(context.lower_bound(term));
            } else if unfixed.is_some() {
                return Ok(());
            } else {
                unfixed = Some(term);
            }
        }

        let remaining = i64::from(self.rhs) - fixed_lhs;
        match unfixed {
            None if remaining == 0 => Err(context.conflict("the sum equals the right-hand side")),
            None => {
                context.set_passive();
                Ok(())
            }
            Some(term) => {
                if let Ok(value) = i32::try_from(remaining) {
                    let _ = context.remove(term, value)?;
                    if context.contains(term, value) {
                        // An interval domain keeps interior values; retry once a bound reaches it.
                        return Ok(());
                    }
                }
                context.set_passive();
                Ok(())
            }
        }
    }

    fn is_entailed(&self, domains: Domains<'_>) -> Entailment {
        let rhs = i64::from(self.rhs);
        let (lower_bound, upper_bound) = self.terms.iter().fold((0_i64, 0_i64), |(l, u), term| {
            (
                l + i64::from(domains.lower_bound(term)),
                u + i64::from(domains.upper_bound(term)),
            )
        });

        if lower_bound > rhs || upper_bound < rhs {
            Entailment::True
        } else if lower_bound == upper_bound {
            Entailment::False
        } else {
            Entailment::Undefined
        }
    }
}
