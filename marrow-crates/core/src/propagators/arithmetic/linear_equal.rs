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

/// The [`PropagatorConstructor`] for the [`LinearEqualPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct LinearEqualPropagatorArgs<Var> {
    pub(crate) x: Box<[Var]>,
    pub(crate) c: i32,
}

impl<Var> PropagatorConstructor for LinearEqualPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = LinearEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearEqualPropagatorArgs { x, c } = self;

        for (i, x_i) in x.iter().enumerate() {
            context.register(x_i.clone(), DomainEvents::BOUNDS, LocalId::from(i as u32));
        }

        LinearEqualPropagator { x, c }
    }
}

/// Bounds consistent propagator for the constraint `\sum x_i = c`.
#[derive(Clone, Debug)]
pub(crate) struct LinearEqualPropagator<Var> {
    x: Box<[Var]>,
    c: i32,
}

impl<Var: IntegerVariable> LinearEqualPropagator<Var> {
    fn bounds_left_hand_side(&self, domains: Domains<'_>) -> (i64, i64) {
        self.x.iter().fold((0, 0), |(lower, upper), x_i| {
            (
                lower + i64::from(domains.lower_bound(x_i)),
                upper + i64::from(domains.upper_bound(x_i)),
            )
        })
    }
}

impl<Var> Propagator for LinearEqualPropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "LinearEq"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let c = i64::from(self.c);
        let (lower_bound, upper_bound) = self.bounds_left_hand_side(context.domains());

        if lower_bound > c || upper_bound < c {
            return Err(context.conflict("the right-hand side is outside the bounds of the sum"));
        }

        for x_i in self.x.iter() {
            let x_lb = i64::from(context.lower_bound(x_i));
            let x_ub = i64::from(context.upper_bound(x_i));

            // Both bounds lie within the current domain of `x_i`, so they fit an `i32`.
            let new_upper_bound = c - (lower_bound - x_lb);
            if new_upper_bound < x_ub {
                let _ = context.set_upper_bound(x_i, new_upper_bound as i32)?;
            }

            let new_lower_bound = c - (upper_bound - x_ub);
            if new_lower_bound > x_lb {
                let _ = context.set_lower_bound(x_i, new_lower_bound as i32)?;
            }
        }

        if self.x.iter().all(|x_i| context.is_fixed(x_i)) {
            context.set_passive();
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains<'_>) -> Entailment {
        let c = i64::from(self.c);
        let (lower_bound, upper_bound) = self.bounds_left_hand_side(domains);

        if lower_bound > c || upper_bound < c {
            Entailment::False
        } else if lower_bound == upper_bound {
            Entailment::True
        } else {
            Entailment::Undefined
        }
    }
}
