use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::notifications::DomainEvents;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::NotificationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::reversible::ReversibleInt;
use crate::engine::reversible::ReversibleLong;
use crate::engine::variables::IntegerVariable;
use crate::marrow_assert_moderate;

/// The [`PropagatorConstructor`] for the [`LinearLessOrEqualPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagatorArgs<Var> {
    pub(crate) x: Box<[Var]>,
    pub(crate) c: i32,
}

impl<Var> PropagatorConstructor for LinearLessOrEqualPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = LinearLessOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearLessOrEqualPropagatorArgs { x, c } = self;

        let mut lower_bound_left_hand_side = 0_i64;
        let mut current_bounds = vec![];

        for (i, x_i) in x.iter().enumerate() {
            context.register(
                x_i.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(i as u32),
            );

            let lower_bound = context.lower_bound(x_i);
            lower_bound_left_hand_side += i64::from(lower_bound);
            current_bounds.push(context.new_reversible_int(lower_bound));
        }

        let lower_bound_left_hand_side = context.new_reversible_long(lower_bound_left_hand_side);

        LinearLessOrEqualPropagator {
            x,
            c,
            lower_bound_left_hand_side,
            current_bounds: current_bounds.into(),
        }
    }
}

/// Propagator for the constraint `\sum x_i <= c`.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagator<Var> {
    x: Box<[Var]>,
    c: i32,

    /// The lower bound of the sum of the left-hand side. This is incremental state.
    lower_bound_left_hand_side: ReversibleLong,
    /// The value at index `i` is the bound for `x[i]` included in the sum.
    current_bounds: Box<[ReversibleInt]>,
}

impl<Var: IntegerVariable> LinearLessOrEqualPropagator<Var> {
    fn upper_bound_left_hand_side(&self, domains: Domains<'_>) -> i64 {
        self.x
            .iter()
            .map(|x_i| i64::from(domains.upper_bound(x_i)))
            .sum()
    }

    /// Fold lower bounds that moved since they were last recorded into the incremental sum.
    /// Returns whether any did.
    fn absorb_raised_lower_bounds(&self, context: &mut PropagationContextMut) -> bool {
        let mut raised = false;
        for (x_i, &current_bound) in self.x.iter().zip(self.current_bounds.iter()) {
            let old_bound = context.read(current_bound);
            let new_bound = context.lower_bound(x_i);
            if new_bound != old_bound {
                let sum = context.read(self.lower_bound_left_hand_side);
                context.write(
                    self.lower_bound_left_hand_side,
                    sum + i64::from(new_bound) - i64::from(old_bound),
                );
                context.write(current_bound, new_bound);
                raised = true;
            }
        }
        raised
    }
}

impl<Var> Propagator for LinearLessOrEqualPropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn is_idempotent(&self) -> bool {
        true
    }

    fn notify(
        &mut self,
        mut context: NotificationContext,
        local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;
        let x_i = &self.x[index];

        let old_bound = context.read(self.current_bounds[index]);
        let new_bound = context.lower_bound(x_i);
        marrow_assert_moderate!(
            old_bound <= new_bound,
            "lower bounds only increase between notifications, old_bound={old_bound}, new_bound={new_bound}"
        );

        let sum = context.read(self.lower_bound_left_hand_side);
        context.write(
            self.lower_bound_left_hand_side,
            sum + i64::from(new_bound) - i64::from(old_bound),
        );
        context.write(self.current_bounds[index], new_bound);

        EnqueueDecision::Enqueue
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let c = i64::from(self.c);

        loop {
            let lower_bound_left_hand_side = context.read(self.lower_bound_left_hand_side);
            if lower_bound_left_hand_side > c {
                return Err(
                    context.conflict("the lower bound of the sum exceeds the right-hand side")
                );
            }

            for x_i in self.x.iter() {
                // Always at least the lower bound of `x_i`, so it fits an `i32` whenever it is
                // below the upper bound.
                let bound =
                    c - (lower_bound_left_hand_side - i64::from(context.lower_bound(x_i)));

                if i64::from(context.upper_bound(x_i)) > bound {
                    let _ = context.set_upper_bound(x_i, bound as i32)?;
                }
            }

            // A domain occurring in several terms can have its lower bound raised by the
            // upper bounds set above. Those events are not delivered back to this propagator.
            if !self.absorb_raised_lower_bounds(&mut context) {
                break;
            }
        }

        if self.upper_bound_left_hand_side(context.domains()) <= c {
            context.set_passive();
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains<'_>) -> Entailment {
        let c = i64::from(self.c);
        let lower_bound: i64 = self
            .x
            .iter()
            .map(|x_i| i64::from(domains.lower_bound(x_i)))
            .sum();

        if self.upper_bound_left_hand_side(domains) <= c {
            Entailment::True
        } else if lower_bound > c {
            Entailment::False
        } else {
            Entailment::Undefined
        }
    }
}
