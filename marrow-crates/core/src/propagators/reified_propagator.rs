use enumset::EnumSet;

use crate::basic_types::Contradiction;
use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::notifications::DomainEvents;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::NotificationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::reversible::ReversibleBool;
use crate::engine::reversible::ReversibleInt;
use crate::engine::variables::Literal;

const UNRESOLVED: i32 = 0;
const POSITIVE_ACTIVE: i32 = 1;
const NEGATIVE_ACTIVE: i32 = 2;

/// A [`PropagatorConstructor`] for the [`ReifiedPropagator`].
///
/// Without a negative side the result propagates `reification_literal -> positive` only.
#[derive(Clone, Debug)]
pub(crate) struct ReifiedPropagatorArgs<Positive, Negative> {
    pub(crate) positive: Positive,
    pub(crate) negative: Option<Negative>,
    pub(crate) reification_literal: Literal,
}

impl<Positive, Negative> PropagatorConstructor for ReifiedPropagatorArgs<Positive, Negative>
where
    Positive: PropagatorConstructor,
    Negative: PropagatorConstructor,
{
    type PropagatorImpl = ReifiedPropagator<Positive::PropagatorImpl, Negative::PropagatorImpl>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let ReifiedPropagatorArgs {
            positive,
            negative,
            reification_literal,
        } = self;

        let positive = positive.create(context.reborrow());
        let reification_literal_id = context.get_next_local_id();

        context.register(
            reification_literal,
            DomainEvents::ASSIGN,
            reification_literal_id,
        );

        let negative_offset = reification_literal_id.next().unpack();
        let negative =
            negative.map(|negative| negative.create(context.with_offset(negative_offset)));

        let name = match &negative {
            Some(negative) => format!("Reified({}, {})", positive.name(), negative.name()),
            None => format!("Implied({})", positive.name()),
        };

        ReifiedPropagator {
            positive: Side::new(positive, &mut context),
            negative: negative.map(|negative| Side::new(negative, &mut context)),
            reification_literal,
            reification_literal_id,
            negative_offset,
            state: context.new_reversible_int(UNRESOLVED),
            name,
        }
    }
}

/// One of the two propagators of a reification, with its own activity flag.
#[derive(Clone, Debug)]
struct Side<P> {
    propagator: P,
    activity: ReversibleBool,
}

impl<P: Propagator> Side<P> {
    fn new(propagator: P, context: &mut PropagatorConstructorContext<'_>) -> Self {
        Side {
            propagator,
            activity: context.new_reversible_bool(true),
        }
    }

    fn propagate(
        &mut self,
        context: &mut PropagationContextMut,
        events: EnumSet<IntDomainEvent>,
    ) -> PropagationStatus {
        if context.read(self.activity) {
            self.propagator
                .propagate(context.nested(events, self.activity))?;
        }

        if !context.read(self.activity) {
            context.set_passive();
        }

        Ok(())
    }
}

/// Propagator for `reification_literal <-> positive`, where `negative` propagates the negation
/// of `positive`.
///
/// While the literal is unassigned, the entailment of both sides is checked: a side which
/// holds or is violated fixes the literal. Once the literal is fixed the reification is
/// resolved for the rest of the subtree, and only the active side runs. Resolution is stored in
/// a reversible cell, so backtracking above it makes the reification unresolved again.
#[derive(Clone, Debug)]
pub(crate) struct ReifiedPropagator<Positive, Negative> {
    positive: Side<Positive>,
    negative: Option<Side<Negative>>,
    reification_literal: Literal,
    /// Larger than every id registered by the positive side, smaller than every id of the
    /// negative side.
    reification_literal_id: LocalId,
    negative_offset: u32,
    state: ReversibleInt,
    name: String,
}

impl<Positive: Propagator, Negative: Propagator> ReifiedPropagator<Positive, Negative> {
    /// Work out which side applies under the current domains, fixing the literal when one side
    /// decides it.
    fn resolve(&self, context: &mut PropagationContextMut) -> Result<i32, Contradiction> {
        if self.reification_literal.is_true(context.domains()) {
            return Ok(POSITIVE_ACTIVE);
        }
        if self.reification_literal.is_false(context.domains()) {
            return Ok(NEGATIVE_ACTIVE);
        }

        let positive = self.positive.propagator.is_entailed(context.domains());
        let Some(negative) = self.negative.as_ref() else {
            match positive {
                Entailment::False => {
                    let _ = context.post(self.reification_literal.get_false_predicate())?;
                    return Ok(NEGATIVE_ACTIVE);
                }
                Entailment::True => context.set_passive(),
                Entailment::Undefined => {}
            }
            return Ok(UNRESOLVED);
        };
        let negative = negative.propagator.is_entailed(context.domains());

        match (positive, negative) {
            (Entailment::False, Entailment::False) => {
                Err(context.conflict("both sides of the reification are violated"))
            }
            (Entailment::True, _) | (_, Entailment::False) => {
                let _ = context.post(self.reification_literal.get_true_predicate())?;
                Ok(POSITIVE_ACTIVE)
            }
            (Entailment::False, _) | (_, Entailment::True) => {
                let _ = context.post(self.reification_literal.get_false_predicate())?;
                Ok(NEGATIVE_ACTIVE)
            }
            (Entailment::Undefined, Entailment::Undefined) => Ok(UNRESOLVED),
        }
    }
}

impl<Positive, Negative> Propagator for ReifiedPropagator<Positive, Negative>
where
    Positive: Propagator,
    Negative: Propagator,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> Priority {
        self.positive.propagator.priority()
    }

    fn notify(
        &mut self,
        mut context: NotificationContext,
        local_id: LocalId,
        event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        if local_id == self.reification_literal_id {
            return EnqueueDecision::Enqueue;
        }

        let state = context.read(self.state);
        let decision = if local_id < self.reification_literal_id {
            if state == NEGATIVE_ACTIVE || !context.read(self.positive.activity) {
                return EnqueueDecision::Skip;
            }
            self.positive
                .propagator
                .notify(context.reborrow(), local_id, event)
        } else {
            let Some(negative) = self.negative.as_mut() else {
                return EnqueueDecision::Skip;
            };
            let Some(negative_id) = local_id.unshifted_by(self.negative_offset) else {
                panic!("{local_id} is neither the literal nor a variable of a side");
            };
            if state == POSITIVE_ACTIVE || !context.read(negative.activity) {
                return EnqueueDecision::Skip;
            }
            negative
                .propagator
                .notify(context.reborrow(), negative_id, event)
        };

        if state == UNRESOLVED {
            // Any change can decide the entailment of a side.
            EnqueueDecision::Enqueue
        } else {
            decision
        }
    }

    fn synchronise(&mut self, domains: Domains<'_>) {
        self.positive.propagator.synchronise(domains);
        if let Some(negative) = self.negative.as_mut() {
            negative.propagator.synchronise(domains);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let mut events = context.events();
        let mut state = context.read(self.state);

        if state == UNRESOLVED {
            state = self.resolve(&mut context)?;
            if state == UNRESOLVED {
                return Ok(());
            }
            context.write(self.state, state);
            // The active side has not seen the events which happened before resolution.
            events = EnumSet::all();
        }

        match (state, self.negative.as_mut()) {
            (POSITIVE_ACTIVE, _) => self.positive.propagate(&mut context, events),
            (_, Some(negative)) => negative.propagate(&mut context, events),
            (_, None) => {
                context.set_passive();
                Ok(())
            }
        }
    }

    fn is_entailed(&self, domains: Domains<'_>) -> Entailment {
        if self.reification_literal.is_true(domains) {
            self.positive.propagator.is_entailed(domains)
        } else if self.reification_literal.is_false(domains) {
            self.negative
                .as_ref()
                .map_or(Entailment::True, |negative| {
                    negative.propagator.is_entailed(domains)
                })
        } else {
            Entailment::Undefined
        }
    }
}
