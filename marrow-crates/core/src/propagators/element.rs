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

const ID_INDEX: LocalId = LocalId::from(0);
const ID_RHS: LocalId = LocalId::from(1);

/// The [`PropagatorConstructor`] for the [`ElementPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct ElementPropagatorArgs<VI, VE> {
    pub(crate) index: VI,
    pub(crate) table: Box<[i32]>,
    pub(crate) rhs: VE,
}

impl<VI, VE> PropagatorConstructor for ElementPropagatorArgs<VI, VE>
where
    VI: IntegerVariable,
    VE: IntegerVariable,
{
    type PropagatorImpl = ElementPropagator<VI, VE>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let ElementPropagatorArgs { index, table, rhs } = self;

        context.register(index.clone(), DomainEvents::ANY_INT, ID_INDEX);
        context.register(rhs.clone(), DomainEvents::BOUNDS, ID_RHS);

        ElementPropagator { index, table, rhs }
    }
}

/// Propagator for the constraint `table[index] = rhs` over a constant table.
///
/// An index value is supported when its table entry lies within the bounds of `rhs`. The
/// propagator alternates between restricting `rhs` to the entries of the supported indices and
/// removing the unsupported indices, until neither changes a domain.
#[derive(Clone, Debug)]
pub(crate) struct ElementPropagator<VI, VE> {
    index: VI,
    table: Box<[i32]>,
    rhs: VE,
}

impl<VI: IntegerVariable, VE: IntegerVariable> ElementPropagator<VI, VE> {
    fn is_supported(&self, domains: Domains<'_>, index: i32) -> bool {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.table.get(index))
            .is_some_and(|&value| {
                domains.lower_bound(&self.rhs) <= value && value <= domains.upper_bound(&self.rhs)
            })
    }
}

impl<VI, VE> Propagator for ElementPropagator<VI, VE>
where
    VI: IntegerVariable,
    VE: IntegerVariable,
{
    fn name(&self) -> &str {
        "Element"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn is_idempotent(&self) -> bool {
        true
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let last_index = i32::try_from(self.table.len()).unwrap_or(i32::MAX) - 1;
        let _ = context.set_lower_bound(&self.index, 0)?;
        let _ = context.set_upper_bound(&self.index, last_index)?;

        loop {
            let (supported, unsupported): (Vec<i32>, Vec<i32>) = self
                .index
                .iterate_domain(context.domains())
                .partition(|&index| self.is_supported(context.domains(), index));

            // Bottom-up: the supported entries bound the right-hand side.
            let entries = supported.iter().map(|&index| self.table[index as usize]);
            let (Some(min), Some(max)) = (entries.clone().min(), entries.max()) else {
                return Err(context.conflict("no index has its entry in the domain of the rhs"));
            };

            let mut changed = context.set_lower_bound(&self.rhs, min)?;
            changed |= context.set_upper_bound(&self.rhs, max)?;

            // Top-down: indices whose entry lies outside the bounds are removed.
            for index in unsupported {
                changed |= context.remove(&self.index, index)?;
            }

            if !changed {
                break;
            }
        }

        if context.is_fixed(&self.index) {
            context.set_passive();
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains<'_>) -> Entailment {
        let mut supported = self
            .index
            .iterate_domain(domains)
            .filter(|&index| self.is_supported(domains, index));

        match supported.next() {
            None => Entailment::False,
            Some(index)
                if domains.is_fixed(&self.index)
                    && domains.is_fixed(&self.rhs)
                    && domains.lower_bound(&self.rhs) == self.table[index as usize] =>
            {
                Entailment::True
            }
            Some(_) => Entailment::Undefined,
        }
    }
}
