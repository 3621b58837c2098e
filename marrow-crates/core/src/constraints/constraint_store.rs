use crate::basic_types::Entailment;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::domains::Domains;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorStore;

/// Identifies a constraint added through [`Solver::add_constraint`].
///
/// [`Solver::add_constraint`]: crate::Solver::add_constraint
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConstraintId(u32);

impl StorageKey for ConstraintId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintId(index as u32)
    }
}

impl std::fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Clone, Debug, Default)]
struct ConstraintInfo {
    name: Option<String>,
    propagators: Vec<PropagatorId>,
}

/// The arena relating constraints to the propagators which enforce them.
///
/// The relation is many-to-many in spirit but stored one way: a propagator knows its
/// constraint through its scheduling information, and a constraint lists its propagators here.
#[derive(Clone, Debug, Default)]
pub(crate) struct ConstraintStore {
    constraints: KeyedVec<ConstraintId, ConstraintInfo>,
}

impl ConstraintStore {
    pub(crate) fn new_constraint(&mut self, name: Option<String>) -> ConstraintId {
        self.constraints.push(ConstraintInfo {
            name,
            propagators: vec![],
        })
    }

    pub(crate) fn add_propagator(&mut self, constraint: ConstraintId, propagator: PropagatorId) {
        self.constraints[constraint].propagators.push(propagator);
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.constraints.keys()
    }

    pub(crate) fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn name(&self, constraint: ConstraintId) -> Option<&str> {
        self.constraints[constraint].name.as_deref()
    }

    pub(crate) fn propagators(&self, constraint: ConstraintId) -> &[PropagatorId] {
        &self.constraints[constraint].propagators
    }

    /// A name for messages: the given name, or the id.
    pub(crate) fn describe(&self, constraint: ConstraintId) -> String {
        self.name(constraint)
            .map_or_else(|| constraint.to_string(), |name| format!("'{name}'"))
    }

    /// The conjunction of the entailment of the propagators of `constraint`.
    pub(crate) fn entailment(
        &self,
        constraint: ConstraintId,
        propagators: &PropagatorStore,
        domains: Domains<'_>,
    ) -> Entailment {
        self.propagators(constraint)
            .iter()
            .map(|&propagator| propagators[propagator].is_entailed(domains))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_are_described_by_name_or_id() {
        let mut store = ConstraintStore::default();
        let named = store.new_constraint(Some("capacity".to_owned()));
        let anonymous = store.new_constraint(None);

        assert_eq!("'capacity'", store.describe(named));
        assert_eq!("c1", store.describe(anonymous));
        assert_eq!(2, store.num_constraints());
    }

    #[test]
    fn propagators_are_recorded_per_constraint() {
        let mut store = ConstraintStore::default();
        let first = store.new_constraint(None);
        let second = store.new_constraint(None);

        store.add_propagator(first, PropagatorId(0));
        store.add_propagator(first, PropagatorId(1));
        store.add_propagator(second, PropagatorId(2));

        assert_eq!(&[PropagatorId(0), PropagatorId(1)], store.propagators(first));
        assert_eq!(&[PropagatorId(2)], store.propagators(second));
    }
}
