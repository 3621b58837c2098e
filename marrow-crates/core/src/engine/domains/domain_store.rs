use log::trace;

use super::int_domain::IntDomain;
use super::variable_names::VariableNames;
use crate::basic_types::EmptyDomain;
use crate::basic_types::ModelError;
use crate::containers::KeyedVec;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateType;
use crate::engine::propagation::PropagatorId;
use crate::engine::reversible::Environment;
use crate::engine::variables::DomainId;

/// The result of a domain mutation: whether the domain changed, or the contradiction of
/// emptying it. A failed mutation leaves the domain as it was.
pub type DomainUpdate = Result<bool, EmptyDomain>;

/// An event produced by a domain mutation, waiting to be delivered to the watchers of the
/// domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DomainEventRecord {
    pub(crate) domain: DomainId,
    pub(crate) event: IntDomainEvent,
    pub(crate) cause: Option<PropagatorId>,
}

/// Owns every integer domain of a model.
///
/// The state of the domains lives in the cells of an [`Environment`], so that all changes are
/// undone when the environment pops. Domain 0 is a dummy fixed to one, used to express
/// trivially true and false predicates.
#[derive(Debug)]
pub struct DomainStore {
    domains: KeyedVec<DomainId, IntDomain>,
    names: VariableNames,
    events: Vec<DomainEventRecord>,
}

impl DomainStore {
    pub(crate) fn new(environment: &mut Environment) -> Self {
        let mut store = DomainStore {
            domains: KeyedVec::default(),
            names: VariableNames::default(),
            events: Vec::new(),
        };
        let _ = store.domains.push(IntDomain::interval(environment, 1, 1));
        store
    }

    /// The number of domains, including the dummy domain.
    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    /// All domains created through the model, in creation order. The dummy domain is excluded.
    pub fn domain_ids(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.domains.keys().skip(1)
    }

    pub(crate) fn domains_including_dummy(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.domains.keys()
    }

    pub fn name(&self, domain: DomainId) -> Option<&str> {
        self.names.name_of(domain)
    }

    pub fn domain_by_name(&self, name: &str) -> Option<DomainId> {
        self.names.domain_named(name)
    }

    pub(crate) fn new_interval(
        &mut self,
        environment: &mut Environment,
        lower_bound: i32,
        upper_bound: i32,
        name: Option<String>,
    ) -> Result<DomainId, ModelError> {
        if lower_bound > upper_bound {
            return Err(ModelError::EmptyDomain {
                lower_bound,
                upper_bound,
            });
        }

        let domain = self
            .domains
            .push(IntDomain::interval(environment, lower_bound, upper_bound));
        self.record_name(domain, name);
        Ok(domain)
    }

    /// Create a domain containing exactly `values`. Duplicates are ignored; a contiguous set of
    /// values gives an interval domain.
    pub(crate) fn new_sparse(
        &mut self,
        environment: &mut Environment,
        mut values: Vec<i32>,
        name: Option<String>,
    ) -> Result<DomainId, ModelError> {
        values.sort_unstable();
        values.dedup();

        let (Some(&lower_bound), Some(&upper_bound)) = (values.first(), values.last()) else {
            return Err(ModelError::EmptyValueSet);
        };

        if upper_bound as i64 - lower_bound as i64 + 1 == values.len() as i64 {
            return self.new_interval(environment, lower_bound, upper_bound, name);
        }

        let domain = self.domains.push(IntDomain::sparse(environment, &values));
        self.record_name(domain, name);
        Ok(domain)
    }

    fn record_name(&mut self, domain: DomainId, name: Option<String>) {
        if let Some(name) = name {
            self.names.insert(domain, name);
        }
    }

    pub(crate) fn lower_bound(&self, environment: &Environment, domain: DomainId) -> i32 {
        self.domains[domain].lower_bound(environment)
    }

    pub(crate) fn upper_bound(&self, environment: &Environment, domain: DomainId) -> i32 {
        self.domains[domain].upper_bound(environment)
    }

    pub(crate) fn size(&self, environment: &Environment, domain: DomainId) -> u64 {
        self.domains[domain].size(environment)
    }

    pub(crate) fn contains(&self, environment: &Environment, domain: DomainId, value: i32) -> bool {
        self.domains[domain].contains(environment, value)
    }

    pub(crate) fn values<'a>(
        &'a self,
        environment: &'a Environment,
        domain: DomainId,
    ) -> impl Iterator<Item = i32> + 'a {
        self.domains[domain].values(environment)
    }

    pub(crate) fn update_lower_bound(
        &mut self,
        environment: &mut Environment,
        domain: DomainId,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> DomainUpdate {
        let int_domain = &self.domains[domain];
        if value <= int_domain.lower_bound(environment) {
            return Ok(false);
        }

        let new_lower_bound = int_domain
            .raise_lower_bound(environment, value)
            .ok_or(EmptyDomain)?;
        trace!("{domain} >= {new_lower_bound} (requested {value}, cause {cause:?})");

        self.emit(domain, IntDomainEvent::LowerBound, cause);
        if new_lower_bound == self.domains[domain].upper_bound(environment) {
            self.emit(domain, IntDomainEvent::Assign, cause);
        }
        Ok(true)
    }

    pub(crate) fn update_upper_bound(
        &mut self,
        environment: &mut Environment,
        domain: DomainId,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> DomainUpdate {
        let int_domain = &self.domains[domain];
        if value >= int_domain.upper_bound(environment) {
            return Ok(false);
        }

        let new_upper_bound = int_domain
            .lower_upper_bound(environment, value)
            .ok_or(EmptyDomain)?;
        trace!("{domain} <= {new_upper_bound} (requested {value}, cause {cause:?})");

        self.emit(domain, IntDomainEvent::UpperBound, cause);
        if new_upper_bound == self.domains[domain].lower_bound(environment) {
            self.emit(domain, IntDomainEvent::Assign, cause);
        }
        Ok(true)
    }

    pub(crate) fn remove_value(
        &mut self,
        environment: &mut Environment,
        domain: DomainId,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> DomainUpdate {
        let int_domain = &self.domains[domain];
        let lower_bound = int_domain.lower_bound(environment);
        let upper_bound = int_domain.upper_bound(environment);

        if value < lower_bound || value > upper_bound {
            Ok(false)
        } else if lower_bound == upper_bound {
            Err(EmptyDomain)
        } else if value == lower_bound {
            self.update_lower_bound(environment, domain, value + 1, cause)
        } else if value == upper_bound {
            self.update_upper_bound(environment, domain, value - 1, cause)
        } else if int_domain.remove_interior(environment, value) {
            trace!("{domain} != {value} (cause {cause:?})");
            self.emit(domain, IntDomainEvent::Removal, cause);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn instantiate_to(
        &mut self,
        environment: &mut Environment,
        domain: DomainId,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> DomainUpdate {
        if !self.contains(environment, domain, value) {
            return Err(EmptyDomain);
        }

        let raised = self.update_lower_bound(environment, domain, value, cause)?;
        let lowered = self.update_upper_bound(environment, domain, value, cause)?;
        Ok(raised || lowered)
    }

    /// Make `predicate` true.
    pub(crate) fn post(
        &mut self,
        environment: &mut Environment,
        predicate: Predicate,
        cause: Option<PropagatorId>,
    ) -> DomainUpdate {
        let domain = predicate.get_domain();
        let value = predicate.get_right_hand_side();

        match predicate.get_predicate_type() {
            PredicateType::LowerBound => self.update_lower_bound(environment, domain, value, cause),
            PredicateType::UpperBound => self.update_upper_bound(environment, domain, value, cause),
            PredicateType::NotEqual => self.remove_value(environment, domain, value, cause),
            PredicateType::Equal => self.instantiate_to(environment, domain, value, cause),
        }
    }

    pub(crate) fn is_interval(&self, domain: DomainId) -> bool {
        self.domains[domain].is_interval()
    }

    fn emit(&mut self, domain: DomainId, event: IntDomainEvent, cause: Option<PropagatorId>) {
        self.events.push(DomainEventRecord {
            domain,
            event,
            cause,
        });
    }

    pub(crate) fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub(crate) fn num_pending_events(&self) -> usize {
        self.events.len()
    }

    /// Take the pending events out of the store, leaving it with an empty buffer.
    pub(crate) fn take_events(&mut self) -> Vec<DomainEventRecord> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Environment, DomainStore) {
        let mut environment = Environment::default();
        let store = DomainStore::new(&mut environment);
        (environment, store)
    }

    fn events(store: &mut DomainStore) -> Vec<IntDomainEvent> {
        store
            .take_events()
            .into_iter()
            .map(|record| record.event)
            .collect()
    }

    #[test]
    fn the_dummy_domain_is_fixed_to_one() {
        let (environment, store) = store();
        let dummy = DomainId::new(0);

        assert_eq!(1, store.lower_bound(&environment, dummy));
        assert_eq!(1, store.upper_bound(&environment, dummy));
        assert_eq!(0, store.domain_ids().count());
    }

    #[test]
    fn empty_ranges_are_model_errors() {
        let (mut environment, mut store) = store();

        assert_eq!(
            Err(ModelError::EmptyDomain {
                lower_bound: 3,
                upper_bound: 2
            }),
            store.new_interval(&mut environment, 3, 2, None)
        );
        assert_eq!(
            Err(ModelError::EmptyValueSet),
            store.new_sparse(&mut environment, vec![], None)
        );
    }

    #[test]
    fn bounds_skip_holes_of_sparse_domains() {
        let (mut environment, mut store) = store();
        let x = store
            .new_sparse(&mut environment, vec![1, 4, 7, 9], None)
            .unwrap();

        assert_eq!(Ok(true), store.update_lower_bound(&mut environment, x, 2, None));
        assert_eq!(4, store.lower_bound(&environment, x));
        assert_eq!(3, store.size(&environment, x));

        assert_eq!(Ok(true), store.update_upper_bound(&mut environment, x, 8, None));
        assert_eq!(7, store.upper_bound(&environment, x));
        assert_eq!(2, store.size(&environment, x));
        assert_eq!(vec![4, 7], store.values(&environment, x).collect::<Vec<_>>());
    }

    #[test]
    fn bound_updates_emit_assign_when_fixing() {
        let (mut environment, mut store) = store();
        let x = store.new_interval(&mut environment, 0, 3, None).unwrap();

        assert_eq!(Ok(true), store.update_lower_bound(&mut environment, x, 3, None));
        assert_eq!(
            vec![IntDomainEvent::LowerBound, IntDomainEvent::Assign],
            events(&mut store)
        );
    }

    #[test]
    fn failed_updates_leave_the_domain_untouched() {
        let (mut environment, mut store) = store();
        let x = store
            .new_sparse(&mut environment, vec![0, 2, 5], None)
            .unwrap();

        assert_eq!(Err(EmptyDomain), store.update_lower_bound(&mut environment, x, 6, None));
        assert_eq!(Err(EmptyDomain), store.instantiate_to(&mut environment, x, 1, None));
        assert_eq!(3, store.size(&environment, x));
        assert_eq!(0, store.lower_bound(&environment, x));
        assert_eq!(5, store.upper_bound(&environment, x));
        assert!(events(&mut store).is_empty());
    }

    #[test]
    fn interior_removals_are_ignored_by_interval_domains() {
        let (mut environment, mut store) = store();
        let x = store.new_interval(&mut environment, 0, 4, None).unwrap();

        assert_eq!(Ok(false), store.remove_value(&mut environment, x, 2, None));
        assert_eq!(Ok(false), store.remove_value(&mut environment, x, 10, None));
        assert_eq!(Ok(true), store.remove_value(&mut environment, x, 0, None));
        assert_eq!(1, store.lower_bound(&environment, x));
        assert_eq!(vec![IntDomainEvent::LowerBound], events(&mut store));
    }

    #[test]
    fn interior_removals_punch_holes_in_sparse_domains() {
        let (mut environment, mut store) = store();
        let x = store
            .new_sparse(&mut environment, vec![0, 1, 2, 4], None)
            .unwrap();

        assert_eq!(Ok(true), store.remove_value(&mut environment, x, 1, None));
        assert!(!store.contains(&environment, x, 1));
        assert_eq!(vec![IntDomainEvent::Removal], events(&mut store));

        assert_eq!(Ok(true), store.remove_value(&mut environment, x, 0, None));
        assert_eq!(2, store.lower_bound(&environment, x));
    }

    #[test]
    fn removing_the_last_value_fails() {
        let (mut environment, mut store) = store();
        let x = store.new_interval(&mut environment, 3, 3, None).unwrap();

        assert_eq!(Err(EmptyDomain), store.remove_value(&mut environment, x, 3, None));
    }

    #[test]
    fn mutations_are_undone_on_pop() {
        let (mut environment, mut store) = store();
        let x = store
            .new_sparse(&mut environment, vec![1, 3, 5, 7], None)
            .unwrap();

        environment.push();
        assert_eq!(Ok(true), store.instantiate_to(&mut environment, x, 5, None));
        assert_eq!(1, store.size(&environment, x));

        environment.pop();
        assert_eq!(vec![1, 3, 5, 7], store.values(&environment, x).collect::<Vec<_>>());
        assert_eq!(4, store.size(&environment, x));
    }

    #[test]
    fn names_are_looked_up_both_ways() {
        let (mut environment, mut store) = store();
        let x = store
            .new_interval(&mut environment, 0, 1, Some("queen".to_owned()))
            .unwrap();

        assert_eq!(Some("queen"), store.name(x));
        assert_eq!(Some(x), store.domain_by_name("queen"));
    }
}
