use super::DomainStore;
use crate::engine::reversible::Environment;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;

/// A read-only view of all domains at the current world.
#[derive(Clone, Copy, Debug)]
pub struct Domains<'a> {
    environment: &'a Environment,
    store: &'a DomainStore,
}

impl<'a> Domains<'a> {
    pub(crate) fn new(environment: &'a Environment, store: &'a DomainStore) -> Self {
        Domains { environment, store }
    }

    pub fn environment(&self) -> &'a Environment {
        self.environment
    }

    pub fn store(&self) -> &'a DomainStore {
        self.store
    }

    pub fn lower_bound_of(&self, domain: DomainId) -> i32 {
        self.store.lower_bound(self.environment, domain)
    }

    pub fn upper_bound_of(&self, domain: DomainId) -> i32 {
        self.store.upper_bound(self.environment, domain)
    }

    pub fn contains_value(&self, domain: DomainId, value: i32) -> bool {
        self.store.contains(self.environment, domain, value)
    }

    pub fn size_of(&self, domain: DomainId) -> u64 {
        self.store.size(self.environment, domain)
    }

    pub fn values_of(&self, domain: DomainId) -> impl Iterator<Item = i32> + 'a {
        self.store.values(self.environment, domain)
    }

    pub fn is_fixed_domain(&self, domain: DomainId) -> bool {
        self.lower_bound_of(domain) == self.upper_bound_of(domain)
    }

    /// Whether every domain created through the model has a single value.
    pub fn all_fixed(&self) -> bool {
        self.store.domain_ids().all(|domain| self.is_fixed_domain(domain))
    }
}

/// Read access to variables, shared by every context that can observe the domains.
pub trait ReadDomains {
    fn domains(&self) -> Domains<'_>;

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.domains())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.domains())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.domains(), value)
    }

    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        var.is_fixed(self.domains())
    }

    fn size<Var: IntegerVariable>(&self, var: &Var) -> u64 {
        var.size(self.domains())
    }
}

impl ReadDomains for Domains<'_> {
    fn domains(&self) -> Domains<'_> {
        *self
    }
}
