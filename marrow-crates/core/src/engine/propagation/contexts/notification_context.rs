use crate::engine::domains::DomainStore;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::reversible::Environment;
use crate::engine::reversible::ReversibleCell;

/// Provided to the propagator when it is notified of a domain event.
///
/// Domains can be read through the implementation of [`ReadDomains`], and reversible cells of
/// the propagator can be updated. It is not possible to change domains in the notify callback.
#[derive(Debug)]
pub struct NotificationContext<'a> {
    environment: &'a mut Environment,
    domain_store: &'a DomainStore,
}

impl<'a> NotificationContext<'a> {
    pub(crate) fn new(environment: &'a mut Environment, domain_store: &'a DomainStore) -> Self {
        NotificationContext {
            environment,
            domain_store,
        }
    }

    pub fn read<Cell: ReversibleCell>(&self, cell: Cell) -> Cell::Value {
        self.environment.read(cell)
    }

    pub fn write<Cell: ReversibleCell>(&mut self, cell: Cell, value: Cell::Value) {
        self.environment.write(cell, value);
    }

    pub fn reborrow(&mut self) -> NotificationContext<'_> {
        NotificationContext {
            environment: self.environment,
            domain_store: self.domain_store,
        }
    }
}

impl ReadDomains for NotificationContext<'_> {
    fn domains(&self) -> Domains<'_> {
        Domains::new(self.environment, self.domain_store)
    }
}
