use crate::basic_types::Random;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::variables::DomainId;

/// The context provided to the [`Brancher`], it allows the retrieval of domain values of
/// variables and access to methods from a [`Random`] generator.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    domains: Domains<'a>,
    random_generator: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub fn new(domains: Domains<'a>, rng: &'a mut dyn Random) -> Self {
        SelectionContext {
            domains,
            random_generator: rng,
        }
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }

    /// Returns all domains created through the model.
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + 'a {
        self.domains.store().domain_ids()
    }
}

impl ReadDomains for SelectionContext<'_> {
    fn domains(&self) -> Domains<'_> {
        self.domains
    }
}
