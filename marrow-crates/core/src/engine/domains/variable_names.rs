use crate::containers::HashMap;
use crate::engine::variables::DomainId;

/// Display names of domains, looked up in both directions.
#[derive(Debug, Default)]
pub(super) struct VariableNames {
    by_domain: HashMap<DomainId, String>,
    by_name: HashMap<String, DomainId>,
}

impl VariableNames {
    pub(super) fn name_of(&self, domain: DomainId) -> Option<&str> {
        self.by_domain.get(&domain).map(String::as_str)
    }

    pub(super) fn domain_named(&self, name: &str) -> Option<DomainId> {
        self.by_name.get(name).copied()
    }

    /// A later domain with the same name shadows the earlier one in [`Self::domain_named`].
    pub(super) fn insert(&mut self, domain: DomainId, name: String) {
        let _ = self.by_name.insert(name.clone(), domain);
        let _ = self.by_domain.insert(domain, name);
    }
}
