//! Integer domains: model-time creation, the mutation contract, and read-only views.
mod domain_store;
mod domains_view;
mod int_domain;
mod value_set;
mod variable_names;

pub use domain_store::DomainStore;
pub use domain_store::DomainUpdate;
pub use domains_view::Domains;
pub use domains_view::ReadDomains;
