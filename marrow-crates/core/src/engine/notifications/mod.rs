//! Domain events and the subscriptions of propagators to them.
mod domain_events;
mod watch_list;

pub use domain_events::DomainEvents;
pub use domain_events::IntDomainEvent;
pub use domain_events::OpaqueDomainEvent;
pub(crate) use watch_list::WatchList;
pub use watch_list::Watchers;
