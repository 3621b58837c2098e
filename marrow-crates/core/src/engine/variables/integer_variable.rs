use std::fmt::Debug;

use enumset::EnumSet;

use super::TransformableVariable;
use crate::engine::domains::Domains;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::PredicateConstructor;

/// A view onto an integer domain.
///
/// Propagators are written against this trait, so the same propagator works for plain domains,
/// literals and affine transformations of either.
pub trait IntegerVariable:
    Clone + PredicateConstructor<Value = i32> + TransformableVariable<Self::AffineView> + Debug + 'static
{
    type AffineView: IntegerVariable;

    fn lower_bound(&self, domains: Domains<'_>) -> i32;

    fn upper_bound(&self, domains: Domains<'_>) -> i32;

    fn contains(&self, domains: Domains<'_>, value: i32) -> bool;

    /// The number of values in the domain.
    fn size(&self, domains: Domains<'_>) -> u64;

    /// The values in the domain. For views the order follows the underlying domain.
    fn iterate_domain<'a>(&self, domains: Domains<'a>) -> impl Iterator<Item = i32> + 'a;

    fn is_fixed(&self, domains: Domains<'_>) -> bool {
        self.lower_bound(domains) == self.upper_bound(domains)
    }

    /// Subscribe to `events` on the underlying domain, translated through the view.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>);

    /// Translate an event on the underlying domain to the perspective of this view.
    fn unpack_event(&self, event: OpaqueDomainEvent) -> IntDomainEvent;
}
