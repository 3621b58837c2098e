use std::ops::Not;

use enumset::EnumSet;

use super::AffineView;
use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::domains::Domains;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;

/// A 0-1 integer variable interpreted as a Boolean.
///
/// The negation of a literal is the view `1 - x` on the same domain, so both polarities share
/// their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    integer_variable: AffineView<DomainId>,
}

impl Literal {
    /// Creates a new literal wrapping the provided [`DomainId`].
    ///
    /// Note: the provided `domain_id` should have a domain between 0 and 1.
    pub fn new(domain_id: DomainId) -> Literal {
        Literal {
            integer_variable: domain_id.scaled(1),
        }
    }

    pub fn get_integer_variable(&self) -> AffineView<DomainId> {
        self.integer_variable
    }

    pub fn get_true_predicate(&self) -> Predicate {
        self.lower_bound_predicate(1)
    }

    pub fn get_false_predicate(&self) -> Predicate {
        self.upper_bound_predicate(0)
    }

    /// Whether the literal is fixed to true.
    pub fn is_true(&self, domains: Domains<'_>) -> bool {
        self.lower_bound(domains) == 1
    }

    /// Whether the literal is fixed to false.
    pub fn is_false(&self, domains: Domains<'_>) -> bool {
        self.upper_bound(domains) == 0
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            integer_variable: self.integer_variable.scaled(-1).offset(1),
        }
    }
}

/// Forwards a function implementation to the field on self.
macro_rules! forward {
    (
        $field:ident,
        fn $(<$($lt:lifetime),+>)? $name:ident(
            &self,
            $($param_name:ident : $param_type:ty),*
        ) -> $return_type:ty
    ) => {
        fn $name$(<$($lt),+>)?(
            &self,
            $($param_name: $param_type),*
        ) -> $return_type {
            self.$field.$name($($param_name),*)
        }
    }
}

impl IntegerVariable for Literal {
    type AffineView = AffineView<Self>;

    forward!(integer_variable, fn lower_bound(&self, domains: Domains<'_>) -> i32);
    forward!(integer_variable, fn upper_bound(&self, domains: Domains<'_>) -> i32);
    forward!(integer_variable, fn contains(&self, domains: Domains<'_>, value: i32) -> bool);
    forward!(integer_variable, fn size(&self, domains: Domains<'_>) -> u64);
    forward!(
        integer_variable,
        fn <'a> iterate_domain(&self, domains: Domains<'a>) -> impl Iterator<Item = i32> + 'a
    );
    forward!(integer_variable, fn unpack_event(&self, event: OpaqueDomainEvent) -> IntDomainEvent);

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>) {
        self.integer_variable.watch_all(watchers, events);
    }
}

impl PredicateConstructor for Literal {
    type Value = i32;

    forward!(integer_variable, fn lower_bound_predicate(&self, bound: i32) -> Predicate);
    forward!(integer_variable, fn upper_bound_predicate(&self, bound: i32) -> Predicate);
    forward!(integer_variable, fn equality_predicate(&self, value: i32) -> Predicate);
    forward!(integer_variable, fn disequality_predicate(&self, value: i32) -> Predicate);
}

impl TransformableVariable<AffineView<Literal>> for Literal {
    fn scaled(&self, scale: i32) -> AffineView<Literal> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<Literal> {
        AffineView::new(*self, 1, offset)
    }
}

impl From<Literal> for AffineView<DomainId> {
    fn from(literal: Literal) -> Self {
        literal.integer_variable
    }
}
