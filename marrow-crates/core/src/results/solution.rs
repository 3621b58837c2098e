use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::domains::Domains;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateType;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;
use crate::marrow_assert_simple;

/// A trait which specifies the common behaviours of [`Solution`] and [`SolutionReference`].
pub trait ProblemSolution {
    /// Returns the number of defined [`DomainId`]s.
    fn num_domains(&self) -> usize;

    /// The value assigned to `domain`.
    fn get_integer_value(&self, domain: DomainId) -> i32;

    /// Whether the predicate holds under the assignment.
    fn evaluate_predicate(&self, predicate: Predicate) -> bool {
        let value = self.get_integer_value(predicate.get_domain());
        let right_hand_side = predicate.get_right_hand_side();
        match predicate.get_predicate_type() {
            PredicateType::LowerBound => value >= right_hand_side,
            PredicateType::UpperBound => value <= right_hand_side,
            PredicateType::NotEqual => value != right_hand_side,
            PredicateType::Equal => value == right_hand_side,
        }
    }

    fn get_literal_value(&self, literal: Literal) -> bool {
        self.evaluate_predicate(literal.get_true_predicate())
    }
}

/// A solution which keeps reference to the solver it was found by. It is only valid while the
/// search is paused at the solution, e.g. inside a solution callback.
#[derive(Debug, Copy, Clone)]
pub struct SolutionReference<'a> {
    domains: Domains<'a>,
}

impl<'a> SolutionReference<'a> {
    pub(crate) fn new(domains: Domains<'a>) -> SolutionReference<'a> {
        SolutionReference { domains }
    }

    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + 'a {
        self.domains.store().domain_ids()
    }
}

impl ProblemSolution for SolutionReference<'_> {
    fn num_domains(&self) -> usize {
        self.domains.store().num_domains()
    }

    fn get_integer_value(&self, domain: DomainId) -> i32 {
        marrow_assert_simple!(
            self.domains.is_fixed_domain(domain),
            "Expected {domain} to be assigned in a solution"
        );
        self.domains.lower_bound_of(domain)
    }
}

/// A solution which takes ownership of its values.
///
/// Implements [`ProblemSolution`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    values: KeyedVec<DomainId, i32>,
}

impl Solution {
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.values.keys().skip(1)
    }

    /// Every model domain paired with its value, in creation order.
    pub fn assignments(&self) -> impl Iterator<Item = (DomainId, i32)> + '_ {
        self.get_domains().map(|domain| (domain, self.values[domain]))
    }

    pub fn contains_domain_id(&self, domain_id: DomainId) -> bool {
        domain_id.index() < self.values.len()
    }
}

impl From<SolutionReference<'_>> for Solution {
    fn from(reference: SolutionReference<'_>) -> Self {
        let mut values = KeyedVec::default();
        for domain in reference.domains.store().domains_including_dummy() {
            let _ = values.push(reference.get_integer_value(domain));
        }
        Solution { values }
    }
}

impl ProblemSolution for Solution {
    fn num_domains(&self) -> usize {
        self.values.len()
    }

    fn get_integer_value(&self, domain: DomainId) -> i32 {
        self.values[domain]
    }
}
