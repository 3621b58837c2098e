use crate::basic_types::Entailment;
use crate::engine::domains::Domains;
use crate::engine::variables::DomainId;
use crate::predicate;

/// An atomic constraint over a single domain, e.g. `[x >= 5]`.
///
/// Predicates are what the search branches on: a decision posts a predicate and backtracking
/// posts its negation. To create a [`Predicate`], use [`Predicate::new`] or the more concise
/// [`predicate!`] macro.
#[derive(Clone, PartialEq, Eq, Copy, Hash)]
pub struct Predicate {
    domain: DomainId,
    predicate_type: PredicateType,
    value: i32,
}

#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
pub enum PredicateType {
    LowerBound,
    UpperBound,
    NotEqual,
    Equal,
}

impl Predicate {
    pub fn new(domain: DomainId, predicate_type: PredicateType, value: i32) -> Self {
        Predicate {
            domain,
            predicate_type,
            value,
        }
    }

    pub fn get_predicate_type(&self) -> PredicateType {
        self.predicate_type
    }

    /// Returns the [`DomainId`] of the [`Predicate`]
    pub fn get_domain(&self) -> DomainId {
        self.domain
    }

    pub fn get_right_hand_side(&self) -> i32 {
        self.value
    }

    pub fn is_equality_predicate(&self) -> bool {
        self.predicate_type == PredicateType::Equal
    }

    pub fn is_lower_bound_predicate(&self) -> bool {
        self.predicate_type == PredicateType::LowerBound
    }

    pub fn is_upper_bound_predicate(&self) -> bool {
        self.predicate_type == PredicateType::UpperBound
    }

    pub fn is_not_equal_predicate(&self) -> bool {
        self.predicate_type == PredicateType::NotEqual
    }

    pub fn trivially_true() -> Predicate {
        // The dummy domain 0 is fixed to one at the root.
        let domain_id = DomainId::new(0);
        predicate!(domain_id == 1)
    }

    pub fn trivially_false() -> Predicate {
        let domain_id = DomainId::new(0);
        predicate!(domain_id != 1)
    }

    /// Whether the predicate holds, is violated, or is still open under the current domains.
    pub fn evaluate(&self, domains: Domains<'_>) -> Entailment {
        let lower_bound = domains.lower_bound_of(self.domain);
        let upper_bound = domains.upper_bound_of(self.domain);

        let (holds, violated) = match self.predicate_type {
            PredicateType::LowerBound => (lower_bound >= self.value, upper_bound < self.value),
            PredicateType::UpperBound => (upper_bound <= self.value, lower_bound > self.value),
            PredicateType::Equal => (
                lower_bound == self.value && upper_bound == self.value,
                !domains.contains_value(self.domain, self.value),
            ),
            PredicateType::NotEqual => (
                !domains.contains_value(self.domain, self.value),
                lower_bound == self.value && upper_bound == self.value,
            ),
        };

        if holds {
            Entailment::True
        } else if violated {
            Entailment::False
        } else {
            Entailment::Undefined
        }
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        let domain_id = self.domain;
        let value = self.value;

        match self.predicate_type {
            PredicateType::LowerBound => predicate!(domain_id <= value - 1),
            PredicateType::UpperBound => predicate!(domain_id >= value + 1),
            PredicateType::NotEqual => predicate!(domain_id == value),
            PredicateType::Equal => predicate!(domain_id != value),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Predicate::trivially_true() {
            write!(f, "[True]")
        } else if *self == Predicate::trivially_false() {
            write!(f, "[False]")
        } else {
            let domain_id = self.domain;
            let rhs = self.value;

            match self.predicate_type {
                PredicateType::LowerBound => write!(f, "[{domain_id} >= {rhs}]"),
                PredicateType::UpperBound => write!(f, "[{domain_id} <= {rhs}]"),
                PredicateType::NotEqual => write!(f, "[{domain_id} != {rhs}]"),
                PredicateType::Equal => write!(f, "[{domain_id} == {rhs}]"),
            }
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_flips_bounds_and_equalities() {
        let x = DomainId::new(3);

        assert_eq!(predicate!(x <= 4), !predicate!(x >= 5));
        assert_eq!(predicate!(x >= 6), !predicate!(x <= 5));
        assert_eq!(predicate!(x != 5), !predicate!(x == 5));
        assert_eq!(predicate!(x == 5), !predicate!(x != 5));
    }

    #[test]
    fn trivial_predicates_are_each_others_negation() {
        assert_eq!(Predicate::trivially_false(), !Predicate::trivially_true());
    }

    #[test]
    fn display_uses_the_domain_name() {
        let x = DomainId::new(2);

        assert_eq!("[x2 >= 1]", predicate!(x >= 1).to_string());
        assert_eq!("[x2 != -3]", predicate!(x != -3).to_string());
        assert_eq!("[True]", Predicate::trivially_true().to_string());
    }
}
