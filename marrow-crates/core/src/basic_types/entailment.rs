/// Whether the relation of a propagator is known to hold under the current domains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Entailment {
    /// Every assignment of the current domains satisfies the relation.
    True,
    /// No assignment of the current domains satisfies the relation.
    False,
    #[default]
    Undefined,
}

impl Entailment {
    pub fn is_decided(self) -> bool {
        !matches!(self, Entailment::Undefined)
    }

    /// Conjunction in three-valued logic.
    pub fn and(self, other: Entailment) -> Entailment {
        match (self, other) {
            (Entailment::False, _) | (_, Entailment::False) => Entailment::False,
            (Entailment::True, Entailment::True) => Entailment::True,
            _ => Entailment::Undefined,
        }
    }

    /// Swaps `True` and `False`.
    pub fn negate(self) -> Entailment {
        match self {
            Entailment::True => Entailment::False,
            Entailment::False => Entailment::True,
            Entailment::Undefined => Entailment::Undefined,
        }
    }
}

impl FromIterator<Entailment> for Entailment {
    fn from_iter<I: IntoIterator<Item = Entailment>>(iter: I) -> Self {
        iter.into_iter().fold(Entailment::True, Entailment::and)
    }
}
