use std::cmp::Ordering;

use enumset::EnumSet;

use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::domains::Domains;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;
use crate::math::num_ext::NumExt;

/// The view `y = scale * x + offset` on an inner variable `x`.
///
/// The view never owns a domain; reads and predicates are translated to the inner variable.
/// A negative scale swaps the roles of the lower and upper bound.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "a view scaled by zero cannot be inverted");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    pub fn inner(&self) -> &Inner {
        &self.inner
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Map a value of the view back to the inner variable.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let translated = value - self.offset;

        match rounding {
            Rounding::Up => <i32 as NumExt>::div_ceil(translated, self.scale),
            Rounding::Down => <i32 as NumExt>::div_floor(translated, self.scale),
        }
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }

    fn is_image(&self, value: i32) -> bool {
        (value - self.offset) % self.scale == 0
    }
}

impl<Inner: IntegerVariable> IntegerVariable for AffineView<Inner> {
    type AffineView = Self;

    fn lower_bound(&self, domains: Domains<'_>) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(domains))
        } else {
            self.map(self.inner.lower_bound(domains))
        }
    }

    fn upper_bound(&self, domains: Domains<'_>) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(domains))
        } else {
            self.map(self.inner.upper_bound(domains))
        }
    }

    fn contains(&self, domains: Domains<'_>, value: i32) -> bool {
        self.is_image(value) && self.inner.contains(domains, self.invert(value, Rounding::Up))
    }

    fn size(&self, domains: Domains<'_>) -> u64 {
        self.inner.size(domains)
    }

    fn iterate_domain<'a>(&self, domains: Domains<'a>) -> impl Iterator<Item = i32> + 'a {
        let scale = self.scale;
        let offset = self.offset;
        self.inner
            .iterate_domain(domains)
            .map(move |value| scale * value + offset)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, mut events: EnumSet<IntDomainEvent>) {
        let bounds = IntDomainEvent::LowerBound | IntDomainEvent::UpperBound;
        if self.scale < 0 && events.intersection(bounds).len() == 1 {
            events = events.symmetric_difference(bounds);
        }
        self.inner.watch_all(watchers, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> IntDomainEvent {
        let event = self.inner.unpack_event(event);
        if self.scale > 0 {
            return event;
        }
        match event {
            IntDomainEvent::LowerBound => IntDomainEvent::UpperBound,
            IntDomainEvent::UpperBound => IntDomainEvent::LowerBound,
            other => other,
        }
    }
}

impl<Inner: IntegerVariable> TransformableVariable<AffineView<Inner>> for AffineView<Inner> {
    fn scaled(&self, scale: i32) -> AffineView<Inner> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<Inner> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl<Inner: PredicateConstructor<Value = i32>> PredicateConstructor for AffineView<Inner> {
    type Value = i32;

    fn lower_bound_predicate(&self, bound: i32) -> Predicate {
        if self.scale < 0 {
            self.inner
                .upper_bound_predicate(self.invert(bound, Rounding::Down))
        } else {
            self.inner
                .lower_bound_predicate(self.invert(bound, Rounding::Up))
        }
    }

    fn upper_bound_predicate(&self, bound: i32) -> Predicate {
        if self.scale < 0 {
            self.inner
                .lower_bound_predicate(self.invert(bound, Rounding::Up))
        } else {
            self.inner
                .upper_bound_predicate(self.invert(bound, Rounding::Down))
        }
    }

    fn equality_predicate(&self, value: i32) -> Predicate {
        if self.is_image(value) {
            self.inner
                .equality_predicate(self.invert(value, Rounding::Up))
        } else {
            Predicate::trivially_false()
        }
    }

    fn disequality_predicate(&self, value: i32) -> Predicate {
        if self.is_image(value) {
            self.inner
                .disequality_predicate(self.invert(value, Rounding::Up))
        } else {
            Predicate::trivially_true()
        }
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(domain: DomainId) -> Self {
        AffineView::new(domain, 1, 0)
    }
}

impl<Inner: std::fmt::Debug> std::fmt::Debug for AffineView<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scale {
            1 => {}
            -1 => write!(f, "-")?,
            scale => write!(f, "{scale} * ")?,
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset),
            Ordering::Equal => Ok(()),
            Ordering::Greater => write!(f, " + {}", self.offset),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Rounding {
    Up,
    Down,
}
