//! Exhaustiveness for handlers registered at runtime.
//!
//! A `match` on `Event` is checked by the compiler. A table of closures keyed by kind is not, so
//! `HandlerTable` runs the check itself: `coverage()` reports which kinds have no handler, and
//! `seal()` refuses to hand back a table that would leave a kind unhandled.
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use itertools::Itertools;
use tracing::warn;

use crate::error::{DispatchError, Result};
use crate::variant::VariantSet;

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone)]
pub enum CoverageJudgment<K> {
    Exhaustive,
    Incomplete { missing: Vec<K> },
}

impl<K: Copy + Ord + Debug> CoverageJudgment<K> {
    pub fn incomplete(mut missing: Vec<K>) -> CoverageJudgment<K> {
        if missing.is_empty() {
            return CoverageJudgment::Exhaustive;
        }
        missing.sort();
        missing.dedup();
        CoverageJudgment::Incomplete { missing }
    }

    pub fn is_exhaustive(&self) -> bool {
        match self {
            CoverageJudgment::Exhaustive => true,
            _ => false,
        }
    }

    pub fn missing(&self) -> &[K] {
        match self {
            CoverageJudgment::Exhaustive => &[],
            CoverageJudgment::Incomplete { missing } => missing,
        }
    }

    /// Both sides must cover a kind for it to be covered.
    pub fn and(&self, other: &CoverageJudgment<K>) -> CoverageJudgment<K> {
        use CoverageJudgment::*;
        match (self, other) {
            (Exhaustive, Exhaustive) => Exhaustive,
            _ => CoverageJudgment::incomplete(
                self.missing()
                    .iter()
                    .chain(other.missing().iter())
                    .copied()
                    .collect(),
            ),
        }
    }

    /// Either side covering a kind is enough.
    pub fn or(&self, other: &CoverageJudgment<K>) -> CoverageJudgment<K> {
        use CoverageJudgment::*;
        match (self, other) {
            (Exhaustive, _) | (_, Exhaustive) => Exhaustive,
            (Incomplete { missing: lhs }, Incomplete { missing: rhs }) => {
                CoverageJudgment::incomplete(
                    lhs.iter().filter(|k| rhs.contains(*k)).copied().collect(),
                )
            }
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            CoverageJudgment::Exhaustive => Ok(()),
            CoverageJudgment::Incomplete { missing } => Err(DispatchError::Incomplete {
                missing: missing.iter().map(|k| format!("{:?}", k)).collect(),
            }),
        }
    }
}

impl<K: Debug> Display for CoverageJudgment<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CoverageJudgment::Exhaustive => write!(f, "exhaustive"),
            CoverageJudgment::Incomplete { missing } => write!(
                f,
                "missing {}",
                missing.iter().map(|k| format!("{:?}", k)).join(", ")
            ),
        }
    }
}

type Handler<'h, T, Out> = Box<dyn Fn(&T) -> Out + 'h>;

/// Handlers for a variant set, registered one kind at a time.
pub struct HandlerTable<'h, T: VariantSet, Out> {
    handlers: BTreeMap<T::Kind, Handler<'h, T, Out>>,
    fallback: Option<Box<HandlerTable<'h, T, Out>>>,
}

impl<'h, T: VariantSet, Out> Default for HandlerTable<'h, T, Out> {
    fn default() -> Self {
        HandlerTable::new()
    }
}

impl<'h, T: VariantSet, Out> HandlerTable<'h, T, Out> {
    pub fn new() -> HandlerTable<'h, T, Out> {
        HandlerTable {
            handlers: BTreeMap::new(),
            fallback: None,
        }
    }

    /// Register `handler` for `kind`, replacing any previous handler for it.
    pub fn on<F>(mut self, kind: T::Kind, handler: F) -> Self
    where
        F: Fn(&T) -> Out + 'h,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Kinds this table has no handler for are tried against `fallback`.
    pub fn with_fallback(mut self, fallback: HandlerTable<'h, T, Out>) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn handles(&self, kind: T::Kind) -> bool {
        self.handlers.contains_key(&kind)
            || self.fallback.as_ref().map_or(false, |fb| fb.handles(kind))
    }

    pub fn coverage(&self) -> CoverageJudgment<T::Kind> {
        let own = CoverageJudgment::incomplete(
            T::kinds()
                .into_iter()
                .filter(|k| !self.handlers.contains_key(k))
                .collect(),
        );
        match &self.fallback {
            Some(fallback) => own.or(&fallback.coverage()),
            None => own,
        }
    }

    /// Fails with `DispatchError::Incomplete` unless every kind has a handler.
    pub fn seal(self) -> Result<Self> {
        self.coverage().into_result()?;
        Ok(self)
    }

    pub fn dispatch(&self, item: &T) -> Result<Out> {
        let kind = item.kind();
        if let Some(handler) = self.handlers.get(&kind) {
            return Ok(handler(item));
        }
        match &self.fallback {
            Some(fallback) => fallback.dispatch(item),
            None => {
                warn!(kind = ?kind, "no handler registered for kind");
                Err(DispatchError::unhandled(format!("{:?}", kind)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::describe;
    use crate::event::{Event, EventKind};
    use crate::events;

    fn assert_exhaustive<K: Copy + Ord + Debug>(judgment: &CoverageJudgment<K>) {
        if let CoverageJudgment::Incomplete { missing } = judgment {
            panic!("Expected exhaustive coverage, but missing {:?}", missing)
        }
    }

    fn full_table<'h>() -> HandlerTable<'h, Event, String> {
        HandlerTable::<Event, String>::new()
            .on(EventKind::Conference, |e| format!("C:{}", describe(e)))
            .on(EventKind::Meetup, |e| format!("M:{}", describe(e)))
            .on(EventKind::Webinar, |e| format!("W:{}", describe(e)))
    }

    #[test]
    fn full_table_is_exhaustive() {
        let table = full_table();
        assert_exhaustive(&table.coverage());
        let table = table.seal().unwrap();
        let events = events! { (webinar "https://x") (conference 1 "Rome") };
        assert_eq!(table.dispatch(&events[0]).unwrap(), "W:Webinar at https://x");
        assert!(table.dispatch(&events[1]).unwrap().starts_with("C:"));
    }

    #[test]
    fn missing_handler_is_reported() {
        let table = HandlerTable::<Event, ()>::new().on(EventKind::Meetup, |_| ());
        let coverage = table.coverage();
        assert_eq!(
            coverage.missing(),
            &[EventKind::Conference, EventKind::Webinar]
        );
        assert_eq!(coverage.to_string(), "missing Conference, Webinar");
        match table.seal() {
            Err(DispatchError::Incomplete { missing }) => {
                assert_eq!(missing, vec!["Conference", "Webinar"])
            }
            Err(other) => panic!("wrong error: {}", other),
            Ok(_) => panic!("expected sealing to fail"),
        }
    }

    #[test]
    fn dispatch_without_handler_is_unhandled_variant() {
        let table = HandlerTable::<Event, u32>::new().on(EventKind::Meetup, |_| 1);
        let events = events! { (webinar "https://x") };
        let err = table.dispatch(&events[0]).unwrap_err();
        assert!(err.is_unhandled_variant());
    }

    #[test]
    fn fallback_fills_gaps() {
        let primary =
            HandlerTable::<Event, &str>::new().on(EventKind::Conference, |_| "primary");
        let fallback = HandlerTable::<Event, &str>::new()
            .on(EventKind::Conference, |_| "fallback")
            .on(EventKind::Meetup, |_| "fallback")
            .on(EventKind::Webinar, |_| "fallback");
        let table = primary.with_fallback(fallback);
        assert!(table.coverage().is_exhaustive());
        assert!(table.handles(EventKind::Webinar));

        let events = events! { (conference 1 "Rome") (meetup "free" "Rome") };
        assert_eq!(table.dispatch(&events[0]).unwrap(), "primary");
        assert_eq!(table.dispatch(&events[1]).unwrap(), "fallback");
    }

    #[test]
    fn and_unions_missing_or_intersects() {
        let lhs = CoverageJudgment::incomplete(vec![EventKind::Meetup, EventKind::Webinar]);
        let rhs = CoverageJudgment::incomplete(vec![EventKind::Webinar, EventKind::Conference]);
        assert_eq!(
            lhs.and(&rhs).missing(),
            &[EventKind::Conference, EventKind::Meetup, EventKind::Webinar]
        );
        assert_eq!(lhs.or(&rhs).missing(), &[EventKind::Webinar]);
        assert!(lhs.or(&CoverageJudgment::Exhaustive).is_exhaustive());
        assert_eq!(lhs.and(&CoverageJudgment::Exhaustive), lhs);
    }

    #[test]
    fn empty_missing_list_is_exhaustive() {
        assert!(CoverageJudgment::<EventKind>::incomplete(vec![]).is_exhaustive());
    }
}
