use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};

use bumpalo::Bump;
use tracing::debug;

use crate::config::DescribeConfig;
use crate::dispatch::describe_with;
use crate::event::{Event, EventKind};
use crate::variant::{collect_kinds, filter_kind, group_by_kind, KindMap};

/// A set of events allocated in an arena. Handing out `&'a Event` lets groupings and lookups
/// borrow from the catalogue without cloning.
///
/// Events are deduplicated: inserting an event equal to one already present returns the existing
/// reference. Allocated events live as long as the arena; their destructors never run.
pub struct Catalog<'a> {
    arena: &'a Bump,
    seen: RefCell<HashSet<&'a Event>>,
    events: RefCell<Vec<&'a Event>>,
}

impl<'a> Catalog<'a> {
    pub fn new(arena: &'a Bump) -> Catalog<'a> {
        Catalog {
            arena,
            seen: RefCell::new(HashSet::default()),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn insert(&self, event: Event) -> &'a Event {
        let mut seen = self.seen.borrow_mut();
        if let Some(existing) = seen.get(&event) {
            return *existing;
        }
        debug!(kind = %event.kind(), "adding event to catalog");
        let it: &'a Event = self.arena.alloc(event);
        seen.insert(it);
        self.events.borrow_mut().push(it);
        it
    }

    pub fn extend<I: IntoIterator<Item = Event>>(&self, events: I) {
        for event in events {
            self.insert(event);
        }
    }

    /// Events in insertion order.
    pub fn events(&self) -> Vec<&'a Event> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.seen.borrow().contains(event)
    }

    pub fn group(&self) -> KindMap<EventKind, Vec<&'a Event>> {
        group_by_kind(self.events())
    }

    pub fn of_kind(&self, kind: EventKind) -> Vec<&'a Event> {
        filter_kind(self.events(), kind).collect()
    }

    pub fn kinds_present(&self) -> BTreeSet<EventKind> {
        collect_kinds(self.events())
    }

    pub fn describe_all(&self, config: &DescribeConfig) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| describe_with(event, config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event;
    use crate::events;

    macro_rules! with_catalog {
        ($catalog:ident, $body:block) => {
            let arena = Bump::new();
            let $catalog = Catalog::new(&arena);
            $body
        };
    }

    #[test]
    fn empty_catalog_groups_to_every_kind() {
        with_catalog!(catalog, {
            assert!(catalog.is_empty());
            let groups = catalog.group();
            assert_eq!(groups.len(), 3);
            assert!(groups.iter().all(|(_, events)| events.is_empty()));
            assert!(catalog.kinds_present().is_empty());
        });
    }

    #[test]
    fn insert_deduplicates() {
        with_catalog!(catalog, {
            let a = catalog.insert(event!((webinar "https://x")));
            let b = catalog.insert(event!((webinar "https://x")));
            assert!(std::ptr::eq(a, b));
            assert_eq!(catalog.len(), 1);
            assert!(catalog.contains(&event!((webinar "https://x"))));
            assert!(!catalog.contains(&event!((webinar "https://y"))));
        });
    }

    #[test]
    fn grouping_and_kinds() {
        with_catalog!(catalog, {
            catalog.extend(events! {
                (conference 129 "Amsterdam")
                (meetup "free" "Berlin")
                (conference 99 "Lisbon")
            });
            let groups = catalog.group();
            assert_eq!(groups[EventKind::Conference].len(), 2);
            assert_eq!(groups[EventKind::Meetup].len(), 1);
            assert!(groups[EventKind::Webinar].is_empty());
            assert_eq!(catalog.of_kind(EventKind::Conference).len(), 2);
            assert_eq!(
                catalog.kinds_present().into_iter().collect::<Vec<_>>(),
                vec![EventKind::Conference, EventKind::Meetup]
            );
        });
    }

    #[test]
    fn describe_all_in_insertion_order() {
        with_catalog!(catalog, {
            catalog.extend(events! {
                (webinar "https://x")
                (conference 129 "Amsterdam")
            });
            assert_eq!(
                catalog.describe_all(&DescribeConfig::default()),
                vec![
                    "Webinar at https://x".to_string(),
                    "Conference in Amsterdam, 129 EUR".to_string(),
                ]
            );
        });
    }
}
