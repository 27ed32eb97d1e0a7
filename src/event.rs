use std::fmt;
use std::fmt::Formatter;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants, EnumIs, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::variant::VariantSet;

/// Name of the discriminant field on the wire.
pub const KIND_FIELD: &str = "kind";

#[derive(Debug, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
pub struct Conference {
    pub price: u32,
    pub location: String,
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
pub struct Meetup {
    /// Meetups price themselves in prose: "free", "pay what you want", "5 EUR at the door".
    pub price: String,
    pub location: String,
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
pub struct Webinar {
    pub url: String,
}

/// The canonical event variant set.
///
/// `EventKind` is generated from this definition, so adding a variant here widens the set of
/// kinds, every `KindMap` built over it, and makes every exhaustive `match` on `Event` fail to
/// compile until it grows a branch for the new variant.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Serialize, Deserialize, EnumDiscriminants, EnumIs)]
#[serde(tag = "kind")]
#[strum_discriminants(name(EventKind))]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, EnumIter, EnumString, Display, IntoStaticStr))]
pub enum Event {
    Conference(Conference),
    Meetup(Meetup),
    Webinar(Webinar),
}

/// What an event costs. Only the variants that have a price produce one, and each produces the
/// shape of price it actually stores.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Price<'e> {
    Amount(u32),
    Label(&'e str),
}

impl fmt::Display for Price<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{}", amount),
            Price::Label(label) => write!(f, "{}", label),
        }
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        self.into()
    }

    pub fn as_conference(&self) -> Option<&Conference> {
        match self {
            Event::Conference(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_meetup(&self) -> Option<&Meetup> {
        match self {
            Event::Meetup(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_webinar(&self) -> Option<&Webinar> {
        match self {
            Event::Webinar(w) => Some(w),
            _ => None,
        }
    }

    pub fn price(&self) -> Option<Price<'_>> {
        match self {
            Event::Conference(c) => Some(Price::Amount(c.price)),
            Event::Meetup(m) => Some(Price::Label(&m.price)),
            Event::Webinar(_) => None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Event::Conference(c) => Some(&c.location),
            Event::Meetup(m) => Some(&m.location),
            Event::Webinar(_) => None,
        }
    }
}

impl EventKind {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl VariantSet for Event {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        Event::kind(self)
    }

    fn kinds() -> Vec<EventKind> {
        EventKind::iter().collect()
    }
}

impl From<Conference> for Event {
    fn from(c: Conference) -> Self {
        Event::Conference(c)
    }
}

impl From<Meetup> for Event {
    fn from(m: Meetup) -> Self {
        Event::Meetup(m)
    }
}

impl From<Webinar> for Event {
    fn from(w: Webinar) -> Self {
        Event::Webinar(w)
    }
}

/// Build a single `Event` from an s-expression.
///
/// ```
/// use tagset::event;
/// let e = event!((conference 129 "Amsterdam"));
/// assert_eq!(e.location(), Some("Amsterdam"));
/// ```
#[macro_export]
macro_rules! event {
    ((conference $price:tt $location:tt)) => {
        $crate::event::Event::Conference($crate::event::Conference {
            price: $price,
            location: ::std::string::String::from($location),
        })
    };
    ((meetup $price:tt $location:tt)) => {
        $crate::event::Event::Meetup($crate::event::Meetup {
            price: ::std::string::String::from($price),
            location: ::std::string::String::from($location),
        })
    };
    ((webinar $url:tt)) => {
        $crate::event::Event::Webinar($crate::event::Webinar {
            url: ::std::string::String::from($url),
        })
    };
}

/// Build a `Vec<Event>` from a list of s-expressions, one per event.
#[macro_export]
macro_rules! events {
    ($($item:tt)*) => {
        vec![$($crate::event!($item)),*]
    };
}
