//! Exhaustive dispatch on an event's kind.
//!
//! Every branch is checked by the compiler. Leaving one out doesn't build:
//!
//! ```compile_fail
//! use tagset::event::Event;
//!
//! fn label(event: &Event) -> &'static str {
//!     match event {
//!         Event::Conference(_) => "conference",
//!         Event::Meetup(_) => "meetup",
//!     }
//! }
//! ```
//!
//! and neither does a handler that skips a variant:
//!
//! ```compile_fail
//! use tagset::dispatch::EventHandler;
//! use tagset::event::{Conference, Meetup};
//!
//! struct Partial;
//!
//! impl EventHandler for Partial {
//!     type Output = ();
//!     fn conference(&mut self, _: &Conference) {}
//!     fn meetup(&mut self, _: &Meetup) {}
//! }
//! ```
use tracing::debug;

use crate::config::DescribeConfig;
use crate::event::{Conference, Event, Meetup, Webinar};

/// One method per variant. Each only gets to see the fields of its own variant.
pub trait EventHandler {
    type Output;

    fn conference(&mut self, conference: &Conference) -> Self::Output;
    fn meetup(&mut self, meetup: &Meetup) -> Self::Output;
    fn webinar(&mut self, webinar: &Webinar) -> Self::Output;
}

/// Run the branch of `handler` matching `event`'s kind.
pub fn dispatch<H: EventHandler + ?Sized>(event: &Event, handler: &mut H) -> H::Output {
    debug!(kind = %event.kind(), "dispatching event");
    match event {
        Event::Conference(c) => handler.conference(c),
        Event::Meetup(m) => handler.meetup(m),
        Event::Webinar(w) => handler.webinar(w),
    }
}

/// Renders a one-line human description of an event.
#[derive(Debug, Clone, Default)]
pub struct Describe {
    config: DescribeConfig,
}

impl Describe {
    pub fn new(config: DescribeConfig) -> Describe {
        Describe { config }
    }
}

impl EventHandler for Describe {
    type Output = String;

    fn conference(&mut self, conference: &Conference) -> String {
        format!(
            "Conference in {}, {} {}",
            conference.location, conference.price, self.config.currency
        )
    }

    fn meetup(&mut self, meetup: &Meetup) -> String {
        let price = if meetup.price.trim().is_empty() {
            self.config.free_label.as_str()
        } else {
            meetup.price.as_str()
        };
        format!("Meetup in {}, {}", meetup.location, price)
    }

    fn webinar(&mut self, webinar: &Webinar) -> String {
        format!("Webinar at {}", webinar.url)
    }
}

/// Describe `event` with the default rendering config.
///
/// ```
/// use tagset::dispatch::describe;
/// use tagset::event;
///
/// let text = describe(&event!((conference 129 "Amsterdam")));
/// assert!(text.contains("129"));
/// assert!(text.contains("Amsterdam"));
/// ```
pub fn describe(event: &Event) -> String {
    describe_with(event, &DescribeConfig::default())
}

pub fn describe_with(event: &Event, config: &DescribeConfig) -> String {
    dispatch(event, &mut Describe::new(config.clone()))
}
