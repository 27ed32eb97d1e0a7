//! Tagged-variant dispatch over a closed set of event shapes.
//!
//! `Event` is the variant set, `EventKind` its discriminant. Statically typed code dispatches with
//! an exhaustive `match` (see `dispatch`); everything keyed by kind is derived from the enum
//! (see `variant`). Untyped records and dynamically registered handlers are checked at runtime
//! instead (`record`, `coverage`).

#[macro_use]
pub mod event;
pub mod catalog;
pub mod config;
pub mod coverage;
pub mod dispatch;
pub mod error;
pub mod record;
pub mod variant;

pub use crate::config::DescribeConfig;
pub use crate::dispatch::{describe, dispatch, EventHandler};
pub use crate::error::{DispatchError, Result};
pub use crate::event::{Conference, Event, EventKind, Meetup, Price, Webinar};
pub use crate::variant::{group_by_kind, KindMap, Never, VariantSet};
