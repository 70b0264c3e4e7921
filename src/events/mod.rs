//! Adapter from external events to machine signals.
//!
//! An [`EventMapping`] ties an event name to a signal type plus fixed
//! arguments. An [`EventBus`] holds the mappings and, when an event is
//! raised on an entity, dispatches the mapped signals fire-and-forget.

mod bus;
mod mapping;

pub use bus::EventBus;
pub use mapping::EventMapping;
