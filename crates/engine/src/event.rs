//! Events delivered to the session loop.

use std::time::Instant;

use crossterm::event::Event;

/// Everything the event loop reacts to, in arrival order
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Gravity driver fired
    Timer(Instant),
    /// Key, resize or other terminal event
    Terminal(Event),
    /// The terminal event source stopped
    InputClosed,
}
