//! Session host.
//!
//! Wires the state machine to terminal surfaces, input and a tokio-driven
//! gravity timer, and runs the event loop:
//!
//! - [`session`]: composition root ([`Game`] builds a running [`Session`])
//! - [`driver`]: the gravity timer as a tokio interval task
//! - [`log`]: optional JSON-lines event log
//! - [`runtime`]: terminal event loop

pub mod config;
pub mod driver;
pub mod event;
pub mod log;
pub mod runtime;
pub mod session;

pub use gridfall_core as core;
pub use gridfall_input as input;
pub use gridfall_term as term;
pub use gridfall_types as types;

pub use config::SessionConfig;
pub use driver::IntervalDriver;
pub use event::HostEvent;
pub use log::{EventLog, LogEvent, LogRecord};
pub use runtime::run;
pub use session::{Game, Logic, Session, SessionError};
