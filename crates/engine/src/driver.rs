//! IntervalDriver: the gravity timer backed by a tokio interval task.
//!
//! Each period the task posts [`HostEvent::Timer`] into the loop channel, so
//! timer fires are handled on the loop like every other event and never run
//! concurrently with key handling.

use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::GravityTimer;
use crate::event::HostEvent;
use crate::session::SessionError;

pub struct IntervalDriver {
    handle: Handle,
    tx: mpsc::UnboundedSender<HostEvent>,
    task: Option<JoinHandle<()>>,
    period: Option<Duration>,
}

impl IntervalDriver {
    pub fn new(handle: Handle, tx: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self {
            handle,
            tx,
            task: None,
            period: None,
        }
    }

    /// Driver on the runtime the caller is running in
    pub fn current(tx: mpsc::UnboundedSender<HostEvent>) -> Result<Self, SessionError> {
        let handle = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        Ok(Self::new(handle, tx))
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl GravityTimer for IntervalDriver {
    fn start(&mut self, period: Duration) {
        self.stop();
        let tx = self.tx.clone();
        self.task = Some(self.handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(HostEvent::Timer(Instant::now())).is_err() {
                    break;
                }
            }
        }));
        self.period = Some(period);
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.period = None;
    }

    fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for IntervalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
