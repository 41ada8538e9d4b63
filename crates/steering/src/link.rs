//! Command dispatch link
//!
//! Decouples the frame loop from the actuator transport: commands are
//! queued on a bounded channel and drained by a worker thread in enqueue
//! order. A full queue drops the command instead of blocking the loop -
//! the next frame's command supersedes it anyway.

use std::sync::Arc;
use std::thread::JoinHandle;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::command::ActuatorCommand;
use crate::SteeringError;

/// Default dispatch queue depth.
pub const DEFAULT_QUEUE_DEPTH: usize = 8;

/// The actuator transport consuming commands, fire-and-forget.
///
/// Also surfaces platform telemetry used by the status overlay.
pub trait CommandSink: Send + Sync {
    /// Forward one command to the platform.
    fn dispatch(&self, command: &ActuatorCommand) -> Result<(), SteeringError>;

    /// Current battery/health percentage.
    fn battery_percent(&self) -> u8;
}

/// Worker-backed dispatch queue in front of a [`CommandSink`].
pub struct CommandLink {
    sink: Arc<dyn CommandSink>,
    tx: Option<mpsc::Sender<ActuatorCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl CommandLink {
    /// Spawn the dispatch worker over `sink`.
    pub fn spawn(sink: Arc<dyn CommandSink>, queue_depth: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<ActuatorCommand>(queue_depth.max(1));
        let worker_sink = Arc::clone(&sink);

        let worker = std::thread::spawn(move || {
            while let Some(command) = rx.blocking_recv() {
                if let Err(e) = worker_sink.dispatch(&command) {
                    // Non-fatal: the next frame supersedes this command
                    warn!("command dispatch failed: {e}");
                }
            }
            debug!("command link drained");
        });

        Self {
            sink,
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Enqueue a command without blocking.
    ///
    /// Returns `false` when the command was dropped (queue full or link
    /// shut down); dispatch order always matches enqueue order.
    pub fn try_dispatch(&self, command: ActuatorCommand) -> bool {
        let Some(tx) = &self.tx else {
            return false;
        };
        match tx.try_send(command) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(cmd)) => {
                warn!(?cmd, "dispatch queue full, dropping command");
                false
            }
            Err(mpsc::error::TrySendError::Closed(cmd)) => {
                warn!(?cmd, "command link closed, dropping command");
                false
            }
        }
    }

    /// Battery/health reading from the underlying sink.
    pub fn battery_percent(&self) -> u8 {
        self.sink.battery_percent()
    }

    /// Drain the queue and stop the worker.
    pub fn shutdown(mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for CommandLink {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Sink that logs commands instead of driving hardware.
pub struct LogSink {
    battery: u8,
}

impl LogSink {
    pub fn new(battery: u8) -> Self {
        Self { battery }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(100)
    }
}

impl CommandSink for LogSink {
    fn dispatch(&self, command: &ActuatorCommand) -> Result<(), SteeringError> {
        debug!(?command, "dispatch");
        Ok(())
    }

    fn battery_percent(&self) -> u8 {
        self.battery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        commands: Mutex<Vec<ActuatorCommand>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self { commands: Mutex::new(Vec::new()) })
        }
    }

    impl CommandSink for RecordingSink {
        fn dispatch(&self, command: &ActuatorCommand) -> Result<(), SteeringError> {
            self.commands.lock().unwrap().push(*command);
            Ok(())
        }

        fn battery_percent(&self) -> u8 {
            100
        }
    }

    #[test]
    fn test_dispatch_preserves_order() {
        let sink = RecordingSink::new();
        let link = CommandLink::spawn(sink.clone(), DEFAULT_QUEUE_DEPTH);

        for yaw in [10i16, 20, 30] {
            assert!(link.try_dispatch(ActuatorCommand::new(0, 0, 0, yaw)));
        }
        link.shutdown();

        let commands = sink.commands.lock().unwrap();
        let yaws: Vec<i8> = commands.iter().map(|c| c.yaw).collect();
        assert_eq!(yaws, vec![10, 20, 30]);
    }

    #[test]
    fn test_full_queue_drops_instead_of_blocking() {
        struct BlockedSink;
        impl CommandSink for BlockedSink {
            fn dispatch(&self, _command: &ActuatorCommand) -> Result<(), SteeringError> {
                std::thread::sleep(std::time::Duration::from_millis(200));
                Ok(())
            }
            fn battery_percent(&self) -> u8 {
                100
            }
        }

        let link = CommandLink::spawn(Arc::new(BlockedSink), 1);
        // Saturate the queue: the worker is parked in dispatch, so at most
        // one queued slot plus the in-flight command are accepted
        let mut dropped = false;
        for _ in 0..4 {
            if !link.try_dispatch(ActuatorCommand::new(0, 0, 0, 1)) {
                dropped = true;
                break;
            }
        }
        assert!(dropped);
        drop(link);
    }

    #[test]
    fn test_battery_passthrough() {
        let link = CommandLink::spawn(Arc::new(LogSink::new(42)), DEFAULT_QUEUE_DEPTH);
        assert_eq!(link.battery_percent(), 42);
    }
}
