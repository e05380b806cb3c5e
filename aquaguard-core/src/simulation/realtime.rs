//! Periodic delivery of simulated sensor samples.
//!
//! The feed runs on its own thread but never touches session state: it only
//! sends samples over a channel. It waits on a stop channel between ticks, so
//! stopping (or dropping) the feed interrupts the wait immediately.
//!
//! At most one sample is buffered. A tick that finds the buffer full is
//! dropped, so a slow consumer always sees a fresh sample rather than a
//! backlog stamped long after it was taken.

use super::sensor::SensorSimulator;
use aquaguard_schemas::reading::SensorSample;
use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError},
    thread::{self, JoinHandle},
    time::Duration,
};

pub struct RealtimeFeed {
    samples: Receiver<SensorSample>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RealtimeFeed {
    pub fn start(interval: Duration, mut simulator: SensorSimulator) -> Self {
        let (sample_tx, sample_rx) = mpsc::sync_channel(1);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => match sample_tx.try_send(simulator.next_sample()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => log::trace!("Sample dropped, previous one not consumed yet"),
                    Err(TrySendError::Disconnected(_)) => break,
                },
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        log::debug!("Real-time feed started with a {:?} interval", interval);
        Self {
            samples: sample_rx,
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Blocks until the next sample. `None` once the feed has stopped.
    pub fn recv(&self) -> Option<SensorSample> {
        self.samples.recv().ok()
    }

    /// The next sample if one is already waiting.
    pub fn try_recv(&self) -> Option<SensorSample> {
        match self.samples.try_recv() {
            Ok(sample) => Some(sample),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender wakes the worker with `Disconnected`.
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Real-time feed thread panicked");
            }
            log::debug!("Real-time feed stopped");
        }
    }
}

impl Drop for RealtimeFeed {
    fn drop(&mut self) {
        self.shutdown();
    }
}
