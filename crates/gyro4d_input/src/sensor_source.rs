//! Sensor-driven angle source
//!
//! Raw orientation samples arrive through a channel so the platform sensor
//! callback (any thread) never touches the filter directly. The owner of the
//! [`SensorSource`] drains the channel on its own thread with
//! [`pump`](SensorSource::pump), which keeps the filter single-writer.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use crate::angles::{AngleSource, AngleState};
use crate::orientation::Orientation;
use crate::sensor_filter::{SensorFilter, SensorParams};

/// Sending half of the sensor channel, handed to the sensor collaborator
///
/// Cloneable; every clone feeds the same [`SensorSource`].
#[derive(Clone, Debug)]
pub struct SensorSender {
    sender: Sender<AngleState>,
}

impl SensorSender {
    /// Queue one raw angle pair
    ///
    /// Returns `false` if the receiving source has been dropped.
    pub fn send(&self, raw: AngleState) -> bool {
        self.sender.send(raw).is_ok()
    }

    /// Queue the angles of a decoded device orientation
    pub fn send_orientation(&self, orientation: Orientation) -> bool {
        self.send(orientation.to_angles())
    }

    /// Decode and queue a rotation-vector reading
    ///
    /// Readings with fewer than three components are dropped and reported as
    /// not sent.
    pub fn send_rotation_vector(&self, values: &[f32]) -> bool {
        match Orientation::from_rotation_vector(values) {
            Some(orientation) => self.send_orientation(orientation),
            None => {
                log::warn!("Ignoring rotation vector with {} components", values.len());
                false
            }
        }
    }
}

/// Low-pass filtered angle source fed by a sample channel
pub struct SensorSource {
    filter: SensorFilter,
    receiver: Receiver<AngleState>,
    disconnected: bool,
}

impl SensorSource {
    /// Create a source and the sender that feeds it
    pub fn new(params: SensorParams) -> (Self, SensorSender) {
        let (sender, receiver) = channel();
        let source = Self {
            filter: SensorFilter::new(params),
            receiver,
            disconnected: false,
        };
        (source, SensorSender { sender })
    }

    /// Feed one raw sample directly, bypassing the channel
    pub fn push_sample(&mut self, raw: AngleState) -> AngleState {
        self.filter.update(raw)
    }

    /// Drain every queued sample into the filter (non-blocking)
    ///
    /// Returns the number of samples consumed. When every sender is gone the
    /// source keeps its last filtered pair.
    pub fn pump(&mut self) -> usize {
        let mut consumed = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(raw) => {
                    self.filter.update(raw);
                    consumed += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        log::debug!("Sensor channel closed; holding last orientation");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        consumed
    }

    /// Whether every [`SensorSender`] has been dropped
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// The underlying filter
    pub fn filter(&self) -> &SensorFilter {
        &self.filter
    }

    /// Return the filter to (0, 0)
    pub fn reset(&mut self) {
        self.filter.reset();
    }
}

impl AngleSource for SensorSource {
    fn angles(&self) -> AngleState {
        self.filter.filtered()
    }
}
