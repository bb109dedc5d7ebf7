//! # Dispatcher Module
//!
//! Orders the destination values of one [`OutputFrame`] into the event batch
//! the virtual-device protocol expects: every axis update first, then every
//! key update, then one synchronization event (appended by the writer) that
//! tells the kernel to apply the batch atomically.
//!
//! The dispatcher is only ever invoked with a fully populated frame. A
//! datagram that failed decoding produces zero dispatcher calls for that
//! cycle, never a partial one.

use evdev::{EventType, InputEvent};

use crate::device::virtual_pad::EventWriter;
use crate::mapping::frame::OutputFrame;

/// Writes output frames to an [`EventWriter`] in protocol order.
pub struct Dispatcher<W: EventWriter> {
    writer: W,
}

impl<W: EventWriter> Dispatcher<W> {
    /// Creates a dispatcher over the given writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Commits one frame as a single atomic batch.
    ///
    /// # Errors
    ///
    /// Propagates the writer's I/O error. No partial frame is observable on
    /// failure because the writer receives the whole batch in one call.
    pub fn commit(&mut self, frame: &OutputFrame) -> std::io::Result<()> {
        let mut events = Vec::with_capacity(frame.axes.len() + frame.keys.len());

        for &(axis, value) in &frame.axes {
            events.push(InputEvent::new(EventType::ABSOLUTE, axis.0, value));
        }
        for &(key, value) in &frame.keys {
            events.push(InputEvent::new(EventType::KEY, key.code(), value));
        }

        self.writer.write_frame(&events)
    }

    /// Consumes the dispatcher and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
