// filepath: src/host.rs
//! Render loop for the overlay
//!
//! A calloop event loop with a repeating timer that ticks the app at the
//! configured cadence, and a channel the decoder side uses to report
//! decodes and resumes from its own thread.

use calloop::channel::{self, Channel, Sender};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use log::{debug, info};
use std::time::Duration;

use crate::app::{DecoderEvent, ScannerApp};
use crate::error::Result;

pub struct ScanHost {
    event_loop: EventLoop<'static, ScannerApp>,
    sender: Sender<DecoderEvent>,
    interval: Duration,
}

impl ScanHost {
    pub fn new(interval: Duration) -> Result<Self> {
        let event_loop = EventLoop::try_new()?;
        let (sender, receiver): (Sender<DecoderEvent>, Channel<DecoderEvent>) = channel::channel();

        let handle = event_loop.handle();
        handle
            .insert_source(Timer::from_duration(interval), move |_deadline, _, app: &mut ScannerApp| {
                // redraw after the renderer's delay, or retry at the normal
                // cadence while the framing is still pending
                let next = app.tick().map(|inv| inv.after).unwrap_or(interval);
                TimeoutAction::ToDuration(next)
            })
            .map_err(|e| e.error)?;
        handle
            .insert_source(receiver, |event, _, app: &mut ScannerApp| match event {
                channel::Event::Msg(event) => app.handle_decoder_event(event),
                channel::Event::Closed => debug!("Decoder channel closed"),
            })
            .map_err(|e| e.error)?;

        Ok(Self {
            event_loop,
            sender,
            interval,
        })
    }

    /// Sender for decoder events; may be moved to another thread
    pub fn sender(&self) -> Sender<DecoderEvent> {
        self.sender.clone()
    }

    /// Drive `app` until it has seen `max_ticks` ticks (rendered or skipped)
    /// or the event loop fails.
    pub fn run(&mut self, app: &mut ScannerApp, max_ticks: u64) -> Result<()> {
        info!(
            "Entering render loop ({} ms per tick, {} ticks)",
            self.interval.as_millis(),
            max_ticks
        );
        let signal = self.event_loop.get_signal();
        self.event_loop.run(self.interval, app, |app| {
            if app.ticks_rendered() + app.ticks_skipped() >= max_ticks {
                signal.stop();
            }
        })?;
        info!(
            "Render loop finished: {} rendered, {} skipped",
            app.ticks_rendered(),
            app.ticks_skipped()
        );
        Ok(())
    }
}
