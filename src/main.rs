// filepath: src/main.rs

use log::{info, warn};
use scan_overlay::config::OverlayConfig;
use scan_overlay::framing::{CameraFraming, FramingSource};
use scan_overlay::host::ScanHost;
use scan_overlay::overlay::{OverlayTracker, Snapshot};
use scan_overlay::{DecoderEvent, Point, ScannerApp};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Stand-in for the decoding pipeline: reports candidate points along a
/// slow figure-eight, freezes on a fake decode and resumes later.
fn spawn_decoder(
    tracker: Arc<OverlayTracker>,
    events: calloop::channel::Sender<DecoderEvent>,
    preview: (f32, f32),
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let (w, h) = preview;
        let mut step = 0u32;
        while !stop.load(Ordering::Relaxed) {
            let t = step as f32 * 0.15;
            tracker.add_possible_point(Point::new(
                w / 2.0 + w / 3.0 * t.sin(),
                h / 2.0 + h / 4.0 * (2.0 * t).sin(),
            ));

            let event = match step {
                400 => Some(DecoderEvent::Decoded(Snapshot::solid(64, 64, [255; 4]))),
                700 => Some(DecoderEvent::Resume),
                _ => None,
            };
            if let Some(event) = event {
                if events.send(event).is_err() {
                    break;
                }
            }

            step += 1;
            thread::sleep(Duration::from_millis(4));
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting scan-overlay demo");

    let config = OverlayConfig::load_from_file().unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {e}");
        OverlayConfig::default()
    });
    info!("Configuration loaded");

    let demo = &config.demo;
    let framing = CameraFraming::new(
        (demo.screen_width, demo.screen_height),
        (demo.preview_width, demo.preview_height),
    );
    let preview = framing
        .framing()
        .map(|f| (f.preview.width() as f32, f.preview.height() as f32))
        .unwrap_or((demo.preview_width as f32, demo.preview_height as f32));

    let mut app = ScannerApp::new(
        &config,
        Box::new(framing),
        demo.screen_width,
        demo.screen_height,
    );
    let mut host = ScanHost::new(config.animation.tick_interval())?;

    let stop = Arc::new(AtomicBool::new(false));
    let decoder = spawn_decoder(app.tracker(), host.sender(), preview, Arc::clone(&stop));

    host.run(&mut app, demo.ticks)?;

    stop.store(true, Ordering::Relaxed);
    if decoder.join().is_err() {
        warn!("Decoder thread panicked");
    }

    if let Some(invalidation) = app.last_invalidation() {
        info!(
            "Last redraw region {:?}, next in {} ms",
            invalidation.region,
            invalidation.after.as_millis()
        );
    }
    info!(
        "Done after {} rendered ticks, result held: {}",
        app.ticks_rendered(),
        app.tracker().has_result()
    );
    Ok(())
}
