use scan_overlay::config::OverlayConfig;
use scan_overlay::framing::{FixedFraming, Framing};
use scan_overlay::host::ScanHost;
use scan_overlay::overlay::Snapshot;
use scan_overlay::{DecoderEvent, FramingRect, Point, ScannerApp};
use std::thread;
use std::time::Duration;

fn fast_config() -> OverlayConfig {
    let mut config = OverlayConfig::default();
    config.animation.tick_interval_ms = 1;
    config
}

fn framing() -> Framing {
    Framing {
        display: FramingRect::new(40, 40, 200, 160).unwrap(),
        preview: FramingRect::new(0, 0, 320, 240).unwrap(),
    }
}

#[test]
fn loop_ticks_and_applies_decoder_events() {
    let config = fast_config();
    let mut app = ScannerApp::new(&config, Box::new(FixedFraming::new(framing())), 240, 200);
    let mut host = ScanHost::new(config.animation.tick_interval()).unwrap();

    host.sender()
        .send(DecoderEvent::Decoded(Snapshot::solid(8, 8, [0; 4])))
        .unwrap();
    let sender = host.sender();
    let producer = thread::spawn(move || {
        for i in 0..10 {
            if sender
                .send(DecoderEvent::CandidatePoint(Point::new(i as f32, i as f32)))
                .is_err()
            {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
    });

    host.run(&mut app, 30).unwrap();
    producer.join().unwrap();

    assert!(app.ticks_rendered() >= 30);
    assert_eq!(app.ticks_skipped(), 0);
    assert_eq!(app.tracker().result_dimensions(), Some((8, 8)));
    assert_eq!(app.last_invalidation().unwrap().region, framing().display);
    assert!(app.tracker().animation_phase() >= 30);
}

#[test]
fn loop_skips_while_framing_is_pending() {
    let config = fast_config();
    let mut app = ScannerApp::new(&config, Box::new(FixedFraming::pending()), 64, 64);
    let mut host = ScanHost::new(config.animation.tick_interval()).unwrap();

    host.run(&mut app, 5).unwrap();

    assert_eq!(app.ticks_rendered(), 0);
    assert!(app.ticks_skipped() >= 5);
    assert_eq!(app.tracker().animation_phase(), 0);
    assert!(app.last_invalidation().is_none());
}
