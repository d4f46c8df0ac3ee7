use scan_overlay::overlay::{OverlayTracker, MAX_RESULT_POINTS};
use scan_overlay::{FramingRect, Point};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn viewfinder() -> FramingRect {
    FramingRect::new(0, 0, 300, 200).unwrap()
}

fn key(point: &Point) -> (u32, u32) {
    (point.x as u32, point.y as u32)
}

#[test]
fn lockstep_rounds_lose_nothing() {
    const PRODUCERS: usize = 4;
    const PER_ROUND: usize = 4;
    const ROUNDS: usize = 50;

    let tracker = Arc::new(OverlayTracker::new());
    let barrier = Arc::new(Barrier::new(PRODUCERS + 1));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let tracker = Arc::clone(&tracker);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    for i in 0..PER_ROUND {
                        tracker.add_possible_point(Point::new(id as f32, (round * PER_ROUND + i) as f32));
                    }
                    barrier.wait(); // points in
                    barrier.wait(); // tick done
                }
            })
        })
        .collect();

    let mut drawn = Vec::new();
    for _ in 0..ROUNDS {
        barrier.wait();
        let frame = tracker.advance_tick(&viewfinder());
        assert_eq!(frame.points_to_draw.len(), PRODUCERS * PER_ROUND);
        drawn.extend(frame.points_to_draw.iter().map(key));
        barrier.wait();
    }
    for producer in producers {
        producer.join().unwrap();
    }

    let unique: HashSet<_> = drawn.iter().copied().collect();
    assert_eq!(drawn.len(), PRODUCERS * PER_ROUND * ROUNDS);
    assert_eq!(unique.len(), drawn.len());
}

#[test]
fn free_running_stress_stays_bounded() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 5_000;

    let tracker = Arc::new(OverlayTracker::new());
    let done = Arc::new(AtomicBool::new(false));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    tracker.add_possible_point(Point::new(id as f32, seq as f32));
                }
            })
        })
        .collect();

    let observer = {
        let tracker = Arc::clone(&tracker);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                assert!(tracker.pending_points().len() <= MAX_RESULT_POINTS);
            }
        })
    };

    let mut seen = HashSet::new();
    let mut last_drawn: Vec<Point> = Vec::new();
    let mut ticks = 0;
    while producers.iter().any(|p| !p.is_finished()) || ticks < 10 {
        let frame = tracker.advance_tick(&viewfinder());
        assert!(frame.points_to_draw.len() <= MAX_RESULT_POINTS);
        assert_eq!(frame.previous_points, last_drawn);
        for point in &frame.points_to_draw {
            assert!(seen.insert(key(point)), "point {point:?} drawn twice");
        }
        last_drawn = frame.points_to_draw;
        ticks += 1;
    }
    for producer in producers {
        producer.join().unwrap();
    }
    done.store(true, Ordering::Relaxed);
    observer.join().unwrap();

    // whatever is still queued shows up on the next tick
    let pending = tracker.pending_points();
    let frame = tracker.advance_tick(&viewfinder());
    assert_eq!(frame.points_to_draw, pending);
    assert!(seen.len() <= PRODUCERS * PER_PRODUCER);
}

#[test]
fn each_producers_points_keep_their_order() {
    let tracker = Arc::new(OverlayTracker::new());
    let writer = {
        let tracker = Arc::clone(&tracker);
        thread::spawn(move || {
            for seq in 0..2_000 {
                tracker.add_possible_point(Point::new(0.0, seq as f32));
            }
        })
    };

    let mut last = -1.0f32;
    loop {
        let finished = writer.is_finished();
        let frame = tracker.advance_tick(&viewfinder());
        for point in &frame.points_to_draw {
            assert!(point.y > last, "{} after {}", point.y, last);
            last = point.y;
        }
        if finished && tracker.pending_points().is_empty() {
            break;
        }
    }
    writer.join().unwrap();
}
