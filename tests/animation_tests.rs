//! Timed attack animation driven on a real runtime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wildquest::{run_attack_animation, run_attack_animation_with_interval, GenerationConfig};

#[test]
fn test_animation_from_sync_code() {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let completions = Arc::new(AtomicUsize::new(0));
    let (f, c) = (Arc::clone(&frames), Arc::clone(&completions));
    let config = GenerationConfig::for_testing(1);

    let completed = tokio_test::block_on(async move {
        run_attack_animation_with_interval(
            config.attack_frame_interval(),
            move |attack| f.lock().unwrap().push(attack),
            move || {
                c.fetch_add(1, Ordering::SeqCst);
            },
        )
        .finished()
        .await
    });

    assert!(completed);
    assert_eq!(
        *frames.lock().unwrap(),
        vec![true, false, true, false, true, false]
    );
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_completion_follows_last_frame() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let (frame_log, done_log) = (Arc::clone(&events), Arc::clone(&events));

    let handle = run_attack_animation(
        move |attack| frame_log.lock().unwrap().push(if attack { "attack" } else { "rest" }),
        move || done_log.lock().unwrap().push("done"),
    );
    assert!(handle.finished().await);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 7);
    assert_eq!(events[5], "rest");
    assert_eq!(events[6], "done");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_tick_suppresses_everything() {
    let frames = Arc::new(AtomicUsize::new(0));
    let completions = Arc::new(AtomicUsize::new(0));
    let (f, c) = (Arc::clone(&frames), Arc::clone(&completions));

    let handle = run_attack_animation(
        move |_| {
            f.fetch_add(1, Ordering::SeqCst);
        },
        move || {
            c.fetch_add(1, Ordering::SeqCst);
        },
    );
    handle.cancel();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(frames.load(Ordering::SeqCst), 0);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
    assert!(!handle.finished().await);
}
