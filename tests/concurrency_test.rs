/*!
 * Concurrency Tests
 *
 * Cross-thread disconnect, busy-skip semantics, and concurrent
 * registration against in-flight notification
 */

use sigslot::{Signal, SpinConfig};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_disconnect_waits_for_inflight_invocation() {
    let sig = Arc::new(Signal::<()>::new());
    let entered = Arc::new(AtomicBool::new(false));
    let disconnected = Arc::new(AtomicBool::new(false));
    let ran_past_disconnect = Arc::new(AtomicBool::new(false));

    let entered_flag = entered.clone();
    let disconnected_flag = disconnected.clone();
    let violation = ran_past_disconnect.clone();
    let mut conn = sig.connect(move |_| {
        entered_flag.store(true, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(200));
        if disconnected_flag.load(Ordering::SeqCst) {
            violation.store(true, Ordering::SeqCst);
        }
    });

    let notifier_sig = sig.clone();
    let notifier = thread::spawn(move || notifier_sig.notify(&()));

    while !entered.load(Ordering::SeqCst) {
        thread::yield_now();
    }

    let start = Instant::now();
    conn.disconnect();
    let waited = start.elapsed();
    disconnected.store(true, Ordering::SeqCst);

    notifier.join().unwrap();
    assert!(
        !ran_past_disconnect.load(Ordering::SeqCst),
        "handler body executed after disconnect() returned"
    );
    assert!(waited >= Duration::from_millis(100));
    assert!(!conn.is_connected());
}

#[test]
fn test_notify_skips_busy_handler() {
    let sig = Arc::new(Signal::<()>::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let in_handler = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));

    let counter = calls.clone();
    let entered = in_handler.clone();
    let hold = release.clone();
    let _conn = sig.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        entered.store(true, Ordering::SeqCst);
        while !hold.load(Ordering::SeqCst) {
            thread::yield_now();
        }
    });

    let first_sig = sig.clone();
    let first = thread::spawn(move || first_sig.notify(&()));
    while !in_handler.load(Ordering::SeqCst) {
        thread::yield_now();
    }

    // Second round finds the slot busy: skipped, no blocking, no retry.
    sig.notify(&());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    release.store(true, Ordering::SeqCst);
    first.join().unwrap();

    sig.notify(&());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_concurrent_connect_from_many_threads() {
    let sig = Arc::new(Signal::<()>::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let sig = sig.clone();
            let calls = calls.clone();
            thread::spawn(move || {
                (0..16)
                    .map(|_| {
                        let counter = calls.clone();
                        sig.connect(move |_| {
                            counter.fetch_add(1, Ordering::SeqCst);
                        })
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let conns: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    sig.notify(&());
    assert_eq!(calls.load(Ordering::SeqCst), 8 * 16);
    drop(conns);
}

#[test]
fn test_notify_races_disconnect_churn() {
    let sig = Arc::new(Signal::<u32>::new());
    let stop = Arc::new(AtomicBool::new(false));

    let notifier_sig = sig.clone();
    let notifier_stop = stop.clone();
    let notifier = thread::spawn(move || {
        while !notifier_stop.load(Ordering::SeqCst) {
            notifier_sig.notify(&1);
        }
    });

    // Handlers come and go while the notifier hammers the registry; every
    // disconnect must block out its own in-flight invocation.
    for _ in 0..200 {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let conn = sig.connect(move |value| {
            counter.fetch_add(*value as usize, Ordering::SeqCst);
        });
        drop(conn);
        // The notifier may still hold its short-lived strong upgrade; the
        // handler storage is gone as soon as that lapses.
        while Arc::strong_count(&seen) != 1 {
            thread::yield_now();
        }
    }

    stop.store(true, Ordering::SeqCst);
    notifier.join().unwrap();
}

#[test]
fn test_disconnect_from_other_thread() {
    let sig = Signal::<()>::new();
    let conn = sig.connect_fn(|_| {});

    let worker = thread::spawn(move || {
        let mut conn = conn;
        conn.disconnect();
        conn.is_connected()
    });
    assert!(!worker.join().unwrap());
}

#[test]
fn test_spin_policies_all_unblock() {
    for config in [
        SpinConfig::default(),
        SpinConfig::low_latency(),
        SpinConfig::cooperative(),
        SpinConfig { yield_every: 0 },
    ] {
        let sig = Arc::new(Signal::<()>::with_config(config));
        let entered = Arc::new(AtomicBool::new(false));

        let entered_flag = entered.clone();
        let mut conn = sig.connect(move |_| {
            entered_flag.store(true, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
        });

        let notifier_sig = sig.clone();
        let notifier = thread::spawn(move || notifier_sig.notify(&()));
        while !entered.load(Ordering::SeqCst) {
            thread::yield_now();
        }

        conn.disconnect();
        assert!(!conn.is_connected());
        notifier.join().unwrap();
    }
}
