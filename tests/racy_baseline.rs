//! Negative control: the unsynchronized strategy really does construct
//! twice when two threads race the first call.
//!
//! The interleaving is forced deterministically. `RacyLazy` stores its
//! pointer only after the constructor returns, and the constructor below
//! cannot return until two callers have entered it, so with two racing
//! threads both are guaranteed to observe an empty cell and both construct.
//! Every correct strategy passes the equivalent scenario with a
//! construction count of one (see `exactly_once.rs`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;

use lazy_singleton::{RacyLazy, Singleton};

struct Payload {
    answer: u64,
}

#[test]
fn test_two_racing_threads_both_construct() {
    let constructions = AtomicUsize::new(0);
    let both_in_ctor = Barrier::new(2);

    let cell = RacyLazy::new(|| {
        constructions.fetch_add(1, Ordering::SeqCst);
        both_in_ctor.wait();
        Ok(Payload { answer: 42 })
    });

    let (first, second) = thread::scope(|s| {
        let a = s.spawn(|| cell.instance().unwrap() as *const Payload as usize);
        let b = s.spawn(|| cell.instance().unwrap() as *const Payload as usize);
        (a.join().unwrap(), b.join().unwrap())
    });

    // Both threads ran the constructor and walked away with distinct
    // instances: the identity invariant is violated.
    assert_eq!(constructions.load(Ordering::SeqCst), 2);
    assert_ne!(first, second);
}

#[test]
fn test_racy_is_fine_without_contention() {
    let constructions = AtomicUsize::new(0);
    let cell = RacyLazy::new(|| {
        constructions.fetch_add(1, Ordering::SeqCst);
        Ok(Payload { answer: 42 })
    });

    let a = cell.instance().unwrap();
    let b = cell.instance().unwrap();
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.answer, 42);
}
