//! Liveness: a caller arriving while another thread's construction is in
//! flight must block until that construction completes, then receive the
//! same instance. There is no way to cancel or time out the wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::thread;
use std::time::Duration;

use lazy_singleton::{DoubleCheckedLazy, LockedLazy, OnDemandLazy, SharedLazy, Singleton};

struct Payload {
    answer: u64,
}

/// One-shot gate the constructors park on until the test releases them.
struct Gate {
    released: Mutex<bool>,
    condvar: Condvar,
}

impl Gate {
    const fn new() -> Self {
        Gate {
            released: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    fn wait(&self) {
        let mut released = self.released.lock().unwrap();
        while !*released {
            released = self.condvar.wait(released).unwrap();
        }
    }

    fn open(&self) {
        *self.released.lock().unwrap() = true;
        self.condvar.notify_all();
    }
}

/// Spawns a constructing thread, then a second caller, and asserts the
/// second caller returns only after the gate is opened.
fn assert_second_caller_waits<S>(cell: &S, gate: &Gate, entered: &AtomicBool)
where
    S: Singleton<Payload> + Sync,
{
    let second_returned = AtomicBool::new(false);

    thread::scope(|s| {
        let winner = s.spawn(|| {
            let handle = cell.instance().unwrap();
            &*handle as *const Payload as usize
        });

        // Only spawn the second caller once the winner is inside the
        // constructor, so the roles are deterministic.
        while !entered.load(Ordering::SeqCst) {
            thread::yield_now();
        }

        let waiter = s.spawn(|| {
            let handle = cell.instance().unwrap();
            assert_eq!(handle.answer, 42);
            second_returned.store(true, Ordering::SeqCst);
            &*handle as *const Payload as usize
        });

        thread::sleep(Duration::from_millis(50));
        assert!(
            !second_returned.load(Ordering::SeqCst),
            "second caller returned while construction was still in flight"
        );

        gate.open();
        let first = winner.join().unwrap();
        let second = waiter.join().unwrap();
        assert!(second_returned.load(Ordering::SeqCst));
        assert_eq!(first, second);
    });
}

#[test]
fn test_locked_blocks_second_caller() {
    let gate = Gate::new();
    let entered = AtomicBool::new(false);
    let cell = LockedLazy::new(|| {
        entered.store(true, Ordering::SeqCst);
        gate.wait();
        Ok(Payload { answer: 42 })
    });

    assert_second_caller_waits(&cell, &gate, &entered);
}

#[test]
fn test_double_checked_blocks_second_caller() {
    let gate = Gate::new();
    let entered = AtomicBool::new(false);
    let cell = DoubleCheckedLazy::new(|| {
        entered.store(true, Ordering::SeqCst);
        gate.wait();
        Ok(Payload { answer: 42 })
    });

    assert_second_caller_waits(&cell, &gate, &entered);
}

#[test]
fn test_shared_blocks_second_caller() {
    let gate = Gate::new();
    let entered = AtomicBool::new(false);
    let cell = SharedLazy::new(|| {
        entered.store(true, Ordering::SeqCst);
        gate.wait();
        Ok(Payload { answer: 42 })
    });

    assert_second_caller_waits(&cell, &gate, &entered);
}

#[test]
fn test_on_demand_blocks_second_caller() {
    static GATE: Gate = Gate::new();
    static ENTERED: AtomicBool = AtomicBool::new(false);
    static CELL: OnDemandLazy<Payload> = OnDemandLazy::new(|| {
        ENTERED.store(true, Ordering::SeqCst);
        GATE.wait();
        Payload { answer: 42 }
    });

    assert_second_caller_waits(&CELL, &GATE, &ENTERED);
}
