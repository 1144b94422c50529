//! Tests for memoized function values.
//!
//! Covers the at-most-once guarantee for serial and concurrent callers, the
//! handling of failed computations, idempotence, recursion through a
//! memoized value under the per-key policy, and rejected re-entry.
//!
//! # Running these tests
//!
//! ```bash
//! cargo test --test memoization_tests
//! ```

#![cfg(all(feature = "memoize", not(loom)))]

use lambda2::function::{Function1, Function2};
use lambda2::memoize::MemoizationPolicy;
use rstest::rstest;
use std::any::Any;
use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex, OnceLock, mpsc};
use std::thread;
use std::time::Duration;

fn counting_multiply(counter: &Arc<AtomicUsize>) -> Function2<u32, u32, u64> {
    let counter = Arc::clone(counter);
    Function2::of(move |first: u32, second: u32| {
        counter.fetch_add(1, Ordering::SeqCst);
        u64::from(first) * u64::from(second)
    })
}

// =============================================================================
// At Most Once
// =============================================================================

#[rstest]
#[case(MemoizationPolicy::Global)]
#[case(MemoizationPolicy::PerKey)]
fn serial_calls_compute_each_pair_once(#[case] policy: MemoizationPolicy) {
    let counter = Arc::new(AtomicUsize::new(0));
    let memoized = counting_multiply(&counter).memoized_with(policy);

    for _ in 0..10 {
        for first in 0..5 {
            for second in 0..5 {
                assert_eq!(memoized.apply(first, second), u64::from(first * second));
            }
        }
    }

    assert_eq!(counter.load(Ordering::SeqCst), 25);
    assert_eq!(memoized.cache_len(), Some(25));
}

/// Many threads released at once on the same pair see one computation.
#[rstest]
#[case(MemoizationPolicy::Global)]
#[case(MemoizationPolicy::PerKey)]
fn concurrent_calls_compute_a_pair_once(#[case] policy: MemoizationPolicy) {
    for _ in 0..50 {
        let counter = Arc::new(AtomicUsize::new(0));
        let memoized = counting_multiply(&counter).memoized_with(policy);
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let memoized = memoized.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    memoized.apply(6, 7)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

#[rstest]
#[case(MemoizationPolicy::Global)]
#[case(MemoizationPolicy::PerKey)]
fn concurrent_calls_over_overlapping_pairs(#[case] policy: MemoizationPolicy) {
    let counter = Arc::new(AtomicUsize::new(0));
    let memoized = counting_multiply(&counter).memoized_with(policy);
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let memoized = memoized.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..4)
                    .flat_map(|first| (0..4).map(move |second| (first, second)))
                    .map(|(first, second)| memoized.apply(first, second))
                    .sum::<u64>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 36);
    }

    assert_eq!(counter.load(Ordering::SeqCst), 16);
}

/// Under the global policy no two computations overlap, even for distinct
/// pairs.
#[rstest]
fn global_policy_serializes_computations() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let in_flight_clone = Arc::clone(&in_flight);
    let peak_clone = Arc::clone(&peak);

    let slow_add = Function2::of(move |first: u32, second: u32| {
        let current = in_flight_clone.fetch_add(1, Ordering::SeqCst) + 1;
        peak_clone.fetch_max(current, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(2));
        in_flight_clone.fetch_sub(1, Ordering::SeqCst);
        first + second
    })
    .memoized_with(MemoizationPolicy::Global);

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|index| {
            let slow_add = slow_add.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                slow_add.apply(index, index)
            })
        })
        .collect();

    for (index, handle) in (0_u32..).zip(handles) {
        assert_eq!(handle.join().unwrap(), index * 2);
    }

    assert_eq!(peak.load(Ordering::SeqCst), 1);
    assert_eq!(slow_add.cache_len(), Some(8));
}

// =============================================================================
// Failures
// =============================================================================

#[rstest]
#[case(MemoizationPolicy::Global)]
#[case(MemoizationPolicy::PerKey)]
fn panicking_computation_is_not_cached(#[case] policy: MemoizationPolicy) {
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_clone = Arc::clone(&attempts);
    let flaky = Function2::of(move |first: i32, second: i32| {
        if attempts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("transient failure");
        }
        first - second
    })
    .memoized_with(policy);

    let failed = catch_unwind(AssertUnwindSafe(|| flaky.apply(5, 3)));
    assert!(failed.is_err());
    assert_eq!(flaky.cache_len(), Some(0));

    // The lock was released by the unwinding call.
    assert_eq!(flaky.apply(5, 3), 2);
    assert_eq!(flaky.apply(5, 3), 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(flaky.cache_len(), Some(1));
}

#[rstest]
fn panic_on_one_thread_does_not_block_others() {
    let flaky = Function2::of(|first: i32, second: i32| {
        assert!(first >= 0, "negative input");
        first + second
    })
    .memoized();

    let failing = {
        let flaky = flaky.clone();
        thread::spawn(move || flaky.apply(-1, 0))
    };
    assert!(failing.join().is_err());

    let succeeding = {
        let flaky = flaky.clone();
        thread::spawn(move || flaky.apply(1, 2))
    };
    assert_eq!(succeeding.join().unwrap(), 3);
}

#[rstest]
#[case(MemoizationPolicy::Global)]
#[case(MemoizationPolicy::PerKey)]
fn try_memoized_does_not_cache_errors(#[case] policy: MemoizationPolicy) {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = Arc::clone(&counter);
    let parse_with_radix = Function2::of(move |text: String, radix: u32| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        i64::from_str_radix(&text, radix)
    })
    .try_memoized_with(policy);

    assert!(parse_with_radix.apply("zz".to_string(), 10).is_err());
    assert!(parse_with_radix.apply("zz".to_string(), 10).is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    assert_eq!(parse_with_radix.apply("zz".to_string(), 36), Ok(1295));
    assert_eq!(parse_with_radix.apply("zz".to_string(), 36), Ok(1295));
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    assert_eq!(parse_with_radix.cache_len(), Some(1));
}

#[rstest]
fn memoized_caches_err_results_as_values() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = Arc::clone(&counter);
    let divide = Function2::of(move |numerator: i32, denominator: i32| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        numerator.checked_div(denominator).ok_or("division by zero")
    })
    .memoized();

    assert_eq!(divide.apply(1, 0), Err("division by zero"));
    assert_eq!(divide.apply(1, 0), Err("division by zero"));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Identity of Memoized Values
// =============================================================================

#[rstest]
fn memoizing_a_memoized_value_returns_it() {
    let counter = Arc::new(AtomicUsize::new(0));
    let memoized = counting_multiply(&counter).memoized();
    let again = memoized.memoized();

    assert!(Function2::ptr_eq(&memoized, &again));

    memoized.apply(3, 3);
    again.apply(3, 3);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[rstest]
fn clones_share_the_cache() {
    let counter = Arc::new(AtomicUsize::new(0));
    let memoized = counting_multiply(&counter).memoized_with(MemoizationPolicy::PerKey);
    let clone = memoized.clone();

    memoized.apply(2, 9);
    clone.apply(2, 9);

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(clone.cache_len(), Some(1));
    assert_eq!(clone.memoization_policy(), Some(MemoizationPolicy::PerKey));
}

#[rstest]
fn memoized_value_reports_itself() {
    let counter = Arc::new(AtomicUsize::new(0));
    let plain = counting_multiply(&counter);
    let memoized = plain.memoized();

    assert!(!plain.is_memoized());
    assert!(memoized.is_memoized());
    assert_eq!(memoized.arity(), 2);
    assert!(format!("{memoized:?}").contains("memoized: true"));
}

// =============================================================================
// Recursion
// =============================================================================

/// Binomial coefficients through a memoized recursive function.
///
/// Each call recurses on different pairs, which the per-key policy allows.
#[rstest]
fn per_key_policy_supports_recursion_on_other_pairs() {
    let cell: Arc<OnceLock<Function2<u64, u64, u64>>> = Arc::new(OnceLock::new());
    let seen = Arc::new(Mutex::new(HashSet::new()));
    let duplicates = Arc::new(AtomicUsize::new(0));

    let binomial = {
        let cell = Arc::clone(&cell);
        let seen = Arc::clone(&seen);
        let duplicates = Arc::clone(&duplicates);
        Function2::of(move |n: u64, k: u64| {
            if !seen.lock().unwrap().insert((n, k)) {
                duplicates.fetch_add(1, Ordering::SeqCst);
            }
            if k == 0 || k == n {
                return 1;
            }
            let recurse = cell.get().unwrap();
            recurse.apply(n - 1, k - 1) + recurse.apply(n - 1, k)
        })
        .memoized_with(MemoizationPolicy::PerKey)
    };
    assert!(cell.set(binomial.clone()).is_ok());

    assert_eq!(binomial.apply(40, 20), 137_846_528_820);
    assert_eq!(binomial.apply(30, 15), 155_117_520);
    assert_eq!(duplicates.load(Ordering::SeqCst), 0);
    assert_eq!(binomial.cache_len(), Some(seen.lock().unwrap().len()));
}

#[rstest]
fn per_key_policy_memoizes_recursive_function1() {
    let cell: Arc<OnceLock<Function1<u64, u64>>> = Arc::new(OnceLock::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let fibonacci = {
        let cell = Arc::clone(&cell);
        let calls = Arc::clone(&calls);
        Function1::of(move |n: u64| {
            calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                return n;
            }
            let recurse = cell.get().unwrap();
            recurse.apply(n - 1) + recurse.apply(n - 2)
        })
        .memoized_with(MemoizationPolicy::PerKey)
    };
    assert!(cell.set(fibonacci.clone()).is_ok());

    assert_eq!(fibonacci.apply(80), 23_416_728_348_467_685);
    assert_eq!(calls.load(Ordering::SeqCst), 81);
}

// =============================================================================
// Re-entry
// =============================================================================

/// Runs `task` on its own thread and fails the test if it has not returned
/// within ten seconds.
fn within_deadline<T: Send + 'static>(
    task: impl FnOnce() -> T + Send + 'static,
) -> thread::Result<T> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let _ = sender.send(catch_unwind(AssertUnwindSafe(task)));
    });
    receiver
        .recv_timeout(Duration::from_secs(10))
        .expect("memoized call did not return")
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(ToString::to_string))
        .unwrap_or_default()
}

#[rstest]
fn global_policy_rejects_recursion_instead_of_hanging() {
    let cell: Arc<OnceLock<Function2<u64, u64, u64>>> = Arc::new(OnceLock::new());
    let binomial = {
        let cell = Arc::clone(&cell);
        Function2::of(move |n: u64, k: u64| {
            if k == 0 || k == n {
                return 1;
            }
            let recurse = cell.get().unwrap();
            recurse.apply(n - 1, k - 1) + recurse.apply(n - 1, k)
        })
        .memoized()
    };
    assert!(cell.set(binomial.clone()).is_ok());

    let recursive = binomial.clone();
    let payload = within_deadline(move || recursive.apply(4, 2)).unwrap_err();
    assert!(panic_message(payload.as_ref()).contains("MemoizationPolicy::PerKey"));

    // Nothing was stored and the lock was released.
    assert_eq!(binomial.cache_len(), Some(0));
    assert_eq!(binomial.apply(3, 0), 1);
    assert_eq!(binomial.cache_len(), Some(1));
}

#[rstest]
fn per_key_policy_rejects_reentry_for_the_same_pair() {
    let cell: Arc<OnceLock<Function2<u32, u32, u32>>> = Arc::new(OnceLock::new());
    let looping = {
        let cell = Arc::clone(&cell);
        Function2::of(move |first: u32, second: u32| {
            if first == 0 {
                return second;
            }
            cell.get().unwrap().apply(first, second)
        })
        .memoized_with(MemoizationPolicy::PerKey)
    };
    assert!(cell.set(looping.clone()).is_ok());

    let reentering = looping.clone();
    let payload = within_deadline(move || reentering.apply(1, 2)).unwrap_err();
    assert!(panic_message(payload.as_ref()).contains("re-entered"));

    assert_eq!(looping.apply(0, 5), 5);
    assert_eq!(looping.cache_len(), Some(1));

    let retried = looping.clone();
    assert!(within_deadline(move || retried.apply(1, 2)).is_err());
}

#[rstest]
fn other_threads_still_wait_for_a_running_computation() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = Arc::clone(&counter);
    let slow_square = Function2::of(move |value: u64, _: ()| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        value * value
    })
    .memoized();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let slow_square = slow_square.clone();
            thread::spawn(move || slow_square.apply(9, ()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 81);
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Logging
// =============================================================================

#[rstest]
fn memoization_runs_under_a_trace_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("lambda2=trace"))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let counter = Arc::new(AtomicUsize::new(0));
        let memoized = counting_multiply(&counter).memoized_with(MemoizationPolicy::PerKey);

        assert_eq!(memoized.apply(4, 5), 20);
        assert_eq!(memoized.apply(4, 5), 20);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    });
}
