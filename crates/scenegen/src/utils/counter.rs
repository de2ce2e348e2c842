//! Process wide event counters, reported at the end of a run.
//!
//! Counting is compiled out when the `counter` feature is disabled.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

#[derive(Default)]
pub struct Counter {
    atomic: AtomicU64,
}

impl Counter {
    pub const fn new() -> Self {
        Self {
            atomic: AtomicU64::new(0),
        }
    }
    pub fn inc(&self) {
        self.atomic.fetch_add(1, Ordering::Relaxed);
    }
    pub fn value(&self) -> u64 {
        self.atomic.load(Ordering::Acquire)
    }
}

lazy_static::lazy_static! {
    static ref COUNTERS: Mutex<BTreeMap<&'static str, Arc<Counter>>> = Mutex::new(BTreeMap::new());
}

/// Get the counter registered under `descr`, creating it if needed
pub fn register_counter(descr: &'static str) -> Arc<Counter> {
    let mut counters = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    counters.entry(descr).or_default().clone()
}

/// Current value of a counter, 0 if it was never hit
pub fn counter_value(descr: &'static str) -> u64 {
    let counters = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    counters.get(descr).map_or(0, |c| c.value())
}

pub fn report_counters() {
    let counters = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for (counter_name, counter) in counters.iter() {
        log::info!(target: "counter_report", "{}: {}", counter_name, counter.value())
    }
}

#[macro_export]
macro_rules! counter {
    ($descr:literal) => {
        if cfg!(feature = "counter") {
            $crate::utils::counter::lazy_static::lazy_static! {
                static ref COUNTER_REF: std::sync::Arc<$crate::utils::counter::Counter> =
                    $crate::utils::counter::register_counter($descr);
            }
            COUNTER_REF.inc();
        }
    };
}

pub use counter;
// Reexport for the macro
pub use lazy_static;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let before = counter_value("test counter");
        for _ in 0..3 {
            counter!("test counter");
        }
        if cfg!(feature = "counter") {
            assert_eq!(counter_value("test counter"), before + 3);
        }
    }
}
