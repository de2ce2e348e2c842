use std::time::{Duration, Instant};

pub struct TimedResult<T> {
    pub res: T,
    pub elapsed: Duration,
}

pub fn timed_scope<R, F: FnOnce() -> R>(f: F) -> TimedResult<R> {
    let begin = Instant::now();
    let res = f();
    TimedResult {
        res,
        elapsed: begin.elapsed(),
    }
}

/// Run `f` and log how long it took under the "scoped timer" target
pub fn timed_scope_log<R, F: FnOnce() -> R>(label: &str, f: F) -> TimedResult<R> {
    let timed = timed_scope(f);
    log::info!(target: "scoped timer", "{}: {}", label, format_elapsed(timed.elapsed));
    timed
}

pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_millis(1) {
        let micro = elapsed.as_secs_f32() * 1_000_000.;
        format!("{micro:.3}µs")
    } else if elapsed < Duration::from_secs(1) {
        let milli = elapsed.as_secs_f32() * 1000.;
        format!("{milli:.3}ms")
    } else if elapsed < Duration::from_secs(60) {
        format!("{:.3}s", elapsed.as_secs_f32())
    } else {
        let secs = elapsed.as_secs();
        format!("{}h{}m{}s", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}
