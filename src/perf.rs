//! Per-frame wall-clock totals for the HUD overlay.

use std::cell::RefCell;
use web_sys::Performance;

struct Timing {
    label: &'static str,
    total_ms: f64,
    calls: u32,
}

thread_local! {
    static FRAME_TIMINGS: RefCell<Vec<Timing>> = const { RefCell::new(Vec::new()) };
}

fn stamp(clock: Option<&Performance>) -> f64 {
    clock.map_or_else(js_sys::Date::now, Performance::now)
}

fn record(label: &'static str, ms: f64) {
    FRAME_TIMINGS.with(|t| {
        let mut t = t.borrow_mut();
        match t.iter_mut().find(|e| e.label == label) {
            Some(e) => {
                e.total_ms += ms;
                e.calls += 1;
            }
            None => t.push(Timing {
                label,
                total_ms: ms,
                calls: 1,
            }),
        }
    });
}

/// Adds its own lifetime to `label`'s total for the current frame.
pub struct Scope {
    label: &'static str,
    clock: Option<Performance>,
    start: f64,
}

impl Scope {
    pub fn new(label: &'static str) -> Self {
        let clock = web_sys::window().and_then(|w| w.performance());
        let start = stamp(clock.as_ref());
        Self { label, clock, start }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        record(self.label, stamp(self.clock.as_ref()) - self.start);
    }
}

/// One `label: ms` line per label timed since the last call, in first-seen
/// order; repeated scopes are summed.
pub fn drain_frame_timings() -> String {
    FRAME_TIMINGS.with(|t| {
        t.borrow_mut()
            .drain(..)
            .map(|e| match e.calls {
                1 => format!("{}: {:.2} ms", e.label, e.total_ms),
                n => format!("{}: {:.2} ms ({n}x)", e.label, e.total_ms),
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// Drops anything recorded while the HUD was not listening.
pub fn discard_frame_timings() {
    FRAME_TIMINGS.with(|t| t.borrow_mut().clear());
}
