use std::cell::{Cell, RefCell};

use web_time::Instant;

use ulmen_core::{LifecycleEvent, Observer, Phase};

/// Counters collected by an [`Inspector`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    pub updates: u64,
    pub effects: u64,
    pub renders: u64,
    pub dropped: u64,
    /// Deepest reentrant cycle seen so far.
    pub max_depth: usize,
    /// Smoothed renders per second.
    pub render_rate: f32,
    pub stopped: bool,
}

/// Runtime observer that keeps [`Metrics`] and renders them as a HUD line.
///
/// Attach a shared handle with `runtime.with_observer(inspector.clone())` and
/// read it back from the host whenever convenient.
pub struct Inspector {
    pub enabled: Cell<bool>,
    metrics: RefCell<Metrics>,
    started: Cell<Option<Instant>>,
    last_render: Cell<Option<Instant>>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self {
            enabled: Cell::new(true),
            metrics: RefCell::new(Metrics::default()),
            started: Cell::new(None),
            last_render: Cell::new(None),
        }
    }

    pub fn toggle(&self) {
        self.enabled.set(!self.enabled.get());
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.borrow().clone()
    }

    pub fn reset(&self) {
        *self.metrics.borrow_mut() = Metrics::default();
        self.started.set(None);
        self.last_render.set(None);
    }

    fn track_render(&self, m: &mut Metrics) {
        let now = Instant::now();
        if let Some(prev) = self.last_render.replace(Some(now)) {
            let dt = (now - prev).as_secs_f32();
            if dt > 0.0 {
                let rate = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                m.render_rate = if m.render_rate == 0.0 {
                    rate
                } else {
                    (1.0 - a) * m.render_rate + a * rate
                };
            }
        }
    }

    /// One-line summary, e.g. `renders: 3  |  updates: 2  |  depth: 1`.
    pub fn hud(&self) -> String {
        let m = self.metrics.borrow();
        let mut lines = vec![
            format!("renders: {}", m.renders),
            format!("updates: {}", m.updates),
            format!("effects: {}", m.effects),
            format!("depth: {}", m.max_depth),
        ];
        if m.dropped > 0 {
            lines.push(format!("dropped: {}", m.dropped));
        }
        if m.render_rate > 0.0 {
            lines.push(format!("rate: {:.1}/s", m.render_rate));
        }
        if let Some(started) = self.started.get() {
            lines.push(format!(
                "uptime: {:.2} ms",
                started.elapsed().as_secs_f64() * 1000.0
            ));
        }
        if m.stopped {
            lines.push(Phase::Stopped.to_string());
        }
        lines.join("  |  ")
    }
}

impl Observer for Inspector {
    fn on_event(&self, event: &LifecycleEvent) {
        if !self.enabled.get() {
            return;
        }
        let mut m = self.metrics.borrow_mut();
        match *event {
            LifecycleEvent::Started => {
                self.started.set(Some(Instant::now()));
            }
            LifecycleEvent::Updated { depth } => {
                m.updates += 1;
                m.max_depth = m.max_depth.max(depth);
            }
            LifecycleEvent::Effect { depth } => {
                m.effects += 1;
                m.max_depth = m.max_depth.max(depth);
            }
            LifecycleEvent::Rendered { depth } => {
                m.renders += 1;
                m.max_depth = m.max_depth.max(depth);
                self.track_render(&mut m);
            }
            LifecycleEvent::Dropped { phase } => {
                m.dropped += 1;
                log::debug!("inspector: message dropped while {phase}");
            }
            LifecycleEvent::Stopped { .. } => {
                m.stopped = true;
            }
        }
    }
}
