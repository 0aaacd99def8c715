//! Host runner. There is no window: the host owns the scheduler, feeds it
//! the viewport and the ambient dark-mode flag, and routes clicks and scroll
//! deltas into the handlers of the last frame.

use basics_core::*;
use web_time::{Duration, Instant};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no frame has been composed yet")]
    NoFrame,
    #[error("view {0} is not in the current frame")]
    UnknownView(ViewId),
    #[error("view {0} has no click handler")]
    NotClickable(ViewId),
    #[error("no view labelled {0:?}")]
    NoSuchLabel(String),
    #[error("the current frame has no scroll container")]
    NoScrollContainer,
    #[error("still invalidated after {frames} frames")]
    DidNotSettle { frames: usize },
}

#[derive(Clone, Debug)]
pub struct HostConfig {
    /// Physical pixels.
    pub viewport: (u32, u32),
    /// dp -> px multiplier.
    pub density: f32,
    /// Ambient system dark-mode setting handed to the root.
    pub dark_theme: bool,
    pub max_settle_frames: usize,
    pub frame_interval: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            viewport: (1280, 800),
            density: 1.0,
            dark_theme: false,
            max_settle_frames: 240,
            frame_interval: Duration::from_millis(16),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub frames: u64,
    pub build_ms: f32,
    pub nodes: usize,
}

pub struct HeadlessHost {
    root: Box<dyn FnMut(&mut Scheduler) -> View>,
    sched: Scheduler,
    config: HostConfig,
    metrics: Metrics,
}

impl HeadlessHost {
    pub fn new(config: HostConfig, root: impl FnMut(&mut Scheduler) -> View + 'static) -> Self {
        let mut sched = Scheduler::new();
        sched.size = config.viewport;
        sched.dark_theme = config.dark_theme;
        Self {
            root: Box::new(root),
            sched,
            config,
            metrics: Metrics::default(),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Flip the ambient dark-mode flag; the root recomposes on the next frame.
    pub fn set_dark_theme(&mut self, dark: bool) {
        self.config.dark_theme = dark;
        self.sched.dark_theme = dark;
        self.sched.invalidate();
    }

    pub fn needs_frame(&self) -> bool {
        self.sched.needs_frame()
    }

    /// Produce a frame if anything is invalidated, then hand the viewport to
    /// scroll containers (which may immediately ask for one more pass).
    pub fn frame(&mut self) -> Result<&Frame, HostError> {
        self.pump();
        if self.apply_viewport() {
            self.pump();
        }
        self.current()
    }

    pub fn current(&self) -> Result<&Frame, HostError> {
        self.sched.frame().ok_or(HostError::NoFrame)
    }

    fn pump(&mut self) {
        if !self.sched.needs_frame() {
            return;
        }
        let t0 = Instant::now();
        let root = &mut self.root;
        let frame = self.sched.repose(|s| root(s));
        let nodes = frame.node_count();
        let stats = frame.stats;

        self.metrics.frames += 1;
        self.metrics.build_ms = (Instant::now() - t0).as_secs_f32() * 1000.0;
        self.metrics.nodes = nodes;
        log::debug!(
            "frame {}: {} nodes in {:.2} ms (groups run {}, skipped {})",
            self.metrics.frames,
            nodes,
            self.metrics.build_ms,
            stats.groups_run,
            stats.groups_skipped
        );
    }

    fn apply_viewport(&mut self) -> bool {
        let Some(frame) = self.sched.frame() else {
            return false;
        };
        let setters: Vec<_> = frame
            .hit_regions
            .iter()
            .filter_map(|h| h.set_viewport_height.clone())
            .collect();
        let height = self.config.viewport.1 as f32 / self.config.density.max(f32::EPSILON);
        for set in setters {
            set(height);
        }
        self.sched.needs_frame()
    }

    pub fn click(&mut self, id: ViewId) -> Result<(), HostError> {
        let frame = self.current()?;
        if id == 0 || id as usize > frame.node_count() {
            return Err(HostError::UnknownView(id));
        }
        let handler = frame
            .hit_regions
            .iter()
            .find(|h| h.id == id)
            .and_then(|h| h.on_click.clone())
            .ok_or(HostError::NotClickable(id))?;
        log::trace!("click {id}");
        handler();
        Ok(())
    }

    /// Click the first node whose semantics label is exactly `label`.
    pub fn click_label(&mut self, label: &str) -> Result<(), HostError> {
        let id = self
            .current()?
            .find_by_label(label)
            .map(|n| n.id)
            .ok_or_else(|| HostError::NoSuchLabel(label.to_string()))?;
        self.click(id)
    }

    /// Send a scroll delta (dp) to the first scroll container. Returns the
    /// part it did not consume.
    pub fn scroll(&mut self, delta: Vec2) -> Result<Vec2, HostError> {
        let handler = self
            .current()?
            .hit_regions
            .iter()
            .find_map(|h| h.on_scroll.clone())
            .ok_or(HostError::NoScrollContainer)?;
        Ok(handler(delta))
    }

    /// Keep producing frames until nothing is invalidated. `tick` runs
    /// before each frame; tests use it to advance a `TestClock`.
    pub fn settle_with(&mut self, mut tick: impl FnMut()) -> Result<usize, HostError> {
        let mut frames = 0;
        while self.sched.needs_frame() {
            if frames >= self.config.max_settle_frames {
                return Err(HostError::DidNotSettle { frames });
            }
            tick();
            self.frame()?;
            frames += 1;
        }
        Ok(frames)
    }

    /// [`settle_with`](Self::settle_with) against the wall clock.
    pub fn settle(&mut self) -> Result<usize, HostError> {
        let interval = self.config.frame_interval;
        self.settle_with(|| std::thread::sleep(interval))
    }
}

/// Compose `root`, settle, run `session` against the host, settle again.
pub fn run_headless_app(
    config: HostConfig,
    root: impl FnMut(&mut Scheduler) -> View + 'static,
    session: impl FnOnce(&mut HeadlessHost) -> Result<(), HostError>,
) -> anyhow::Result<()> {
    let mut host = HeadlessHost::new(config, root);
    let nodes = host.frame()?.node_count();
    log::info!("first frame: {nodes} nodes");
    host.settle()?;

    session(&mut host)?;

    let frames = host.settle()?;
    log::info!(
        "session done: {} frames total, last frame {} nodes ({} settle frames)",
        host.metrics().frames,
        host.metrics().nodes,
        frames
    );
    Ok(())
}
