/// Default simulation step: 60 updates per second.
pub const DEFAULT_TIMESTEP_MS: f64 = 1000.0 / 60.0;

/// Update count per frame at which the loop gives up catching up.
pub const DEFAULT_MAX_UPDATE_STEPS: u32 = 240;

const FPS_UPDATE_INTERVAL_MS: f64 = 1000.0;
const FPS_ALPHA: f64 = 0.9;
const INITIAL_FPS: f64 = 60.0;

/// The three per-frame callbacks a `MainLoop` drives.
pub trait Simulation {
    /// Advances the simulation by exactly one fixed timestep.
    fn update(&mut self, delta_ms: f64);

    /// Renders; `interpolation` is the fraction of a timestep not yet simulated.
    fn draw(&mut self, interpolation: f64);

    /// Runs after drawing. `panic` is set when the update budget ran out this
    /// frame; the usual reaction is `lag.reset()`.
    fn end(&mut self, fps: f64, panic: bool, lag: &mut Lag);
}

/// Simulated time owed to the fixed-step update loop.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Lag {
    ms: f64,
}

impl Lag {
    #[inline]
    pub fn ms(&self) -> f64 {
        self.ms
    }

    /// Discards accumulated time and returns how much was dropped.
    pub fn reset(&mut self) -> f64 {
        std::mem::take(&mut self.ms)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
    /// Only observed while `end` runs after a frame that hit the update cap.
    Panicking,
}

/// Fixed-timestep frame loop.
///
/// The caller feeds wall time through `step`; the loop converts it into whole
/// `update` calls, one `draw` and one `end` per frame. Missed time beyond the
/// update cap is never replayed.
#[derive(Debug, Clone)]
pub struct MainLoop {
    timestep_ms: f64,
    max_update_steps: u32,
    state: LoopState,
    lag: Lag,

    fps: f64,
    clock_ms: f64,
    last_fps_update_ms: f64,
    frames_since_fps_update: u32,
    frame_count: u64,
}

impl MainLoop {
    pub fn new(timestep_ms: f64, max_update_steps: u32) -> Self {
        let timestep_ms = if timestep_ms.is_finite() && timestep_ms > 0.0 {
            timestep_ms
        } else {
            log::warn!("invalid timestep {timestep_ms}ms, using {DEFAULT_TIMESTEP_MS}ms");
            DEFAULT_TIMESTEP_MS
        };

        Self {
            timestep_ms,
            max_update_steps: max_update_steps.max(1),
            state: LoopState::Stopped,
            lag: Lag::default(),
            fps: INITIAL_FPS,
            clock_ms: 0.0,
            last_fps_update_ms: 0.0,
            frames_since_fps_update: 0,
            frame_count: 0,
        }
    }

    #[inline]
    pub fn timestep_ms(&self) -> f64 {
        self.timestep_ms
    }

    #[inline]
    pub fn max_update_steps(&self) -> u32 {
        self.max_update_steps
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state != LoopState::Stopped
    }

    /// Smoothed frames-per-second estimate.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    #[inline]
    pub fn lag_ms(&self) -> f64 {
        self.lag.ms()
    }

    /// Frames stepped since construction.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Starts (or restarts) the loop with a fresh lag and FPS window.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = LoopState::Running;
        self.lag.reset();
        self.last_fps_update_ms = self.clock_ms;
        self.frames_since_fps_update = 0;
        log::debug!("main loop started (timestep {:.3}ms)", self.timestep_ms);
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            self.state = LoopState::Stopped;
            log::debug!("main loop stopped");
        }
    }

    /// Runs one frame for `elapsed_ms` of wall time. No-op while stopped.
    pub fn step<S: Simulation + ?Sized>(&mut self, elapsed_ms: f64, sim: &mut S) {
        if !self.is_running() {
            return;
        }

        let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        self.clock_ms += elapsed_ms;
        self.lag.ms += elapsed_ms;

        self.track_fps();

        let mut steps = 0u32;
        let mut panic = false;
        while self.lag.ms >= self.timestep_ms {
            sim.update(self.timestep_ms);
            self.lag.ms -= self.timestep_ms;
            steps += 1;
            if steps >= self.max_update_steps {
                panic = true;
                break;
            }
        }

        sim.draw(self.interpolation());

        if panic {
            self.state = LoopState::Panicking;
        }
        sim.end(self.fps, panic, &mut self.lag);
        if self.state == LoopState::Panicking {
            self.state = LoopState::Running;
        }

        self.frame_count += 1;
    }

    /// Fraction of a timestep left in the lag, in `[0, 1)`.
    pub fn interpolation(&self) -> f64 {
        (self.lag.ms / self.timestep_ms).clamp(0.0, 1.0 - f64::EPSILON)
    }

    fn track_fps(&mut self) {
        let window_ms = self.clock_ms - self.last_fps_update_ms;
        if window_ms > FPS_UPDATE_INTERVAL_MS {
            let measured = f64::from(self.frames_since_fps_update) * 1000.0 / window_ms;
            self.fps = FPS_ALPHA * measured + (1.0 - FPS_ALPHA) * self.fps;
            self.last_fps_update_ms = self.clock_ms;
            self.frames_since_fps_update = 0;
        }
        self.frames_since_fps_update += 1;
    }
}

impl Default for MainLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTEP_MS, DEFAULT_MAX_UPDATE_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<f64>,
        draws: Vec<f64>,
        ends: Vec<(f64, bool)>,
        reset_on_panic: bool,
        discarded: f64,
    }

    impl Simulation for Recorder {
        fn update(&mut self, delta_ms: f64) {
            self.updates.push(delta_ms);
        }

        fn draw(&mut self, interpolation: f64) {
            self.draws.push(interpolation);
        }

        fn end(&mut self, fps: f64, panic: bool, lag: &mut Lag) {
            self.ends.push((fps, panic));
            if panic && self.reset_on_panic {
                self.discarded += lag.reset();
            }
        }
    }

    fn running(timestep: f64, max_steps: u32) -> MainLoop {
        let mut main_loop = MainLoop::new(timestep, max_steps);
        main_loop.start();
        main_loop
    }

    #[test]
    fn stopped_loop_does_nothing() {
        let mut main_loop = MainLoop::default();
        let mut sim = Recorder::default();
        main_loop.step(100.0, &mut sim);
        assert!(sim.updates.is_empty() && sim.draws.is_empty() && sim.ends.is_empty());
    }

    #[test]
    fn whole_timesteps_become_updates() {
        let mut main_loop = running(10.0, 240);
        let mut sim = Recorder::default();

        main_loop.step(35.0, &mut sim);

        assert_eq!(sim.updates, vec![10.0, 10.0, 10.0]);
        assert_eq!(sim.draws.len(), 1);
        assert_relative_eq!(sim.draws[0], 0.5);
        assert_eq!(sim.ends, vec![(60.0, false)]);
        assert_relative_eq!(main_loop.lag_ms(), 5.0);
    }

    #[test]
    fn short_frame_draws_without_updating() {
        let mut main_loop = running(10.0, 240);
        let mut sim = Recorder::default();

        main_loop.step(4.0, &mut sim);
        assert!(sim.updates.is_empty());
        main_loop.step(6.0, &mut sim);
        assert_eq!(sim.updates.len(), 1);
        assert_eq!(sim.draws.len(), 2);
    }

    #[test]
    fn stall_sets_panic_and_caps_updates() {
        let mut main_loop = running(10.0, 5);
        let mut sim = Recorder { reset_on_panic: true, ..Default::default() };

        main_loop.step(1000.0, &mut sim);

        assert_eq!(sim.updates.len(), 5);
        assert_eq!(sim.ends.last().map(|e| e.1), Some(true));
        assert_relative_eq!(sim.discarded, 950.0);
        assert_eq!(main_loop.lag_ms(), 0.0);
        assert_eq!(main_loop.state(), LoopState::Running);

        // Next frame starts from a clean lag; nothing is replayed.
        main_loop.step(10.0, &mut sim);
        assert_eq!(sim.updates.len(), 6);
        assert_eq!(sim.ends.last().map(|e| e.1), Some(false));
    }

    #[test]
    fn interpolation_stays_below_one_when_lag_is_kept() {
        let mut main_loop = running(10.0, 2);
        let mut sim = Recorder::default();

        main_loop.step(100.0, &mut sim);
        let interpolation = *sim.draws.last().unwrap();
        assert!((0.0..1.0).contains(&interpolation));
    }

    #[test]
    fn fps_is_smoothed_once_per_second() {
        let mut main_loop = running(10.0, 240);
        let mut sim = Recorder::default();

        for _ in 0..=30 {
            main_loop.step(1000.0 / 30.0 + 0.01, &mut sim);
        }
        // One window closed at ~30 frames per second.
        assert!(main_loop.fps() < 60.0);
        assert!(main_loop.fps() > 30.0);
    }

    #[test]
    fn stop_and_restart_clears_lag() {
        let mut main_loop = running(10.0, 240);
        let mut sim = Recorder::default();
        main_loop.step(5.0, &mut sim);
        main_loop.stop();
        assert_eq!(main_loop.state(), LoopState::Stopped);

        main_loop.start();
        assert_eq!(main_loop.lag_ms(), 0.0);
    }

    #[test]
    fn invalid_timestep_falls_back_to_default() {
        assert_eq!(MainLoop::new(0.0, 10).timestep_ms(), DEFAULT_TIMESTEP_MS);
        assert_eq!(MainLoop::new(f64::NAN, 10).timestep_ms(), DEFAULT_TIMESTEP_MS);
    }
}
