use crate::resources::ResourceManager;
use crate::scene::SceneGraph;
use crate::time::{Lag, Simulation};

use super::scene_host::SceneHost;

/// Draws the scene's current visible set.
///
/// Called once per frame after the host has run its spawn step and rebuilt
/// the visible set.
pub trait ScenePresenter {
    fn present(&mut self, scene: &SceneGraph, resources: &ResourceManager, interpolation: f64);
}

/// Presenter for frames with no surface to draw into (minimized window,
/// swapchain being reconfigured). The host still runs its draw step, so
/// pending spawns are consumed and the visible set stays current.
#[derive(Debug, Default, Copy, Clone)]
pub struct Headless;

impl ScenePresenter for Headless {
    fn present(&mut self, _scene: &SceneGraph, _resources: &ResourceManager, _interpolation: f64) {}
}

/// One frame's pairing of host and presenter, driven by `MainLoop::step`.
pub struct HostFrame<'a, P: ScenePresenter + ?Sized> {
    pub host: &'a mut SceneHost,
    pub presenter: &'a mut P,
}

impl<'a, P: ScenePresenter + ?Sized> HostFrame<'a, P> {
    pub fn new(host: &'a mut SceneHost, presenter: &'a mut P) -> Self {
        Self { host, presenter }
    }
}

impl<P: ScenePresenter + ?Sized> Simulation for HostFrame<'_, P> {
    fn update(&mut self, delta_ms: f64) {
        self.host.update(delta_ms);
    }

    fn draw(&mut self, interpolation: f64) {
        self.host.prepare_draw();
        self.presenter
            .present(self.host.scene(), self.host.resources(), interpolation);
    }

    fn end(&mut self, fps: f64, panic: bool, lag: &mut Lag) {
        self.host.end(fps, panic, lag);
    }
}
