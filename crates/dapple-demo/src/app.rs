use dapple_engine::core::{App, AppControl, FrameCtx};
use dapple_engine::host::{Headless, HostFrame, ScenePresenter, SceneHost};
use dapple_engine::paint::Color;
use dapple_engine::render::{RenderCtx, RenderStats, RenderTarget, SceneRenderer, TextRenderer};
use dapple_engine::resources::ResourceManager;
use dapple_engine::scene::{SceneCommand, SceneGraph};
use dapple_engine::text::{FontId, FontSystem, TextLabel};
use dapple_engine::time::MainLoop;
use dapple_engine::ui::PointerController;
use dapple_engine::window::CursorIcon;
use glam::Vec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

const LABEL_SIZE: f32 = 16.0;
const LABEL_ORIGIN: Vec2 = Vec2::new(12.0, 10.0);

/// Demo application: pointer input in, fixed-step scene loop, GPU out.
pub struct DemoApp {
    host: SceneHost,
    main_loop: MainLoop,
    controller: PointerController,
    renderer: SceneRenderer,

    fonts: FontSystem,
    font: Option<FontId>,
    text: TextRenderer,

    commands: Vec<SceneCommand>,
    base_title: String,
    title: String,
    last_stats: RenderStats,
}

impl DemoApp {
    /// `font` is `None` when no font could be loaded; status then goes to the
    /// window title instead of the canvas.
    pub fn new(host: SceneHost, fonts: FontSystem, font: Option<FontId>, base_title: impl Into<String>) -> Self {
        let mut main_loop = host.main_loop();
        main_loop.start();

        Self {
            host,
            main_loop,
            controller: PointerController::new(),
            renderer: SceneRenderer::new(),
            fonts,
            font,
            text: TextRenderer::new(),
            commands: Vec::new(),
            base_title: base_title.into(),
            title: String::new(),
            last_stats: RenderStats::default(),
        }
    }

    fn cursor(&self) -> CursorIcon {
        if self.controller.dragging().is_some() {
            CursorIcon::Grabbing
        } else if self.host.scene().object_to_show_info().is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        }
    }

    fn status_line(&self) -> String {
        format!("{}  |  draws: {}", self.host.status_text(), self.last_stats.total())
    }
}

/// Presents the scene through the GPU renderers for one frame.
struct GpuPresenter<'a, 'c, 't> {
    renderer: &'a mut SceneRenderer,
    rctx: &'a RenderCtx<'c>,
    target: &'a mut RenderTarget<'t>,
    stats: RenderStats,
}

impl ScenePresenter for GpuPresenter<'_, '_, '_> {
    fn present(&mut self, scene: &SceneGraph, resources: &ResourceManager, _interpolation: f64) {
        self.stats = self.renderer.render(self.rctx, self.target, scene, resources);
    }
}

impl App for DemoApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed && event.logical_key == Key::Named(NamedKey::Escape) {
                log::info!("escape pressed, exiting");
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // ── Input ─────────────────────────────────────────────────────────
        // Apply per event so each hit test sees the previous event's effect.
        for event in &ctx.input_frame.events {
            self.controller
                .handle_into(self.host.scene(), event, &mut self.commands);
            for command in self.commands.drain(..) {
                self.host.scene_mut().apply(command);
            }
        }
        ctx.window.set_cursor(self.cursor());

        // ── Step + render ─────────────────────────────────────────────────
        let dt_ms = ctx.time.dt_ms;
        let clear = self.host.config().clear_color;
        let label = self.font.map(|font| TextLabel {
            text: self.status_line(),
            font,
            size: LABEL_SIZE,
            origin: LABEL_ORIGIN,
            color: Color::from_srgb_u8(0x20, 0x24, 0x2c, 0xff),
        });

        let (host, main_loop, renderer) = (&mut self.host, &mut self.main_loop, &mut self.renderer);
        let (text, fonts) = (&mut self.text, &self.fonts);
        let mut stats = None;

        let control = ctx.render(clear, |rctx, target| {
            let mut presenter = GpuPresenter {
                renderer,
                rctx,
                target: &mut *target,
                stats: RenderStats::default(),
            };
            main_loop.step(dt_ms, &mut HostFrame::new(&mut *host, &mut presenter));
            stats = Some(presenter.stats);

            if let Some(label) = &label {
                text.render(rctx, target, std::slice::from_ref(label), fonts);
            }
        });

        match stats {
            Some(stats) => self.last_stats = stats,
            // No surface this frame; simulation time still has to pass.
            None => self
                .main_loop
                .step(dt_ms, &mut HostFrame::new(&mut self.host, &mut Headless)),
        }

        // ── Title fallback ────────────────────────────────────────────────
        if self.font.is_none() {
            let title = format!("{}  |  {}", self.base_title, self.status_line());
            if title != self.title {
                ctx.window.set_title(&title);
                self.title = title;
            }
        }

        control
    }
}
