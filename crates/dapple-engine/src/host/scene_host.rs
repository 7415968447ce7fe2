use std::fmt::Write as _;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SceneError;
use crate::paint::CircleColor;
use crate::resources::ResourceManager;
use crate::scene::{AnimatedSprite, GradientCircle, ObjectId, SceneGraph, SceneObject};
use crate::time::{Lag, MainLoop};

use super::config::HostConfig;

/// Owns the scene and everything needed to populate it at runtime.
///
/// Per frame, the loop calls `update` zero or more times, then `prepare_draw`
/// (spawn step plus visible-set rebuild), then `end`.
#[derive(Debug)]
pub struct SceneHost {
    scene: SceneGraph,
    resources: ResourceManager,
    config: HostConfig,

    /// One ready-to-clone sprite per spawnable type, in config order.
    spawn_templates: Vec<AnimatedSprite>,
    rng: StdRng,
    fps: f64,
}

impl SceneHost {
    /// Resolves every spawnable sprite type up front.
    ///
    /// Unknown type ids or a missing `initial_sequence` fail here rather than
    /// on the first click.
    pub fn new(resources: ResourceManager, config: HostConfig) -> Result<Self, SceneError> {
        let spawn_templates = config
            .spawn_sprite_types
            .iter()
            .map(|id| {
                let ty = resources.get_animated_sprite_type_by_id(id)?;
                AnimatedSprite::new(ty, &config.initial_sequence)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::info!(
            "scene host ready: {} spawnable sprite type(s), circle diameter {}",
            spawn_templates.len(),
            config.circle_diameter
        );

        Ok(Self {
            scene: SceneGraph::new(),
            resources,
            config,
            spawn_templates,
            rng,
            fps: 0.0,
        })
    }

    #[inline]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    #[inline]
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    #[inline]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Last FPS estimate reported by the loop.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// A stopped loop configured from this host's timing settings.
    pub fn main_loop(&self) -> MainLoop {
        MainLoop::new(self.config.timestep_ms, self.config.max_update_steps)
    }

    pub fn update(&mut self, delta_ms: f64) {
        self.scene.update(delta_ms);
    }

    /// Runs the spawn step, then rebuilds the visible set.
    ///
    /// Returns the spawned object, if any. At most one object is spawned per
    /// call and the pending location is consumed.
    pub fn prepare_draw(&mut self) -> Option<ObjectId> {
        let spawned = self
            .scene
            .take_obj_make_location()
            .map(|at| self.spawn_at(at));
        self.scene.scope();
        spawned
    }

    pub fn end(&mut self, fps: f64, panic: bool, lag: &mut Lag) {
        self.fps = fps;
        if panic {
            let discarded = lag.reset();
            log::warn!("main loop panicked, discarding {}ms", discarded.round());
        }
    }

    /// Picks uniformly among a circle and each spawnable sprite type and
    /// places the object centred on `at`. The new object gets focus.
    fn spawn_at(&mut self, at: Vec2) -> ObjectId {
        let choice = self.rng.gen_range(0..=self.spawn_templates.len());

        let id = match choice.checked_sub(1).and_then(|i| self.spawn_templates.get(i)) {
            Some(template) => {
                let mut sprite = template.clone();
                let top_left = at - Vec2::new(sprite.width(), sprite.height()) * 0.5;
                sprite.move_to(top_left.x, top_left.y);
                log::debug!("spawn sprite `{}` at {at}", sprite.sprite_type().name());
                ObjectId::Sprite(self.scene.add_animated_sprite(sprite))
            }
            None => {
                let color = CircleColor::random(&mut self.rng);
                let circle = GradientCircle::centered_at(at.x, at.y, self.config.circle_diameter, color);
                log::debug!("spawn {color} circle at {at}");
                ObjectId::Circle(self.scene.add_gradient_circle(circle))
            }
        };

        self.scene.set_object_to_show_info(Some(id));
        id
    }

    /// Description of the focused object, for the info display.
    pub fn info_text(&self) -> Option<String> {
        let id = self.scene.object_to_show_info()?;
        let mut text = String::new();

        match id {
            ObjectId::Sprite(sid) => {
                let sprite = self.scene.sprite(sid)?;
                let pos = sprite.position();
                let _ = write!(
                    text,
                    "{} [{}] frame {} at ({:.0}, {:.0})",
                    sprite.sprite_type().name(),
                    sprite.current_sequence(),
                    sprite.current_frame_index(),
                    pos.x,
                    pos.y,
                );
            }
            ObjectId::Circle(cid) => {
                let circle = self.scene.circle(cid)?;
                let center = circle.center();
                let _ = write!(
                    text,
                    "{} circle d={:.0} at ({:.0}, {:.0})",
                    circle.color(),
                    circle.diameter(),
                    center.x,
                    center.y,
                );
            }
        }

        Some(text)
    }

    /// One-line scene summary: object counts, FPS and the focused object.
    pub fn status_text(&self) -> String {
        let mut text = format!(
            "sprites: {}  circles: {}  fps: {:.0}",
            self.scene.num_sprites(),
            self.scene.num_circles(),
            self.fps,
        );
        if let Some(info) = self.info_text() {
            let _ = write!(text, "  |  {info}");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::host::{Headless, HostFrame, ScenePresenter};
    use crate::scene::{AnimatedSpriteType, AnimationFrame};

    fn resources() -> ResourceManager {
        let mut resources = ResourceManager::new();
        for name in ["walker", "block"] {
            resources.register_sprite_type(
                AnimatedSpriteType::builder(name, 64.0, 32.0)
                    .sequence(
                        "FORWARD",
                        [
                            AnimationFrame::new(Rect::new(0.0, 0.0, 64.0, 32.0), 100.0),
                            AnimationFrame::new(Rect::new(64.0, 0.0, 64.0, 32.0), 100.0),
                        ],
                    )
                    .build()
                    .unwrap(),
            );
        }
        resources
    }

    fn config(seed: u64) -> HostConfig {
        HostConfig {
            spawn_sprite_types: vec!["walker".into(), "block".into()],
            seed: Some(seed),
            ..HostConfig::default()
        }
    }

    fn host(seed: u64) -> SceneHost {
        SceneHost::new(resources(), config(seed)).unwrap()
    }

    #[derive(Default)]
    struct CountingPresenter {
        frames: usize,
        visible: Vec<usize>,
    }

    impl ScenePresenter for CountingPresenter {
        fn present(&mut self, scene: &SceneGraph, _resources: &ResourceManager, _interpolation: f64) {
            self.frames += 1;
            self.visible.push(scene.visible().len());
        }
    }

    #[test]
    fn unknown_spawn_type_is_fatal() {
        let mut cfg = config(1);
        cfg.spawn_sprite_types.push("missing".into());
        let err = SceneHost::new(resources(), cfg).unwrap_err();
        assert_eq!(err, SceneError::UnknownSpriteType("missing".into()));
    }

    #[test]
    fn missing_initial_sequence_is_fatal() {
        let cfg = HostConfig { initial_sequence: "BACKWARD".into(), ..config(1) };
        assert!(matches!(
            SceneHost::new(resources(), cfg),
            Err(SceneError::UnknownSequence { .. })
        ));
    }

    #[test]
    fn one_location_spawns_exactly_one_object() {
        let mut host = host(7);
        host.scene_mut().set_obj_make_location(Some(Vec2::new(300.0, 200.0)));

        let spawned = host.prepare_draw().expect("spawned");
        assert_eq!(host.scene().num_sprites() + host.scene().num_circles(), 1);
        assert_eq!(host.scene().obj_make_location(), None);
        assert_eq!(host.scene().object_to_show_info(), Some(spawned));
        assert_eq!(host.scene().visible(), &[spawned]);

        // Spawned centred on the location.
        let center = host.scene().object(spawned).map(|o| o.center());
        assert_eq!(center, Some(Vec2::new(300.0, 200.0)));

        assert_eq!(host.prepare_draw(), None);
        assert_eq!(host.scene().num_sprites() + host.scene().num_circles(), 1);
    }

    #[test]
    fn spawns_cover_every_choice() {
        let mut host = host(42);
        for i in 0..60 {
            host.scene_mut()
                .set_obj_make_location(Some(Vec2::new(i as f32 * 10.0, 0.0)));
            host.prepare_draw();
        }

        let scene = host.scene();
        assert_eq!(scene.num_sprites() + scene.num_circles(), 60);
        assert!(scene.num_circles() > 0);
        let names: std::collections::HashSet<_> = scene
            .animated_sprites()
            .map(|(_, s)| s.sprite_type().name().to_owned())
            .collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn same_seed_same_scene() {
        let kinds = |seed| {
            let mut host = host(seed);
            (0..10)
                .map(|_| {
                    host.scene_mut().set_obj_make_location(Some(Vec2::ZERO));
                    host.prepare_draw().map(ObjectId::kind)
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(3), kinds(3));
    }

    #[test]
    fn spawned_circles_use_configured_diameter() {
        let cfg = HostConfig {
            spawn_sprite_types: Vec::new(),
            circle_diameter: 80.0,
            ..config(5)
        };
        let mut host = SceneHost::new(resources(), cfg).unwrap();
        host.scene_mut().set_obj_make_location(Some(Vec2::new(40.0, 40.0)));
        let Some(ObjectId::Circle(id)) = host.prepare_draw() else {
            panic!("only circles are spawnable");
        };
        assert_eq!(host.scene().circle(id).map(GradientCircle::diameter), Some(80.0));
    }

    #[test]
    fn panic_discards_lag() {
        let mut host = host(1);
        let mut main_loop = MainLoop::new(10.0, 3);
        main_loop.start();
        let mut presenter = CountingPresenter::default();

        main_loop.step(500.0, &mut HostFrame::new(&mut host, &mut presenter));

        assert_eq!(main_loop.lag_ms(), 0.0);
        assert_eq!(presenter.frames, 1);
    }

    #[test]
    fn loop_drives_spawn_then_present() {
        let mut host = host(9);
        let mut main_loop = host.main_loop();
        main_loop.start();
        let mut presenter = CountingPresenter::default();

        main_loop.step(5.0, &mut HostFrame::new(&mut host, &mut presenter));
        host.scene_mut().set_obj_make_location(Some(Vec2::new(10.0, 10.0)));
        main_loop.step(5.0, &mut HostFrame::new(&mut host, &mut presenter));

        assert_eq!(presenter.visible, vec![0, 1]);
    }

    #[test]
    fn headless_frames_still_update_and_spawn() {
        let mut host = host(13);
        let walker = host.resources().get_animated_sprite_type_by_id("walker").unwrap();
        let sprite = host
            .scene_mut()
            .add_animated_sprite(AnimatedSprite::new(walker, "FORWARD").unwrap());
        host.scene_mut().set_obj_make_location(Some(Vec2::new(10.0, 10.0)));

        let mut main_loop = MainLoop::new(10.0, 240);
        main_loop.start();
        main_loop.step(100.0, &mut HostFrame::new(&mut host, &mut Headless));

        let scene = host.scene();
        assert_eq!(scene.sprite(sprite).map(AnimatedSprite::current_frame_index), Some(1));
        assert_eq!(scene.obj_make_location(), None);
        assert_eq!(scene.num_sprites() + scene.num_circles(), 2);
        assert_eq!(scene.visible().len(), 2);
        assert_eq!(main_loop.lag_ms(), 0.0);
    }

    #[test]
    fn info_text_describes_focus() {
        let mut host = host(11);
        assert_eq!(host.info_text(), None);

        let id = host.scene_mut().add_gradient_circle(GradientCircle::centered_at(
            50.0,
            60.0,
            100.0,
            CircleColor::Red,
        ));
        host.scene_mut().set_object_to_show_info(Some(ObjectId::Circle(id)));
        assert_eq!(host.info_text().as_deref(), Some("red circle d=100 at (50, 60)"));
        assert!(host.status_text().starts_with("sprites: 0  circles: 1"));
    }
}
