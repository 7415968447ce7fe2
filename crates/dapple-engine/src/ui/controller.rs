use glam::Vec2;

use crate::input::{MouseButton, PointerEvent, PointerEventKind};
use crate::scene::{ObjectId, SceneCommand, SceneGraph};

/// Maximum pointer travel, in logical pixels, for a press/release pair to
/// count as a click.
pub const CLICK_SLOP_PX: f32 = 4.0;

/// Maximum gap between two clicks on the same object for a double click.
pub const DOUBLE_CLICK_MS: f64 = 400.0;

#[derive(Debug, Copy, Clone)]
struct Press {
    at: Vec2,
    target: Option<ObjectId>,
}

#[derive(Debug, Copy, Clone)]
struct Drag {
    id: ObjectId,
    /// Object position minus pointer position at press time.
    offset: Vec2,
}

#[derive(Debug, Copy, Clone)]
struct Click {
    at: Vec2,
    time_ms: f64,
    target: ObjectId,
}

/// Bridges pointer events to the scene.
///
/// Reads the scene for hit tests only; every change is returned as a
/// [`SceneCommand`] for the caller to apply. Interactions use the left button:
///
/// - press on an object starts dragging it
/// - moving while dragging moves the object, otherwise focuses the hovered one
/// - a click on empty space requests a spawn there
/// - a double click on an object deletes it
///
/// Sprites are hit before circles.
#[derive(Debug, Default)]
pub struct PointerController {
    press: Option<Press>,
    drag: Option<Drag>,
    last_click: Option<Click>,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object currently being dragged.
    pub fn dragging(&self) -> Option<ObjectId> {
        self.drag.map(|d| d.id)
    }

    /// Handles one event, appending resulting commands to `out`.
    pub fn handle_into(&mut self, scene: &SceneGraph, event: &PointerEvent, out: &mut Vec<SceneCommand>) {
        let p = event.position();
        match event.kind {
            PointerEventKind::Pressed(MouseButton::Left) => self.on_press(scene, p),
            PointerEventKind::Moved => self.on_move(scene, p, out),
            PointerEventKind::Released(MouseButton::Left) => {
                self.on_release(scene, p, event.time_ms, out)
            }
            PointerEventKind::Left => {
                self.press = None;
                self.drag = None;
                if scene.object_to_show_info().is_some() {
                    out.push(SceneCommand::ShowInfo(None));
                }
            }
            PointerEventKind::Pressed(_) | PointerEventKind::Released(_) => {}
        }
    }

    /// Handles one event and returns the resulting commands.
    pub fn handle(&mut self, scene: &SceneGraph, event: &PointerEvent) -> Vec<SceneCommand> {
        let mut out = Vec::new();
        self.handle_into(scene, event, &mut out);
        out
    }

    fn on_press(&mut self, scene: &SceneGraph, p: Vec2) {
        let target = scene.object_at(p.x, p.y);
        self.press = Some(Press { at: p, target });

        self.drag = target.and_then(|id| {
            let object = scene.object(id)?;
            let pos = object.position();
            log::debug!("drag start: {} {:?}", id.kind(), id);
            Some(Drag {
                id,
                offset: Vec2::new(pos.x, pos.y) - p,
            })
        });
    }

    fn on_move(&mut self, scene: &SceneGraph, p: Vec2, out: &mut Vec<SceneCommand>) {
        if let Some(drag) = self.drag {
            if scene.contains_object(drag.id) {
                out.push(SceneCommand::MoveTo(drag.id, p + drag.offset));
                return;
            }
            self.drag = None;
        }

        let hovered = scene.object_at(p.x, p.y);
        if hovered != scene.object_to_show_info() {
            out.push(SceneCommand::ShowInfo(hovered));
        }
    }

    fn on_release(&mut self, scene: &SceneGraph, p: Vec2, time_ms: f64, out: &mut Vec<SceneCommand>) {
        if let Some(drag) = self.drag.take() {
            log::debug!("drag end: {:?}", drag.id);
        }

        let Some(press) = self.press.take() else {
            return;
        };
        if press.at.distance(p) > CLICK_SLOP_PX {
            return;
        }

        match press.target.filter(|id| scene.contains_object(*id)) {
            None => {
                self.last_click = None;
                out.push(SceneCommand::Spawn(p));
            }
            Some(target) => {
                let is_double = self.last_click.is_some_and(|c| {
                    c.target == target
                        && time_ms - c.time_ms <= DOUBLE_CLICK_MS
                        && c.at.distance(p) <= CLICK_SLOP_PX
                });

                if is_double {
                    self.last_click = None;
                    out.push(SceneCommand::Delete(target));
                } else {
                    self.last_click = Some(Click { at: p, time_ms, target });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::CircleColor;
    use crate::scene::{GradientCircle, DEFAULT_DIAMETER};

    fn scene_with_circle() -> (SceneGraph, ObjectId) {
        let mut scene = SceneGraph::new();
        let id = scene.add_gradient_circle(GradientCircle::centered_at(
            100.0,
            100.0,
            DEFAULT_DIAMETER,
            CircleColor::Blue,
        ));
        (scene, ObjectId::Circle(id))
    }

    fn click(ctl: &mut PointerController, scene: &SceneGraph, x: f32, y: f32, t: f64) -> Vec<SceneCommand> {
        let mut out = ctl.handle(scene, &PointerEvent::pressed(MouseButton::Left, x, y, t));
        out.extend(ctl.handle(scene, &PointerEvent::released(MouseButton::Left, x, y, t + 50.0)));
        out
    }

    #[test]
    fn click_on_empty_space_spawns() {
        let (scene, _) = scene_with_circle();
        let mut ctl = PointerController::new();

        let out = click(&mut ctl, &scene, 600.0, 600.0, 0.0);
        assert_eq!(out, vec![SceneCommand::Spawn(Vec2::new(600.0, 600.0))]);
    }

    #[test]
    fn single_click_on_object_does_nothing() {
        let (scene, _) = scene_with_circle();
        let mut ctl = PointerController::new();
        assert!(click(&mut ctl, &scene, 100.0, 100.0, 0.0).is_empty());
    }

    #[test]
    fn double_click_deletes() {
        let (scene, id) = scene_with_circle();
        let mut ctl = PointerController::new();

        click(&mut ctl, &scene, 100.0, 100.0, 0.0);
        let out = click(&mut ctl, &scene, 101.0, 100.0, 200.0);
        assert_eq!(out, vec![SceneCommand::Delete(id)]);
    }

    #[test]
    fn slow_second_click_is_not_a_double_click() {
        let (scene, _) = scene_with_circle();
        let mut ctl = PointerController::new();

        click(&mut ctl, &scene, 100.0, 100.0, 0.0);
        assert!(click(&mut ctl, &scene, 100.0, 100.0, 2000.0).is_empty());
    }

    #[test]
    fn drag_moves_object_by_pointer_delta() {
        let (scene, id) = scene_with_circle();
        let mut ctl = PointerController::new();

        // Circle top-left is (-28, -28); pressing at (100, 100) gives offset (-128, -128).
        ctl.handle(&scene, &PointerEvent::pressed(MouseButton::Left, 100.0, 100.0, 0.0));
        assert_eq!(ctl.dragging(), Some(id));

        let out = ctl.handle(&scene, &PointerEvent::moved(150.0, 120.0, 10.0));
        assert_eq!(out, vec![SceneCommand::MoveTo(id, Vec2::new(22.0, -8.0))]);

        // Released far from the press: a drag, not a click.
        let out = ctl.handle(&scene, &PointerEvent::released(MouseButton::Left, 150.0, 120.0, 20.0));
        assert!(out.is_empty());
        assert_eq!(ctl.dragging(), None);
    }

    #[test]
    fn hover_focuses_and_unfocuses() {
        let (mut scene, id) = scene_with_circle();
        let mut ctl = PointerController::new();

        let out = ctl.handle(&scene, &PointerEvent::moved(100.0, 100.0, 0.0));
        assert_eq!(out, vec![SceneCommand::ShowInfo(Some(id))]);
        for cmd in out {
            scene.apply(cmd);
        }

        // Same object: no repeat.
        assert!(ctl.handle(&scene, &PointerEvent::moved(101.0, 100.0, 1.0)).is_empty());

        let out = ctl.handle(&scene, &PointerEvent::moved(700.0, 700.0, 2.0));
        assert_eq!(out, vec![SceneCommand::ShowInfo(None)]);
    }

    #[test]
    fn leaving_window_ends_drag_and_clears_focus() {
        let (mut scene, id) = scene_with_circle();
        scene.set_object_to_show_info(Some(id));
        let mut ctl = PointerController::new();
        ctl.handle(&scene, &PointerEvent::pressed(MouseButton::Left, 100.0, 100.0, 0.0));

        let out = ctl.handle(&scene, &PointerEvent::left(5.0));
        assert_eq!(out, vec![SceneCommand::ShowInfo(None)]);
        assert_eq!(ctl.dragging(), None);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let (scene, _) = scene_with_circle();
        let mut ctl = PointerController::new();
        let mut out = ctl.handle(&scene, &PointerEvent::pressed(MouseButton::Right, 600.0, 600.0, 0.0));
        out.extend(ctl.handle(&scene, &PointerEvent::released(MouseButton::Right, 600.0, 600.0, 1.0)));
        assert!(out.is_empty());
    }
}
