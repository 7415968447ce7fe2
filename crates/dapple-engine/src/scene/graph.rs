use glam::Vec2;

use super::circle::GradientCircle;
use super::command::SceneCommand;
use super::object::{CircleId, ObjectId, SceneObject, SpriteId};
use super::sprite::AnimatedSprite;
use super::store::KindStore;

/// Owns every live scene object and derives the per-frame visible set.
///
/// Storage is segregated by kind so renderers get homogeneous slices without
/// inspecting object types at draw time.
#[derive(Debug, Default)]
pub struct SceneGraph {
    sprites: KindStore<SpriteId, AnimatedSprite>,
    circles: KindStore<CircleId, GradientCircle>,

    /// Rebuilt by `scope()`: all sprites, then all circles.
    visible: Vec<ObjectId>,

    object_to_show_info: Option<ObjectId>,
    obj_make_location: Option<Vec2>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── lifecycle ──────────────────────────────────────────────────────────

    pub fn add_animated_sprite(&mut self, sprite: AnimatedSprite) -> SpriteId {
        self.sprites.insert(sprite)
    }

    pub fn add_gradient_circle(&mut self, circle: GradientCircle) -> CircleId {
        self.circles.insert(circle)
    }

    /// Removes a sprite. Unknown or already-removed ids are ignored.
    pub fn delete_animated_sprite(&mut self, id: SpriteId) -> Option<AnimatedSprite> {
        let removed = self.sprites.remove(id)?;
        self.forget(ObjectId::Sprite(id));
        Some(removed)
    }

    /// Removes a circle. Unknown or already-removed ids are ignored.
    pub fn delete_gradient_circle(&mut self, id: CircleId) -> Option<GradientCircle> {
        let removed = self.circles.remove(id)?;
        self.forget(ObjectId::Circle(id));
        Some(removed)
    }

    /// Removes any object; returns whether something was removed.
    pub fn delete(&mut self, id: ObjectId) -> bool {
        match id {
            ObjectId::Sprite(id) => self.delete_animated_sprite(id).is_some(),
            ObjectId::Circle(id) => self.delete_gradient_circle(id).is_some(),
        }
    }

    fn forget(&mut self, id: ObjectId) {
        self.visible.retain(|v| *v != id);
        if self.object_to_show_info == Some(id) {
            self.object_to_show_info = None;
        }
    }

    // ── queries ────────────────────────────────────────────────────────────

    pub fn num_sprites(&self) -> usize {
        self.sprites.len()
    }

    pub fn num_circles(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_sprites() == 0 && self.num_circles() == 0
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&AnimatedSprite> {
        self.sprites.get(id)
    }

    pub fn circle(&self, id: CircleId) -> Option<&GradientCircle> {
        self.circles.get(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&dyn SceneObject> {
        match id {
            ObjectId::Sprite(id) => self.sprites.get(id).map(|s| s as &dyn SceneObject),
            ObjectId::Circle(id) => self.circles.get(id).map(|c| c as &dyn SceneObject),
        }
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn SceneObject> {
        match id {
            ObjectId::Sprite(id) => self.sprites.get_mut(id).map(|s| s as &mut dyn SceneObject),
            ObjectId::Circle(id) => self.circles.get_mut(id).map(|c| c as &mut dyn SceneObject),
        }
    }

    pub fn contains_object(&self, id: ObjectId) -> bool {
        self.object(id).is_some()
    }

    /// Sprites in insertion order.
    pub fn animated_sprites(&self) -> impl Iterator<Item = (SpriteId, &AnimatedSprite)> {
        self.sprites.iter()
    }

    /// Circles in insertion order.
    pub fn gradient_circles(&self) -> impl Iterator<Item = (CircleId, &GradientCircle)> {
        self.circles.iter()
    }

    /// First sprite, in insertion order, containing the point.
    pub fn sprite_at(&self, x: f32, y: f32) -> Option<SpriteId> {
        self.sprites.find_at(x, y)
    }

    /// First circle, in insertion order, containing the point.
    pub fn circle_at(&self, x: f32, y: f32) -> Option<CircleId> {
        self.circles.find_at(x, y)
    }

    /// Any object under the point; sprites take precedence over circles.
    pub fn object_at(&self, x: f32, y: f32) -> Option<ObjectId> {
        self.sprite_at(x, y)
            .map(ObjectId::Sprite)
            .or_else(|| self.circle_at(x, y).map(ObjectId::Circle))
    }

    // ── per frame ──────────────────────────────────────────────────────────

    /// Advances every sprite's animation clock. Circles have no timed state.
    pub fn update(&mut self, delta_ms: f64) {
        self.sprites.for_each_mut(|sprite| sprite.update(delta_ms));
    }

    /// Rebuilds the visible set and returns it.
    ///
    /// Order is all sprites, then all circles, each in insertion order. No
    /// culling is applied yet; this is the place to add it.
    pub fn scope(&mut self) -> &[ObjectId] {
        self.visible.clear();
        self.visible
            .extend(self.sprites.ids().iter().copied().map(ObjectId::Sprite));
        self.visible
            .extend(self.circles.ids().iter().copied().map(ObjectId::Circle));
        &self.visible
    }

    /// Visible set computed by the last `scope()` call.
    pub fn visible(&self) -> &[ObjectId] {
        &self.visible
    }

    /// Sprites of the last visible set, in visible order.
    pub fn visible_sprites(&self) -> impl Iterator<Item = &AnimatedSprite> {
        self.visible.iter().filter_map(|id| match id {
            ObjectId::Sprite(id) => self.sprites.get(*id),
            ObjectId::Circle(_) => None,
        })
    }

    /// Circles of the last visible set, in visible order.
    pub fn visible_circles(&self) -> impl Iterator<Item = &GradientCircle> {
        self.visible.iter().filter_map(|id| match id {
            ObjectId::Circle(id) => self.circles.get(*id),
            ObjectId::Sprite(_) => None,
        })
    }

    // ── transient UI state ─────────────────────────────────────────────────

    /// Focused object, if it is still alive.
    pub fn object_to_show_info(&self) -> Option<ObjectId> {
        self.object_to_show_info.filter(|id| self.contains_object(*id))
    }

    pub fn set_object_to_show_info(&mut self, id: Option<ObjectId>) {
        self.object_to_show_info = id;
    }

    /// Pending spawn location, if any.
    pub fn obj_make_location(&self) -> Option<Vec2> {
        self.obj_make_location
    }

    pub fn set_obj_make_location(&mut self, location: Option<Vec2>) {
        self.obj_make_location = location;
    }

    /// Returns and clears the pending spawn location.
    pub fn take_obj_make_location(&mut self) -> Option<Vec2> {
        self.obj_make_location.take()
    }

    /// Applies a UI command.
    pub fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::ShowInfo(id) => self.set_object_to_show_info(id),
            SceneCommand::Spawn(at) => self.set_obj_make_location(Some(at)),
            SceneCommand::MoveTo(id, to) => {
                if let Some(object) = self.object_mut(id) {
                    object.move_to(to.x, to.y);
                }
            }
            SceneCommand::Delete(id) => {
                if self.delete(id) {
                    log::debug!("deleted {} {:?}", id.kind(), id);
                }
            }
        }
    }
}
