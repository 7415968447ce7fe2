use std::collections::HashMap;
use std::rc::Rc;

use crate::error::SceneError;
use crate::scene::AnimatedSpriteType;

use super::atlas::AtlasImage;

/// Registry of sprite types by id, plus the atlas they sample from.
///
/// Sprite types are handed out as `Rc` clones so every sprite of a type shares
/// one immutable copy of its animation data.
#[derive(Debug, Default)]
pub struct ResourceManager {
    sprite_types: HashMap<String, Rc<AnimatedSpriteType>>,
    atlas: AtlasImage,
    /// Bumped by every `set_atlas`; GPU copies compare against it.
    atlas_generation: u64,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sprite type under its own name, replacing any previous one.
    pub fn register_sprite_type(&mut self, ty: AnimatedSpriteType) -> Rc<AnimatedSpriteType> {
        let ty = Rc::new(ty);
        let id = ty.name().to_owned();
        if self.sprite_types.insert(id.clone(), Rc::clone(&ty)).is_some() {
            log::debug!("sprite type `{id}` replaced");
        }
        ty
    }

    pub fn get_animated_sprite_type_by_id(&self, id: &str) -> Result<Rc<AnimatedSpriteType>, SceneError> {
        self.sprite_types
            .get(id)
            .cloned()
            .ok_or_else(|| SceneError::UnknownSpriteType(id.to_owned()))
    }

    /// Registered ids, sorted.
    pub fn sprite_type_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sprite_types.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn set_atlas(&mut self, atlas: AtlasImage) {
        log::debug!("atlas set: {}x{}", atlas.width(), atlas.height());
        self.atlas = atlas;
        self.atlas_generation += 1;
    }

    pub fn atlas(&self) -> &AtlasImage {
        &self.atlas
    }

    #[inline]
    pub fn atlas_generation(&self) -> u64 {
        self.atlas_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::scene::AnimationFrame;

    fn ty(name: &str) -> AnimatedSpriteType {
        AnimatedSpriteType::builder(name, 32.0, 32.0)
            .sequence("IDLE", [AnimationFrame::new(Rect::new(0.0, 0.0, 32.0, 32.0), 50.0)])
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_returns_shared_type() {
        let mut resources = ResourceManager::new();
        let registered = resources.register_sprite_type(ty("hero"));

        let found = resources.get_animated_sprite_type_by_id("hero").unwrap();
        assert!(Rc::ptr_eq(&registered, &found));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let resources = ResourceManager::new();
        assert_eq!(
            resources.get_animated_sprite_type_by_id("ghost").unwrap_err(),
            SceneError::UnknownSpriteType("ghost".into())
        );
    }

    #[test]
    fn ids_are_sorted() {
        let mut resources = ResourceManager::new();
        resources.register_sprite_type(ty("b"));
        resources.register_sprite_type(ty("a"));
        assert_eq!(resources.sprite_type_ids(), vec!["a", "b"]);
    }

    #[test]
    fn default_atlas_is_white_pixel() {
        let resources = ResourceManager::new();
        assert_eq!(resources.atlas().rgba(), &[255, 255, 255, 255]);
    }

    #[test]
    fn set_atlas_bumps_generation() {
        let mut resources = ResourceManager::new();
        let before = resources.atlas_generation();
        resources.set_atlas(AtlasImage::new(1, 1, vec![0; 4]).unwrap());
        assert_eq!(resources.atlas_generation(), before + 1);
        assert_eq!(resources.atlas().rgba(), &[0, 0, 0, 0]);
    }
}
