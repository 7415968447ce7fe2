use glam::Vec2;

use super::object::ObjectId;

/// A scene mutation requested by the UI layer.
///
/// The pointer controller only reads the scene; everything it wants changed
/// comes back as one of these and is applied with [`SceneGraph::apply`].
///
/// [`SceneGraph::apply`]: super::SceneGraph::apply
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SceneCommand {
    /// Focus an object for the info display, or clear the focus.
    ShowInfo(Option<ObjectId>),
    /// Ask the frame loop to spawn one object centred on this point.
    Spawn(Vec2),
    /// Move an object's top-left corner.
    MoveTo(ObjectId, Vec2),
    /// Remove an object.
    Delete(ObjectId),
}
