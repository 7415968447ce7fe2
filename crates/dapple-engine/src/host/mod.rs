//! Scene host: ties scene, resources and spawning policy to the frame loop.

mod config;
mod frame;
mod scene_host;

pub use config::HostConfig;
pub use frame::{Headless, HostFrame, ScenePresenter};
pub use scene_host::SceneHost;
