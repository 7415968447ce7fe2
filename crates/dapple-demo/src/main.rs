mod app;
mod content;

use anyhow::Context;
use dapple_engine::device::GpuInit;
use dapple_engine::host::{HostConfig, SceneHost};
use dapple_engine::logging::{init_logging, LoggingConfig};
use dapple_engine::text::{FontId, FontSystem};
use dapple_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use app::DemoApp;
use content::{MULTI_COLOR_BLOCK, RED_CIRCLE_MAN};

const TITLE: &str = "dapple";

const FONT_PATHS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let resources = content::build_resources().context("failed to build demo content")?;

    let config = HostConfig {
        spawn_sprite_types: vec![RED_CIRCLE_MAN.to_string(), MULTI_COLOR_BLOCK.to_string()],
        ..HostConfig::default()
    };
    let host = SceneHost::new(resources, config).context("failed to set up scene host")?;

    let mut fonts = FontSystem::new();
    let font = load_font(&mut fonts);

    log::info!("click to spawn, drag to move, double-click to delete, Esc to quit");

    Runtime::run(
        RuntimeConfig {
            title: TITLE.to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
        },
        GpuInit::default(),
        DemoApp::new(host, fonts, font, TITLE),
    )
}

/// First usable system font. Missing fonts are not fatal: status text falls
/// back to the window title.
fn load_font(fonts: &mut FontSystem) -> Option<FontId> {
    for path in FONT_PATHS {
        let Ok(bytes) = std::fs::read(path) else { continue };
        match fonts.load_font(&bytes) {
            Ok(id) => {
                log::info!("status font: {path}");
                return Some(id);
            }
            Err(err) => log::warn!("{path}: {err}"),
        }
    }
    log::warn!("no system font found, status goes to the window title");
    None
}
