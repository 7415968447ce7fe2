use winit::dpi::PhysicalSize;

use super::GpuInit;

/// Builds the swapchain configuration for `size` from what the surface
/// supports, honoring `init` preferences where possible.
///
/// Returns `None` when the surface reports no formats at all.
pub(super) fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    init: &GpuInit,
    size: PhysicalSize<u32>,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = pick_format(&caps.formats, init.prefer_srgb)?;
    let present_mode = pick_present_mode(&caps.present_modes, init.present_mode);
    if present_mode != init.present_mode {
        log::warn!("present mode {:?} unsupported, using {present_mode:?}", init.present_mode);
    }

    let alpha_mode = init
        .alpha_mode
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: init.desired_maximum_frame_latency,
    })
}

/// Palette and atlas colors are authored in sRGB, so an sRGB target is
/// preferred when asked for.
fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    let srgb = formats.iter().copied().find(|f| f.is_srgb());
    match srgb {
        Some(f) if prefer_srgb => Some(f),
        _ => formats.first().copied(),
    }
}

/// Fifo is the only mode every surface must support.
fn pick_present_mode(modes: &[wgpu::PresentMode], requested: wgpu::PresentMode) -> wgpu::PresentMode {
    if modes.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{PresentMode, TextureFormat};

    #[test]
    fn prefers_srgb_when_available() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(pick_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(pick_format(&[TextureFormat::Rgba16Float], true), Some(TextureFormat::Rgba16Float));
        assert_eq!(pick_format(&[], true), None);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let modes = [PresentMode::Fifo, PresentMode::Immediate];
        assert_eq!(pick_present_mode(&modes, PresentMode::Immediate), PresentMode::Immediate);
        assert_eq!(pick_present_mode(&modes, PresentMode::Mailbox), PresentMode::Fifo);
    }
}
