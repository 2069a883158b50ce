use std::path::PathBuf;

use anyhow::Result;
use arview_core::compose::Compositor;
use arview_core::geometry::{CoverFit, Point, VideoSize, Viewport};
use arview_core::transform::Transform;
use clap::Args;

use super::{load_config, parse_point, parse_size};
use crate::summary::print_mapping;

#[derive(Args)]
pub struct MapArgs {
    /// Viewport size in screen pixels
    #[arg(long, default_value = "400x800", value_parser = parse_size)]
    pub viewport: (f64, f64),

    /// Intrinsic video size
    #[arg(long, default_value = "1280x720", value_parser = parse_size)]
    pub video: (f64, f64),

    /// Overlay offset from the viewport center
    #[arg(long, default_value = "0,0", value_parser = parse_point, allow_hyphen_values = true)]
    pub offset: Point,

    /// Overlay scale (clamped to the configured limits)
    #[arg(long, default_value = "1.0")]
    pub scale: f64,

    /// Additional screen point to map into video space
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub point: Option<Point>,

    /// AR config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &MapArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let viewport = Viewport::new(args.viewport.0, args.viewport.1)?;
    let video = VideoSize::new(args.video.0.round() as u32, args.video.1.round() as u32)?;
    let transform = Transform {
        offset_x: args.offset.x,
        offset_y: args.offset.y,
        scale: args
            .scale
            .clamp(config.transform.min_scale, config.transform.max_scale),
    };

    let compositor = Compositor::new(config);
    let placement = compositor.placement(viewport, video, &transform);
    let mapped = args
        .point
        .map(|p| (p, CoverFit::new(viewport, video).screen_to_video(p)));

    print_mapping(viewport, video, &transform, &placement, mapped);
    Ok(())
}
