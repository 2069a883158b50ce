use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arview_core::camera::{FacingMode, StillCamera};
use arview_core::compose::InfoCard;
use arview_core::export::{DirectorySink, ShareResult};
use arview_core::geometry::{Point, Viewport};
use arview_core::overlay::{
    FileRasterizer, ModelHandle, ModelRasterizer, NoRasterizer, OverlaySpec,
};
use arview_core::session::ArSession;
use arview_core::snapshot::{SnapshotReporter, SnapshotStage};
use arview_core::transform::{GestureScript, TransformController};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use super::{load_config, parse_point, parse_size};
use crate::summary::print_snapshot_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum FacingArg {
    Environment,
    User,
}

impl From<FacingArg> for FacingMode {
    fn from(arg: FacingArg) -> Self {
        match arg {
            FacingArg::Environment => FacingMode::Environment,
            FacingArg::User => FacingMode::User,
        }
    }
}

#[derive(Args)]
pub struct SnapshotArgs {
    /// Camera frame image standing in for the live stream
    pub frame: PathBuf,

    /// Frame served by the user-facing camera (defaults to FRAME)
    #[arg(long)]
    pub user_frame: Option<PathBuf>,

    /// Which camera to start
    #[arg(long, value_enum, default_value = "environment")]
    pub facing: FacingArg,

    /// Static overlay image (PNG with alpha)
    #[arg(long, conflicts_with = "model")]
    pub overlay: Option<PathBuf>,

    /// Model identifier, rendered through --model-snapshot
    #[arg(long, requires = "model_snapshot")]
    pub model: Option<String>,

    /// Pre-rendered image of the model viewer
    #[arg(long)]
    pub model_snapshot: Option<PathBuf>,

    /// Viewport size in screen pixels
    #[arg(long, default_value = "400x800", value_parser = parse_size)]
    pub viewport: (f64, f64),

    /// Overlay offset from the viewport center
    #[arg(long, default_value = "0,0", value_parser = parse_point, allow_hyphen_values = true)]
    pub offset: Point,

    /// Overlay scale (clamped to the configured limits)
    #[arg(long, default_value = "1.0")]
    pub scale: f64,

    /// Gesture script replayed after --offset/--scale
    #[arg(long)]
    pub gestures: Option<PathBuf>,

    /// Dish name for the info card
    #[arg(long)]
    pub title: Option<String>,

    /// Dish description for the info card
    #[arg(long, default_value = "", requires = "title")]
    pub description: String,

    /// Dish price for the info card
    #[arg(long, default_value = "0", requires = "title")]
    pub price: f64,

    /// AR config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the PNG is downloaded into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Progress bar over the snapshot stages.
struct StageProgress {
    pb: ProgressBar,
}

impl StageProgress {
    fn new() -> Result<Self> {
        let pb = ProgressBar::new(5);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self { pb })
    }
}

impl SnapshotReporter for StageProgress {
    fn begin_stage(&self, stage: SnapshotStage) {
        self.pb.set_message(stage.to_string());
        self.pb.inc(1);
    }

    fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}

pub fn run(args: &SnapshotArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let viewport = Viewport::new(args.viewport.0, args.viewport.1)?;

    let mut camera = StillCamera::open(&args.frame)
        .with_context(|| format!("Failed to open frame {}", args.frame.display()))?;
    if let Some(ref path) = args.user_frame {
        let frame = image::open(path)
            .with_context(|| format!("Failed to open frame {}", path.display()))?;
        camera = camera.with_user_frame(frame.to_rgba8());
    }

    let (overlay, rasterizer): (OverlaySpec, Arc<dyn ModelRasterizer>) =
        match (&args.overlay, &args.model, &args.model_snapshot) {
            (Some(path), _, _) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read overlay {}", path.display()))?;
                (
                    OverlaySpec::static_image(bytes),
                    Arc::new(NoRasterizer) as Arc<dyn ModelRasterizer>,
                )
            }
            (None, Some(model), Some(snapshot)) => (
                OverlaySpec::rendered_model(ModelHandle::new(model.clone())),
                Arc::new(FileRasterizer::new(snapshot)) as Arc<dyn ModelRasterizer>,
            ),
            _ => bail!("Either --overlay or --model with --model-snapshot is required"),
        };

    let info = args.title.as_ref().map(|title| InfoCard {
        title: title.clone(),
        description: args.description.clone(),
        price: args.price,
    });

    let mut session = ArSession::new(camera, overlay, rasterizer, info, config.clone())?;
    session.start(args.facing.into())?;

    apply_transform(session.controller_mut(), args.offset, args.scale);
    if let Some(ref path) = args.gestures {
        let script = GestureScript::load(path)
            .with_context(|| format!("Failed to read gesture script {}", path.display()))?;
        script.replay(session.controller_mut());
    }

    print_snapshot_summary(&config, viewport, &session.snapshot_request(viewport), args);

    let sink = DirectorySink::new(&args.output_dir);
    let progress = StageProgress::new()?;
    let outcome = session.snapshot(viewport, &sink, &progress)?;
    session.close();

    if !outcome.overlay_drawn {
        println!("\nOverlay could not be rendered; snapshot contains the camera frame only");
    }
    match outcome.export {
        ShareResult::Shared { filename } => println!("\nShared {filename}"),
        ShareResult::Downloaded { filename } => println!(
            "\n{}x{} snapshot saved to {}",
            outcome.width,
            outcome.height,
            sink.dir().join(filename).display()
        ),
    }

    Ok(())
}

/// Drive the controller the way a drag from the center followed by a pinch would.
fn apply_transform(controller: &mut TransformController, offset: Point, scale: f64) {
    controller.begin_drag(Point::ORIGIN);
    controller.continue_drag(offset);
    controller.end_drag();

    if scale != 1.0 {
        let a = Point::ORIGIN;
        controller.begin_pinch(a, Point::new(100.0, 0.0));
        controller.continue_pinch(a, Point::new(100.0 * scale.abs(), 0.0));
        controller.end_pinch();
    }
}
