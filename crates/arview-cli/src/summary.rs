use arview_core::compose::SnapshotRequest;
use arview_core::config::ArConfig;
use arview_core::geometry::{OverlayPlacement, Point, VideoSize, Viewport};
use arview_core::transform::Transform;
use console::Style;

use crate::commands::snapshot::SnapshotArgs;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_snapshot_summary(
    config: &ArConfig,
    viewport: Viewport,
    request: &SnapshotRequest,
    args: &SnapshotArgs,
) {
    let s = Styles::new();
    print_title(&s, "AR Snapshot");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Frame"),
        s.path.apply_to(args.frame.display())
    );
    if let Some(ref overlay) = args.overlay {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Overlay"),
            s.path.apply_to(overlay.display())
        );
    } else if let Some(ref model) = args.model {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Model"),
            s.value.apply_to(model)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(args.output_dir.display())
    );
    println!();

    println!("  {}", s.header.apply_to("View"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(format!("{}x{}", viewport.width, viewport.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Camera"),
        s.value.apply_to(request.facing)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Transform"),
        s.value.apply_to(request.transform)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Base size"),
        s.value.apply_to(config.overlay)
    );
    println!();

    println!("  {}", s.header.apply_to("Output"));
    if config.shadow.enabled {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Shadow"),
            s.value.apply_to(format!(
                "blur {} offset ({}, {})",
                config.shadow.blur, config.shadow.offset_x, config.shadow.offset_y
            ))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Shadow"),
            s.disabled.apply_to("disabled")
        );
    }
    match request.info {
        Some(ref info) => println!(
            "    {:<12}{}",
            s.label.apply_to("Info card"),
            s.value.apply_to(&info.title)
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Info card"),
            s.disabled.apply_to("none")
        ),
    }
    println!();
}

pub fn print_mapping(
    viewport: Viewport,
    video: VideoSize,
    transform: &Transform,
    placement: &OverlayPlacement,
    point: Option<(Point, Point)>,
) {
    let s = Styles::new();
    print_title(&s, "Cover-fit Mapping");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(format!("{}x{}", viewport.width, viewport.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Video"),
        s.value.apply_to(format!("{}x{}", video.width, video.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Transform"),
        s.value.apply_to(transform)
    );
    println!();

    let fit = &placement.fit;
    println!("  {}", s.header.apply_to("Fit"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Ratio"),
        s.value.apply_to(format!("{:.4}", fit.ratio))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rendered"),
        s.value.apply_to(format!("{:.1}x{:.1}", fit.rendered_width, fit.rendered_height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Offset"),
        s.value.apply_to(format!("({:.1}, {:.1})", fit.offset_x, fit.offset_y))
    );
    println!();

    println!("  {}", s.header.apply_to("Overlay"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Screen"),
        s.value.apply_to(format!(
            "center ({:.1}, {:.1}) size {:.1}",
            placement.screen_center.x, placement.screen_center.y, placement.screen_size
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Video"),
        s.value.apply_to(format!(
            "center ({:.1}, {:.1}) size {:.1}",
            placement.video_center.x, placement.video_center.y, placement.video_size
        ))
    );
    if let Some((screen, video_point)) = point {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Point"),
            s.value.apply_to(format!(
                "({:.1}, {:.1}) -> ({:.1}, {:.1})",
                screen.x, screen.y, video_point.x, video_point.y
            ))
        );
    }
    println!();
}
