use std::path::PathBuf;

use anyhow::{Context, Result};
use arview_core::transform::{GestureScript, TransformController};
use clap::Args;

use super::load_config;

#[derive(Args)]
pub struct ReplayArgs {
    /// Gesture script (TOML with an `events` array)
    pub script: PathBuf,

    /// AR config file (TOML), for scale limits
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = GestureScript::load(&args.script)
        .with_context(|| format!("Failed to read gesture script {}", args.script.display()))?;

    let mut controller = TransformController::new(config.transform);
    let transform = script.replay(&mut controller);

    println!("Events:      {}", script.events.len());
    println!("Offset:      ({:.1}, {:.1})", transform.offset_x, transform.offset_y);
    println!("Scale:       {:.3}", transform.scale);
    println!("Gesture:     {:?}", controller.gesture());

    Ok(())
}
