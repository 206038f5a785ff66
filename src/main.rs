use std::path::PathBuf;

use anyhow::{Context, bail};
use snapink::config::SnapInkConfig;
use snapink::render::export::{SkiaCompositor, default_save_path, save_png};
use snapink::session::{InputEvent, Session};

const USAGE: &str = "usage: snapink <backdrop.png> <script.json> [output.png]";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args_os().skip(1);
    let (Some(backdrop_path), Some(script_path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let output = args.next().map(PathBuf::from);

    let config = SnapInkConfig::load();
    let backdrop = image::open(&backdrop_path)
        .with_context(|| format!("failed to open {}", backdrop_path.to_string_lossy()))?
        .to_rgba8();
    let raw = std::fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read {}", script_path.to_string_lossy()))?;
    let events: Vec<InputEvent> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", script_path.to_string_lossy()))?;

    let mut session = Session::new(backdrop, config.clone());
    log::info!("replaying {} event(s)", events.len());
    for event in events {
        session.handle(event);
    }

    let compositor = SkiaCompositor::new(session.backdrop().clone());
    let png = session.export(&compositor)?;

    let path = match output {
        Some(path) => path,
        None => default_save_path(config.save_location)
            .context("no folder available for saving screenshots")?,
    };
    save_png(&png, &path)?;
    println!("{}", path.display());
    Ok(())
}
