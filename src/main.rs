mod app;
mod config;
mod cursor;
mod draw;
mod error;
mod logging;
mod model;
mod scan;
mod session;
mod store;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::{info, warn};

use app::AnnotateApp;
use config::{Args, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, WINDOW_TITLE};
use session::Session;

fn main() -> anyhow::Result<()> {
    logging::setup_logger();
    let args = Args::parse();

    let session = Session::open(&args.image_dir)
        .with_context(|| format!("loading annotations for {}", args.image_dir.display()))?;
    if session.is_empty() {
        warn!("No images found in {}", args.image_dir.display());
    } else {
        info!("Annotating {} images in {}", session.len(), args.image_dir.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(AnnotateApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("annotation window failed: {e}"))
}
