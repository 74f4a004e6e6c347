use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use eframe::egui;

use detect_annotate::app::DetectApp;
use detect_annotate::config::Config;
use detect_annotate::detect::DetectionClient;

#[derive(Parser, Debug)]
#[command(name = "detect-annotate", about = "Review and edit detector bounding boxes")]
struct Cli {
    /// Image to preselect for upload.
    image: Option<PathBuf>,

    #[arg(long, env = "DETECT_ANNOTATE_SERVER_URL")]
    server_url: Option<String>,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.server_url {
        config.server_url = url;
    }
    if let Some(path) = &cli.image {
        if !path.exists() {
            bail!("File not found: {}", path.display());
        }
    }
    log::info!("detection service at {}", config.server_url);

    let client = DetectionClient::new(&config).context("building HTTP client")?;

    let title = match cli.image.as_ref().and_then(|p| p.file_name()) {
        Some(name) => format!("detect-annotate - {}", name.to_string_lossy()),
        None => "detect-annotate".to_string(),
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(&title),
        ..Default::default()
    };

    let labels = config.labels.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(DetectApp::new(client, labels, cli.image)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run eframe: {e}"))
}
