use eframe::egui;
use log::{error, info};

mod config;
mod ui;

use config::AppConfig;
use ui::PetItchApp;

fn main() -> Result<(), eframe::Error> {
    // RUST_LOG controls the level
    env_logger::init();
    info!("Starting Pet Itch Tracker");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([760.0, 560.0])
            .with_title("Pet Itch Tracker")
            .with_resizable(true),
        ..Default::default()
    };

    info!("Launching egui window");
    eframe::run_native(
        "Pet Itch Tracker",
        options,
        Box::new(move |cc| {
            let app = PetItchApp::new(cc, config);
            info!("Initialized Pet Itch Tracker app");
            Ok(Box::new(app))
        }),
    )
}
