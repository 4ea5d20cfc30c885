use anyhow::Result;
use clap::Parser;
use eframe::egui;

use car_dash::app::CarDashApp;
use car_dash::cli::Args;
use car_dash::data::store::DatasetStore;
use car_dash::state::DashboardState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = DatasetStore::new(&args.path);
    let base = match store.load() {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load dataset: {e}");
            return Err(e.into());
        }
    };
    let state = DashboardState::new(base);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Car Price Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CarDashApp::new(state, args.export_path)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
