#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use log::{error, info, warn};
use roster_business::BusinessConfig;
use roster_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> eframe::Result {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    // Commands are spawned onto this runtime from the UI thread.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start the async runtime: {e}");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };
    let _guard = runtime.enter();

    let config = BusinessConfig::from_env().unwrap_or_else(|e| {
        warn!("Ignoring environment configuration: {e}");
        BusinessConfig::default()
    });
    info!(
        "Auth service {}, users service {}",
        config.auth_api_url, config.users_api_url
    );

    let native_options = eframe::NativeOptions {
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        viewport: egui::ViewportBuilder::default()
            .with_title("Roster")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Roster",
        native_options,
        Box::new(move |cc| {
            let state = State::new(config);
            let app = roster_ui::RosterApp::new(state, &cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}
