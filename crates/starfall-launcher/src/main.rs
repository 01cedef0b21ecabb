//! Starfall game launcher.
//!
//! Thin shell over `starfall-updater`: check for an update, install it with
//! progress on the terminal, then start the game detached and exit. Every
//! terminal state maps to one status line; none of them crash the launcher.

use starfall_updater::{LauncherConfig, Updater, launch_game};

mod logging;
mod ui;

#[tokio::main]
async fn main() {
    logging::init_logging();
    std::process::exit(run().await);
}

async fn run() -> i32 {
    let config = LauncherConfig::default();
    let updater = Updater::new(config.clone());

    if !config.executable_path().exists() {
        tracing::info!("Game executable not present yet, it may arrive with the update");
    }

    println!("{}", ui::STATUS_CHECKING);
    if updater.is_update_available().await {
        match ui::run_update(&updater).await {
            Ok(()) => println!("{}", ui::STATUS_UPDATED),
            Err(err) => {
                tracing::error!("Update failed: {}", err);
                println!("{}", err.user_message());
                return 1;
            }
        }
    } else {
        println!("{}", ui::STATUS_UP_TO_DATE);
    }

    // Start the game detached; the launcher exits right after.
    match launch_game(&config) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("Launch failed: {}", err);
            println!("{}", err.user_message());
            1
        }
    }
}
