
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::Mutex;

use formfields::{
    domain::preferences::SharedLayout,
    infrastructure::{
        cli::Cli, config::Config, preferences::JsonPreferences, tui::real::RealTui,
    },
    integration::app_runner::AppRunner,
    utils::{get_data_dir, initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let mut config = Config::new()?;
    if let Some(scale) = args.scale {
        config.form.scale = scale;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.form.debounce_ms = debounce_ms;
    }

    // Persisted preferences win over the configured defaults
    let preferences = JsonPreferences::in_dir(&get_data_dir());
    let layout = match preferences.load() {
        Ok(Some(layout)) => layout,
        Ok(None) => config.preferences,
        Err(e) => {
            log::warn!("Ignoring unreadable preferences: {e}");
            config.preferences
        }
    };
    let layout = SharedLayout::new(layout);

    let tui = Arc::new(Mutex::new(
        RealTui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate),
    ));
    let mut runner =
        AppRunner::new_with_config(config, layout, tui).with_persistence(Arc::new(preferences));
    runner.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
