use std::panic;
use std::process;

use better_panic::Settings;
use color_eyre::config::HookBuilder;
use color_eyre::eyre::Result;
use tracing::error;

use crate::infrastructure::tui::real::restore_terminal;

/// Installs color-eyre hooks and a panic hook that restores the terminal
/// before reporting.
pub fn initialize_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug. Consider reporting it at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;
    panic::set_hook(Box::new(move |panic_info| {
        if let Err(r) = restore_terminal() {
            error!("Unable to restore terminal: {r:?}");
        }

        #[cfg(not(debug_assertions))]
        {
            use human_panic::{handle_dump, print_msg, Metadata};
            let meta = Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
                .authors(env!("CARGO_PKG_AUTHORS").replace(':', ", "))
                .homepage(env!("CARGO_PKG_HOMEPAGE"));

            let file_path = handle_dump(&meta, panic_info);
            if let Err(e) = print_msg(file_path, &meta) {
                eprintln!("human-panic: printing error message to console failed: {e}");
            }
            eprintln!("{}", panic_hook.panic_report(panic_info));
        }
        let msg = format!("{}", panic_hook.panic_report(panic_info));
        log::error!("Error: {}", strip_ansi_escapes::strip_str(msg));

        #[cfg(debug_assertions)]
        {
            // Better Panic stacktrace that is only enabled when debugging.
            Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        }

        process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}
