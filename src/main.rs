use anyhow::Context;
use env_logger::Env;
use log::info;
use remote_switch::{Config, Controller, FirebaseStore, GpioOutputs, ThreadDelay};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() -> anyhow::Result<()> {
    init_logger();
    print_startup_message();

    // Installed before the pins are claimed, so a stop during startup still
    // reaches the release path in `Controller::run`.
    let running = setup_signal_handler()?;
    let config = Config::from_env().context("loading configuration")?;
    let store = FirebaseStore::new(&config).context("building HTTP client")?;
    let outputs = GpioOutputs::new().context("configuring GPIO output pins")?;

    let mut controller = Controller::new(store, outputs, ThreadDelay, running);
    controller.run();

    info!("Exiting program...");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

fn print_startup_message() {
    info!("Program is starting...");
}

// Ctrl+C or SIGTERM stops the loop; the pins are released on the way out.
fn setup_signal_handler() -> anyhow::Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("installing signal handler")?;
    Ok(running)
}
