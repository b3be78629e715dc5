use std::io;

use clap::Parser;

mod cli;
mod logging;
mod menu;
mod settings;
mod startup;
mod ticker;

#[cfg(test)]
mod tests;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let (mut settings, problem) = settings::load_settings(args.config.as_deref());
    logging::init(&settings.logging);
    if let Some(msg) = problem {
        tracing::warn!("{msg}");
    }
    args.apply(&mut settings);

    let handle = startup::build_engine(&settings);
    let ticker = ticker::Ticker::spawn(handle.clone(), settings.playback.poll_interval())?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = menu::run_menu(&handle, stdin.lock(), &mut stdout);

    ticker.shutdown();
    handle.stop();
    result?;
    Ok(())
}
