use crate::config::{resolve_rules, Args};
use crate::input;
use crate::render::Screen;
use crate::sim::{Command, Session, Snapshot};
use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{tick, Receiver};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub(crate) fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let rules = resolve_rules(&args)?;
    info!(?rules, "starting");
    let mut session = Session::new(rules);

    let mut screen = Screen::begin()?;
    let (commands, _capture) = input::spawn_capture();

    let res = drive(&mut session, &commands, |snap| screen.present(snap));

    // restore the terminal before any error gets printed
    screen.end()?;
    res?;

    info!(score = session.score(), "quit");
    Ok(())
}

/// Stdout belongs to the game, so logs only go to a file when asked for.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Fixed-tick loop: wait for the timer, fold queued input into one tick,
/// step once, show the result. Rebuilds the timer whenever the session
/// changes its tick interval.
fn drive<F>(session: &mut Session, commands: &Receiver<Command>, mut present: F) -> Result<()>
where
    F: FnMut(&Snapshot<'_>) -> Result<()>,
{
    let mut interval = session.tick_interval();
    let mut ticker = tick(interval);
    present(&session.snapshot())?;

    loop {
        if session.terminated() {
            return Ok(());
        }
        ticker.recv().context("tick timer stopped")?;

        session.step(input::drain(commands));
        if session.terminated() {
            continue;
        }
        present(&session.snapshot())?;

        if session.tick_interval() != interval {
            interval = session.tick_interval();
            ticker = tick(interval);
            debug!(tick_ms = interval.as_millis() as u64, "timer rescheduled");
        }
    }
}
