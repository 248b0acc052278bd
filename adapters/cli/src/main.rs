#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays scripted input against a cavern session.
//!
//! Frames go to stdout; logs go to stderr and follow `RUST_LOG`.

mod render;
mod script;

use std::{io::Write, thread};

use anyhow::{bail, Context, Result};
use cavern_core::{GridSize, Projection, TileGrid};
use cavern_system_session::{Session, TickReport};
use cavern_world::query;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use crate::{render::render, script::Script};

/// Smallest grid side that still leaves an interior.
const MIN_SIDE: u32 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "cavern",
    version,
    about = "Generate a cave and replay scripted moves through it"
)]
struct Cli {
    /// Seed for cave generation. A `n<digits>s` script prefix takes precedence.
    #[arg(long)]
    seed: Option<u64>,
    /// Grid width in tiles.
    #[arg(long, default_value_t = 80)]
    width: u32,
    /// Grid height in tiles.
    #[arg(long, default_value_t = 50)]
    height: u32,
    /// Input string: `n<seed>s<moves>[:q]` or plain moves (`wasd`, space switches).
    #[arg(long)]
    script: Option<String>,
    /// Projection printed after the script finishes.
    #[arg(long, value_enum, default_value_t = View::Active)]
    show: View,
    /// Print every transition frame and hold it for its pause.
    #[arg(long)]
    animate: bool,
    /// Colour tiles with ANSI true-colour escapes.
    #[arg(long)]
    color: bool,
    /// Print the final session snapshot as JSON on the last line.
    #[arg(long)]
    emit_snapshot: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum View {
    Physical,
    Overlay,
    Active,
}

/// Entry point for the cavern command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.width < MIN_SIDE || cli.height < MIN_SIDE {
        bail!(
            "grid must be at least {MIN_SIDE}x{MIN_SIDE}, got {}x{}",
            cli.width,
            cli.height
        );
    }

    let script = match &cli.script {
        Some(text) => Script::parse(text).with_context(|| format!("invalid script '{text}'"))?,
        None => Script::default(),
    };
    let seed = match (script.seed, cli.seed) {
        (Some(from_script), Some(from_flag)) if from_script != from_flag => {
            warn!(from_script, from_flag, "script seed overrides --seed");
            from_script
        }
        (Some(seed), _) | (None, Some(seed)) => seed,
        (None, None) => 0,
    };

    let mut session = Session::new(seed, GridSize::new(cli.width, cli.height));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", session.welcome_banner())?;

    for intent in &script.intents {
        let report = session.tick(*intent);
        play_transition(&mut out, &mut session, report, &cli)?;
    }
    if script.quit {
        info!(intents = script.intents.len(), "script finished with quit");
    }

    let projections = session.projections();
    let grid: &TileGrid = match cli.show {
        View::Physical => projections.get(Projection::Physical),
        View::Overlay => projections.get(Projection::Overlay),
        View::Active => session.active_grid(),
    };
    write!(out, "{}", render(grid, cli.color))?;
    writeln!(out, "{}", status_line(&session))?;

    if cli.emit_snapshot {
        let json = serde_json::to_string(&session.snapshot())
            .context("failed to serialise session snapshot")?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Shows the wave for a switch request, if any, and then commits the switch.
fn play_transition(
    out: &mut impl Write,
    session: &mut Session,
    report: TickReport,
    cli: &Cli,
) -> Result<()> {
    let Some(mut animation) = report.transition else {
        return Ok(());
    };
    if cli.animate {
        while let Some(frame) = animation.next_frame() {
            writeln!(out, "-- step {} {:?}", frame.step, frame.phase)?;
            write!(out, "{}", render(frame.grid, cli.color))?;
            out.flush()?;
            thread::sleep(frame.pause);
        }
    }
    let _ = session.finalize_switch();
    Ok(())
}

fn status_line(session: &Session) -> String {
    let status = session.status();
    let projection = match status.active_projection {
        Projection::Physical => "physical",
        Projection::Overlay => "overlay",
    };
    let underfoot = query::observer_underlying(session.world()).descriptor().name();
    format!(
        "lives {}  charge {}/{}  projection {projection}  standing on {underfoot}",
        status.lives, status.charge, status.charge_threshold
    )
}
