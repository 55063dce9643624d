//! Terminal front end for the Virtual Garden simulation.

mod canvas;
mod telemetry;

use anyhow::{anyhow, Context, Result};
use canvas::ShapeCanvas;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use garden_core::RunConfig;
use garden_world::{Garden, SharedGarden};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(
    name = "garden-sim",
    about = "Grow an evolving garden in the terminal",
    after_help = "Roots cost twice the energy they produce, so with the default genetics \
                  nearly every founder with roots starves on its second tick and the \
                  garden usually dies out. Use --dump-config to start from the defaults \
                  and --config to run a tuned garden."
)]
struct Args {
    /// JSON run configuration; defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the garden
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Simulated time per tick
    #[arg(long)]
    dt: Option<f32>,

    /// Number of founding plants
    #[arg(long)]
    plants: Option<usize>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Configuration file (or defaults) with command-line overrides applied
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RunConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.garden.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.max_ticks = Some(ticks);
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(plants) = self.plants {
            config.garden.seed_count = plants;
        }
        config.validate().context("invalid run configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.run_config()?;

    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    telemetry::init_telemetry(args.json_logs)?;
    info!(
        seed = config.garden.seed,
        plants = config.garden.seed_count,
        dt = config.dt,
        max_ticks = ?config.max_ticks,
        "Starting Virtual Garden"
    );

    let garden = SharedGarden::new(Garden::new(config.garden.clone())?);
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("failed to install Ctrl-C handler")?;
    }

    let ticker = {
        let garden = garden.clone();
        let running = running.clone();
        let (dt, max_ticks) = (config.dt, config.max_ticks);
        thread::Builder::new()
            .name("tick".into())
            .spawn(move || run_tick_loop(&garden, dt, max_ticks, &running))?
    };
    let painter = {
        let garden = garden.clone();
        let running = running.clone();
        let config = config.clone();
        thread::Builder::new()
            .name("render".into())
            .spawn(move || run_render_loop(&garden, &config, &running))?
    };

    let ticked = ticker
        .join()
        .map_err(|_| anyhow!("tick thread panicked"))?;
    running.store(false, Ordering::SeqCst);
    painter
        .join()
        .map_err(|_| anyhow!("render thread panicked"))??;

    let stats = garden.stats();
    match &ticked {
        Ok(ticks) => info!(ticks, live = stats.live, "Simulation finished"),
        Err(err) => error!(%err, "Simulation aborted"),
    }
    println!("{}", serde_json::to_string_pretty(&stats)?);
    ticked.map(|_| ())
}

/// Advance the garden until interrupted, out of ticks, or extinct.
/// Returns the number of ticks run.
fn run_tick_loop(
    garden: &SharedGarden,
    dt: f32,
    max_ticks: Option<u64>,
    running: &AtomicBool,
) -> Result<u64> {
    let mut ticks = 0;
    while running.load(Ordering::Relaxed) {
        if max_ticks.is_some_and(|max| ticks >= max) {
            debug!(ticks, "Tick limit reached");
            break;
        }
        let extinct = garden.with(|garden| {
            garden.tick(dt)?;
            Ok::<_, garden_core::Error>(garden.is_empty())
        });
        ticks += 1;
        match extinct {
            Ok(false) => {}
            Ok(true) => {
                info!(ticks, "Garden went extinct");
                break;
            }
            Err(err) => {
                running.store(false, Ordering::SeqCst);
                return Err(err).context("tick failed");
            }
        }
    }
    running.store(false, Ordering::SeqCst);
    Ok(ticks)
}

/// Draw frames on the alternate screen until the run stops. A drawing error
/// stops the whole run.
fn run_render_loop(garden: &SharedGarden, config: &RunConfig, running: &AtomicBool) -> Result<()> {
    let result = draw_on_alternate_screen(garden, config, running);
    if result.is_err() {
        running.store(false, Ordering::SeqCst);
    }
    result
}

fn draw_on_alternate_screen(
    garden: &SharedGarden,
    config: &RunConfig,
    running: &AtomicBool,
) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to build terminal backend")?;
    terminal.hide_cursor().ok();

    let interval = Duration::from_millis(config.frame_interval_ms);
    let result = render_until_stopped(running, interval, || draw(&mut terminal, garden, config));

    terminal.show_cursor().ok();
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        error!(?err, "failed to leave alternate screen");
    }
    result
}

/// Call `paint` every `interval` until `running` clears, then once more so
/// the final state is shown. A failed paint clears `running`.
fn render_until_stopped(
    running: &AtomicBool,
    interval: Duration,
    mut paint: impl FnMut() -> Result<()>,
) -> Result<()> {
    loop {
        let live = running.load(Ordering::Relaxed);
        if let Err(err) = paint() {
            running.store(false, Ordering::SeqCst);
            return Err(err);
        }
        if !live {
            return Ok(());
        }
        thread::sleep(interval);
    }
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, garden: &SharedGarden, config: &RunConfig) -> Result<()> {
    let mut shapes = ShapeCanvas::new(config.garden.width, config.garden.height);
    let drawn = garden.render(&mut shapes);
    let stats = garden.stats();
    terminal.draw(|frame| canvas::draw_frame(frame, &shapes, &stats, config))?;
    debug!(drawn, tick = stats.tick, "Frame drawn");
    Ok(())
}
