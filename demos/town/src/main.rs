//! town — runs the rust_sir epidemic model on a synthetic town.
//!
//! Builds a population, wires households, workplaces, schools and friends,
//! then steps the day loop and logs a summary every few days.  Optionally
//! swaps in a second parameter file part-way through, e.g. to start a
//! lockdown on day 30:
//!
//! ```text
//! RUST_LOG=info cargo run -p town -- --params demos/town/params.toml \
//!     --switch-day 30 --switch-params demos/town/lockdown.toml
//! ```

mod town;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use sir_agent::PopulationBuilder;
use sir_core::{GlobalCount, Parameters, SimConfig, SimRng, Weekday};
use sir_sim::{LoggingObserver, SimBuilder};

use town::{TownLayout, build_town};

/// Offset of the town-wiring stream within the run's `SimRng` family.
const WIRING_STREAM: u64 = 0x70;

#[derive(Parser, Debug)]
#[command(name = "town")]
#[command(about = "Run the agent-based epidemic model on a synthetic town")]
struct Args {
    /// Number of agents
    #[arg(long, default_value_t = 1_000)]
    agents: usize,

    /// Days to simulate
    #[arg(long, default_value_t = 90)]
    days: u64,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML parameter file (defaults apply to missing keys)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Day on which to switch to `--switch-params`
    #[arg(long, requires = "switch_params")]
    switch_day: Option<u64>,

    /// Parameter file applied from `--switch-day` on
    #[arg(long, requires = "switch_day")]
    switch_params: Option<PathBuf>,

    /// Log a summary every N days
    #[arg(long, default_value_t = 7)]
    log_interval: u64,
}

fn load_params(path: Option<&PathBuf>) -> Result<Parameters> {
    match path {
        Some(p) => Parameters::from_file(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(Parameters::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let params = load_params(args.params.as_ref())?;
    let switch = match (args.switch_day, args.switch_params.as_ref()) {
        (Some(day), Some(path)) => {
            if day > args.days {
                bail!("switch day {day} is past the end of a {}-day run", args.days);
            }
            Some((day, load_params(Some(path))?))
        }
        _ => None,
    };

    let t0 = Instant::now();
    let mut counters = GlobalCount::new();
    let (mut store, rngs) = PopulationBuilder::new(args.agents, args.seed)
        .build(&params, &mut counters)?;

    let mut wiring_rng = SimRng::new(args.seed).child(WIRING_STREAM);
    let city = build_town(&mut store, &TownLayout::default(), &mut wiring_rng)?;
    info!(
        agents = args.agents,
        districts = city.district_count(),
        infected = counters.infected_count,
        workers = counters.work_population,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "town built"
    );

    let config = SimConfig { seed: args.seed, total_days: args.days, start_weekday: Weekday::Monday };
    let mut sim = SimBuilder::new(config, params, store, rngs, counters)
        .city(city)
        .build()?;

    let mut observer = LoggingObserver::new(args.log_interval);
    let t1 = Instant::now();
    if let Some((day, next)) = switch {
        sim.run_days(day, &mut observer)?;
        sim.set_parameters(next)?;
        info!(day, "parameters switched");
    }
    sim.run(&mut observer)?;

    let c = sim.counters();
    info!(
        conserved = c.is_conserved(),
        hospital_beds = sim.hospital_beds(),
        elapsed_ms = t1.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}
