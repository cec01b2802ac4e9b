use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dispatch_optimizer::config::Config;
use dispatch_optimizer::optimizer::DispatchOptimizer;
use dispatch_optimizer::prices::{load_price_series, price_values};
use dispatch_optimizer::solver::AugmentedLagrangian;
use dispatch_optimizer::telemetry::init_tracing;
use tracing::info;

/// Optimal battery dispatch against a market price horizon.
#[derive(Debug, Parser)]
#[command(name = "dispatch-optimizer", version)]
struct Cli {
    /// CSV file with `timestamp,price` columns
    #[arg(long, default_value = "data/prices.csv")]
    prices: PathBuf,

    /// TOML configuration for battery, costs and solver
    #[arg(long, default_value = "config/default.toml")]
    config: String,

    /// Only optimize the first N price periods
    #[arg(long)]
    periods: Option<usize>,

    /// Emit the schedule as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::load(&cli.config).context("loading configuration")?;
    let battery = config.battery_parameters();
    let costs = config.cost_parameters();

    let mut points = load_price_series(&cli.prices)?;
    if let Some(n) = cli.periods {
        points.truncate(n);
    }
    let prices = price_values(&points);
    info!(periods = prices.len(), "loaded price series");

    let optimizer =
        DispatchOptimizer::new(Box::new(AugmentedLagrangian::new()), config.solver_config());
    let schedule = optimizer.solve(&battery, &costs, &prices)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!(
        "{:<22} {:>9} {:>9} {:>11} {:>7}",
        "timestamp", "price", "charge", "discharge", "soc"
    );
    for (i, point) in points.iter().enumerate() {
        println!(
            "{:<22} {:>9.2} {:>9.3} {:>11.3} {:>6.1}%",
            point.timestamp.format("%Y-%m-%d %H:%M"),
            point.price,
            schedule.charge_mw[i],
            schedule.discharge_mw[i],
            schedule.soc_fraction[i] * 100.0
        );
    }

    let d = &schedule.diagnostics;
    println!();
    println!(
        "objective: {:.3} ({})  [{} iterations, max violation {:.2e}]",
        d.objective,
        if d.success { "converged" } else { "NOT converged" },
        d.iterations,
        d.max_constraint_violation
    );
    println!("{}", d.message);

    Ok(())
}
