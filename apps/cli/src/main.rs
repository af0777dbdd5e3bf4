#![deny(warnings)]

//! Headless CLI for running a starter resort and validating invariants.

use anyhow::Result;
use onsen_core::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    days: u32,
    seed: u64,
    name: String,
    snapshot: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        days: 30,
        seed: 42,
        name: "Yuzawa Springs".to_string(),
        snapshot: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--days" => {
                if let Some(days) = it.next().and_then(|s| s.parse().ok()) {
                    args.days = days;
                }
            }
            "--seed" => {
                if let Some(seed) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = seed;
                }
            }
            "--name" => {
                if let Some(name) = it.next() {
                    args.name = name;
                }
            }
            "--snapshot" => args.snapshot = it.next(),
            _ => {}
        }
    }
    args
}

/// A playable opening position: one modest pool, a cleaner, an attendant.
fn starter_resort(name: &str) -> Result<Resort> {
    let mut resort = Resort::new(name);
    resort.build_pool("Moonlight Bath", PoolSize::Small, 41.0)?;
    resort.add_ingredient(0, ingredient_catalog().remove(0))?;
    resort.roster.staff.push(Staff::new("Sato Yuki", StaffRole::Cleaner, 3));
    resort.roster.staff.push(Staff::new("Ito Emi", StaffRole::Attendant, 2));
    Ok(resort)
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    info!(
        days = args.days,
        seed = args.seed,
        name = %args.name,
        build = env!("GIT_SHA"),
        "starting CLI"
    );

    let mut resort = starter_resort(&args.name)?;
    validate_resort(&resort)?;
    println!(
        "Resort OK | pools: {} | facilities: {} | staff: {} | money: ¥{}",
        resort.pools.len(),
        resort.facilities.len(),
        resort.roster.staff.len(),
        resort.money
    );

    let config = SimConfig {
        rng_seed: args.seed,
        days: args.days,
        ..SimConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
    onsen_sim::run_days(&mut resort, &config, &mut rng);
    validate_resort(&resort)?;

    let avg_satisfaction = if resort.visitors.is_empty() {
        0.0
    } else {
        resort.visitors.iter().map(|v| v.satisfaction).sum::<f32>() / resort.visitors.len() as f32
    };
    println!(
        "KPI | day: {} | season: {:?} | money: ¥{} | reputation: {:.1} | guests: {} | satisfaction: {:.1} | staff: {}",
        resort.day,
        resort.season,
        resort.money,
        resort.reputation,
        resort.guests,
        avg_satisfaction,
        resort.roster.staff.len()
    );
    for line in resort.event_log.iter().rev().take(5).rev() {
        println!("log | {line}");
    }

    if let Some(path) = args.snapshot {
        std::fs::write(&path, serde_json::to_string_pretty(&resort)?)?;
        info!(%path, "snapshot written");
    }

    Ok(())
}
