use anyhow::{Context, Result};
use clap::Parser;
use flock_client::{build_flock, resolve_settings, run, Args, RunOptions};
use flock_shared::StatusReport;

fn print_report(report: &StatusReport) {
    println!("agents:           {} ({}x{})", report.agent_count, report.grid_side, report.grid_side);
    println!("steps:            {} (offset {})", report.steps, report.step_offset);
    println!(
        "speed:            mean {:.3}, min {:.3}, max {:.3}",
        report.mean_speed, report.min_speed, report.max_speed
    );
    println!(
        "centroid:         ({:.2}, {:.2}, {:.2})",
        report.centroid[0], report.centroid[1], report.centroid[2]
    );
    println!("inside bounds:    {:.1}%", report.inside_bounds * 100.0);
    println!("speed violations: {}", report.speed_violations);
    println!(
        "elapsed:          {:.1} ms ({:.1} steps/s)",
        report.elapsed_ms, report.steps_per_second
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Flock client starting...");
    log::info!("Agents: {}", args.agents);
    log::info!("Steps: {}", args.steps);

    let settings = resolve_settings(&args).context("Failed to resolve settings")?;

    if args.print_settings {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    let mut flock = build_flock(args.agents, settings, args.seed)?;
    let report = run(&mut flock, &RunOptions::from_args(&args));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    flock.release();
    log::info!("Flock released");

    Ok(())
}
