//! Health command - shows service health reported by the node.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use serde::Serialize;

use super::Context;

/// Arguments for the health command.
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Show per-service data
    #[arg(short, long)]
    pub detailed: bool,
}

/// Health summary for JSON output.
#[derive(Debug, Serialize)]
struct HealthOutput<'a> {
    healthy: bool,
    #[serde(flatten)]
    health: &'a leap_client::Health,
}

/// Run the health command.
pub async fn run(args: HealthArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let cancel = ctx.cancellation();

    let health = client.get_health(&cancel).await?;

    if ctx.json_output {
        let output = HealthOutput {
            healthy: health.is_healthy(),
            health: &health,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let green = Style::new().green();
    let red = Style::new().red();
    let dim = Style::new().dim();

    println!();
    println!("{}", style("Service Health").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();
    println!("  {} {}", dim.apply_to("Node:"), client.base_url());
    println!("  {} {}", dim.apply_to("Version:"), health.version);
    println!("  {} {:.3} ms", dim.apply_to("Query time:"), health.query_time_ms);
    println!();

    for service in &health.health {
        let marker = if service.is_ok() {
            green.apply_to(format!("● {}", service.status))
        } else {
            red.apply_to(format!("● {}", service.status))
        };
        println!(
            "  {:<20} {} {}",
            service.name,
            marker,
            dim.apply_to(service.time.format("%Y-%m-%d %H:%M:%S%.3f UTC"))
        );

        if args.detailed || ctx.verbose {
            let mut keys: Vec<_> = service.data.keys().collect();
            keys.sort();
            for key in keys {
                println!("      {} {}", dim.apply_to(format!("{key}:")), service.data[key]);
            }
        }
    }

    println!();
    Ok(())
}
