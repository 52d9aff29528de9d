//! Info command - shows the chain status snapshot.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use leap_client::time::format_naive_utc;

use super::Context;

/// Arguments for the info command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Also show resource limits and weights
    #[arg(short, long)]
    pub detailed: bool,
}

/// Run the info command.
pub async fn run(args: InfoArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let cancel = ctx.cancellation();

    let info = client.get_info(&cancel).await?;
    tracing::debug!(head = info.head_block_num, status = info.http_status, "fetched chain info");

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let dim = Style::new().dim();

    println!();
    println!("{}", style("Chain Info").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();
    println!("  {} {}", dim.apply_to("Node:"), client.base_url());
    if info.server_version_string.is_empty() {
        println!("  {} {}", dim.apply_to("Server:"), info.server_version);
    } else {
        println!(
            "  {} {} ({})",
            dim.apply_to("Server:"),
            info.server_version_string,
            info.server_version
        );
    }
    println!("  {} {}", dim.apply_to("Chain:"), info.chain_id);
    println!(
        "  {} {} at {} by {}",
        dim.apply_to("Head:"),
        info.head_block_num,
        format_naive_utc(&info.head_block_time),
        info.head_block_producer
    );
    println!(
        "  {} {} (lag {})",
        dim.apply_to("Irreversible:"),
        info.last_irreversible_block_num,
        info.irreversible_lag()
    );
    println!("  {} {}", dim.apply_to("Fork DB head:"), info.fork_db_head_block_num);
    if let Some(earliest) = info.earliest_available_block_num {
        println!("  {} {}", dim.apply_to("Earliest block:"), earliest);
    }

    if args.detailed {
        println!();
        println!("{}", dim.apply_to("─".repeat(40)));
        println!();
        println!(
            "  {} {} / {}",
            dim.apply_to("CPU limit (block/virtual):"),
            info.block_cpu_limit,
            info.virtual_block_cpu_limit
        );
        println!(
            "  {} {} / {}",
            dim.apply_to("NET limit (block/virtual):"),
            info.block_net_limit,
            info.virtual_block_net_limit
        );
        if let (Some(cpu), Some(net)) = (info.total_cpu_weight, info.total_net_weight) {
            println!("  {} {} / {}", dim.apply_to("Total weight (cpu/net):"), cpu, net);
        }
    }

    println!();
    Ok(())
}
