use std::env;

use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dota_compare::config::Config;
use dota_compare::models::{AccountId, PlayerRecord};

const DEFAULT_LIMIT: u32 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compare=info,dota_compare=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().skip(1).collect();
    let (ids, limit) = parse_args(&args)?;

    info!("Comparing {} and {} over {} matches", ids[0], ids[1], limit);

    let config = Config::from_env()?;
    let orchestrator = dota_compare::build_orchestrator(&config)?;

    let comparison = orchestrator.compare(ids, limit).await?;

    for player in &comparison.players {
        print_player(player);
    }

    Ok(())
}

/// Parse `<id1> <id2> [--limit N]`
fn parse_args(args: &[String]) -> Result<([AccountId; 2], u32)> {
    let mut ids = Vec::new();
    let mut limit = DEFAULT_LIMIT;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--limit" || arg == "-l" {
            match iter.next().and_then(|v| v.parse().ok()) {
                Some(value) => limit = value,
                None => bail!("--limit needs a non-negative number"),
            }
        } else {
            ids.push(arg.parse::<AccountId>()?);
        }
    }

    match ids.as_slice() {
        [first, second] => Ok(([*first, *second], limit)),
        _ => bail!("usage: compare <account_id_1> <account_id_2> [--limit N]"),
    }
}

fn print_player(player: &PlayerRecord) {
    println!("{} ({})", player.player_name, player.account_id);
    println!("  Status: {}", player.status.describe());

    if player.rejected_matches > 0 {
        println!("  Skipped matches: {}", player.rejected_matches);
    }

    let Some(summary) = player.summary() else {
        println!("  No matches");
        return;
    };

    println!("  Matches: {}", summary.matches);
    println!("  Average K: {:.2}", summary.average_kills);
    println!("  Average D: {:.2}", summary.average_deaths);
    println!("  Average A: {:.2}", summary.average_assists);
    println!("  KDA: {:.2}", summary.average_kda);
    println!("  Winrate: {:.1}%", summary.win_rate);

    if let Some(gpm) = summary.average_gold_per_min {
        println!("  Average GPM: {:.0}", gpm);
    }
    if let Some(xpm) = summary.average_xp_per_min {
        println!("  Average XPM: {:.0}", xpm);
    }
    if let Some(net_worth) = summary.average_net_worth {
        println!("  Average net worth: {:.0}", net_worth);
    }
}
