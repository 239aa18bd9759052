#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tradewatch::{
    api, builder, clock, ingest,
    model::{Dataset, PersonId, ShiftId},
    trade::TradePolicy,
};
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Minimalist shift-trade CLI (no database)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Enable logs (RUST_LOG controls the filter)
    #[arg(long, global = true)]
    log: bool,

    /// Combined feed JSON: [{ "person": "...", "events": [...] }, ...]
    #[arg(long, global = true)]
    events: Option<String>,

    /// Raw events CSV: person,title,start,end,duration_minutes
    #[arg(long, global = true)]
    events_csv: Option<String>,

    /// Operative IANA timezone
    #[arg(long, global = true, default_value = "America/New_York")]
    tz: String,

    /// Override the future cutoff (RFC3339); defaults to tomorrow 00:00 local
    #[arg(long, global = true)]
    cutoff: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List future shifts
    Shifts {
        /// Print the full JSON view instead of one line per shift
        #[arg(long)]
        json: bool,
    },

    /// Find legal counter-shifts for a shift you want to give away
    Candidates {
        #[arg(long)]
        person: String,
        #[arg(long)]
        shift_id: String,
        #[arg(long, default_value_t = 60.0)]
        cap_hours: f64,
    },

    /// Recheck one pair right before offering
    Recheck {
        /// Shift id you give away
        #[arg(long)]
        give: String,
        /// Shift id you receive
        #[arg(long)]
        take: String,
        #[arg(long, default_value_t = 60.0)]
        cap_hours: f64,
    },
}

fn load_dataset(cli: &Cli) -> Result<Dataset> {
    let tz: Tz = cli.tz.parse().map_err(anyhow::Error::msg)?;
    let cutoff = match &cli.cutoff {
        Some(raw) => DateTime::parse_from_rfc3339(raw)?.with_timezone(&tz),
        None => clock::future_cutoff(Utc::now(), tz)?,
    };
    let sources = match (&cli.events, &cli.events_csv) {
        (Some(path), None) => ingest::load_feed_json(path)?,
        (None, Some(path)) => ingest::import_events_csv(path)?,
        (Some(_), Some(_)) => bail!("use either --events or --events-csv, not both"),
        (None, None) => bail!("missing --events or --events-csv"),
    };
    Ok(builder::build(&sources, cutoff, tz))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let dataset = load_dataset(&cli)?;

    let code = match cli.cmd {
        Commands::Shifts { json } => {
            let view = api::list_future_shifts(&dataset);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                for s in &view.shifts {
                    println!(
                        "{} | {} | {} → {} | {} | {}",
                        s.id,
                        s.owner,
                        s.start,
                        s.end,
                        s.title,
                        if s.eligible { "eligible" } else { "not eligible" }
                    );
                }
            }
            0
        }
        Commands::Candidates {
            person,
            shift_id,
            cap_hours,
        } => {
            let policy = TradePolicy {
                cap_hours,
                ..TradePolicy::default()
            };
            let options = api::find_trade_candidates(
                &dataset,
                &PersonId::new(person),
                &ShiftId::new(shift_id),
                &policy,
            )?;
            println!("{}", serde_json::to_string_pretty(&options)?);
            0
        }
        Commands::Recheck {
            give,
            take,
            cap_hours,
        } => {
            let policy = TradePolicy {
                cap_hours,
                ..TradePolicy::default()
            };
            let verdict =
                api::recheck_swap(&dataset, &ShiftId::new(give), &ShiftId::new(take), &policy)?;
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            // Code 2 = valid request, swap rejected by the rules
            if verdict.ok {
                0
            } else {
                2
            }
        }
    };

    std::process::exit(code);
}
