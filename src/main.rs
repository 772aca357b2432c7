use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use herodex::stats::{
    compare, correlation_matrix, preview, preview_rows, role_distribution, top_by_pick_rate,
};
use herodex::{
    normalize_token, title_case, Hero, HeroContext, HeroFilter, HeroStore, Role, RoleFilter,
    SourceFormat, StoreConfig, FEATURE_COLUMNS,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Hero recommendations by lane and by stat similarity
#[derive(Parser, Debug)]
#[command(name = "herodex")]
#[command(about = "Hero recommendations by lane and by stat similarity", long_about = None)]
struct Args {
    /// Path to the hero table (.csv or .json)
    #[arg(short, long, default_value = "data/heroes.csv")]
    data: PathBuf,

    /// Data format, inferred from the file extension when omitted
    #[arg(long, value_parser = parse_format)]
    format: Option<SourceFormat>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the first rows of the hero table
    Preview {
        /// Number of rows; values outside 5-50 are clamped
        #[arg(short, long, default_value_t = 10)]
        rows: usize,

        /// Columns to show, comma separated
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Only heroes of this role
        #[arg(long)]
        role: Option<String>,
    },
    /// Recommend heroes for a lane (gold, mid, jungle, roam, exp)
    Lane { lane: String },
    /// List the heroes with the closest stat lines
    Similar {
        hero: String,

        /// Include per-stat distance contributions
        #[arg(long)]
        explain: bool,
    },
    /// Top heroes by pick rate
    TopPicks {
        #[arg(short, long, default_value_t = 10)]
        n: usize,
    },
    /// Compare stats of comma separated heroes
    Compare {
        #[arg(default_value = "martis, irithel, tigreal")]
        heroes: String,
    },
    /// Share of heroes per role
    Roles,
    /// Correlation between the six stats
    Correlation,
}

fn parse_format(s: &str) -> Result<SourceFormat, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "csv" => Ok(SourceFormat::Csv),
        "json" => Ok(SourceFormat::Json),
        other => Err(format!("unknown format '{other}' (expected csv or json)")),
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let level = match log_level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    match EnvFilter::try_from_default_env() {
        Ok(filter) => tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())?,
        Err(_) => tracing::subscriber::set_global_default(builder.with_max_level(level).finish())?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config = StoreConfig {
        path: args.data.clone(),
        format: args.format,
        ..StoreConfig::default()
    };
    let store = HeroStore::open(&config)
        .with_context(|| format!("failed to load heroes from {}", args.data.display()))?;
    let ctx = store.context()?;
    debug!(heroes = ctx.catalog().len(), "catalog ready");

    run(&ctx, args.command, args.json)
}

fn run(ctx: &HeroContext, command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Preview { rows, columns, role } => {
            let rows = preview_rows(rows);
            let columns = select_columns(columns)?;
            let heroes: Vec<&Hero> = match role {
                Some(role) => {
                    let role: Role = role.parse().map_err(|_| anyhow::anyhow!("unknown role '{role}'"))?;
                    let filter = RoleFilter::new([role]);
                    ctx.catalog().iter().filter(|h| filter.matches(h)).take(rows).collect()
                }
                None => preview(ctx.catalog(), rows).iter().collect(),
            };
            print_preview(&heroes, &columns, json)
        }
        Command::Lane { lane } => {
            let heroes = ctx.recommend(&lane)?;
            if json {
                return print_json(&heroes);
            }
            if heroes.is_empty() {
                println!("No heroes found for that lane.");
                return Ok(());
            }
            println!("{:<20} {:<10} {:>9} {:>10}", "hero_name", "role", "win_rate", "pick_rate");
            for h in heroes {
                println!("{:<20} {:<10} {:>9.2} {:>10.2}", h.name, h.role, h.win_rate, h.pick_rate);
            }
            Ok(())
        }
        Command::Similar { hero, explain } => {
            let response = ctx.similar(&hero, explain)?;
            if json {
                return print_json(&response);
            }
            println!("Top similar heroes to {}:", title_case(&response.query));
            for similar in &response.result {
                print!(
                    "  {} - Role: {}, Win Rate: {}",
                    title_case(&similar.hero_name),
                    title_case(&similar.role),
                    similar.win_rate
                );
                match similar.dominant_stat() {
                    Some(stat) => println!(" (distance {:.3}, mostly {stat})", similar.distance),
                    None => println!(),
                }
            }
            Ok(())
        }
        Command::TopPicks { n } => {
            let top = top_by_pick_rate(ctx.catalog(), n);
            if json {
                return print_json(&top);
            }
            for (rank, h) in top.iter().enumerate() {
                println!("{:>3}. {:<20} {:>8.2}", rank + 1, h.name, h.pick_rate);
            }
            Ok(())
        }
        Command::Compare { heroes } => {
            let comparison = compare(ctx.catalog(), &heroes);
            if comparison.is_empty() {
                bail!("One or more heroes not found.");
            }
            if json {
                return print_json(&comparison.stat_rows());
            }
            if !comparison.missing.is_empty() {
                eprintln!("Not found: {}", comparison.missing.join(", "));
            }
            print!("{:<22}", "stat");
            for h in &comparison.heroes {
                print!(" {:>12}", h.name);
            }
            println!();
            for (i, stat) in FEATURE_COLUMNS.iter().enumerate() {
                print!("{:<22}", stat);
                for h in &comparison.heroes {
                    print!(" {:>12.2}", h.features().as_slice()[i]);
                }
                println!();
            }
            Ok(())
        }
        Command::Roles => {
            let shares = role_distribution(ctx.catalog());
            if json {
                return print_json(&shares);
            }
            for share in shares {
                println!("{:<10} {:>4} {:>6.1}%", share.role, share.count, share.percent);
            }
            Ok(())
        }
        Command::Correlation => {
            let corr = correlation_matrix(ctx.catalog());
            if json {
                return print_json(&corr);
            }
            print!("{:<22}", "");
            for col in corr.columns {
                print!(" {:>8.8}", col);
            }
            println!();
            for (col, row) in corr.columns.iter().zip(corr.values.iter()) {
                print!("{:<22}", col);
                for value in row {
                    print!(" {:>8.2}", value);
                }
                println!();
            }
            Ok(())
        }
    }
}

const PREVIEW_COLUMNS: [&str; 8] = [
    "hero_name",
    "role",
    "win_rate",
    "pick_rate",
    "offense_overall",
    "defense_overall",
    "skill_effect_overall",
    "difficulty_overall",
];

fn select_columns(requested: Vec<String>) -> anyhow::Result<Vec<&'static str>> {
    if requested.is_empty() {
        return Ok(PREVIEW_COLUMNS.to_vec());
    }
    requested
        .iter()
        .map(|c| {
            let c = normalize_token(c);
            PREVIEW_COLUMNS
                .iter()
                .copied()
                .find(|known| *known == c)
                .ok_or_else(|| anyhow::anyhow!("unknown column '{c}'"))
        })
        .collect()
}

fn print_preview(heroes: &[&Hero], columns: &[&str], json: bool) -> anyhow::Result<()> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = heroes
        .iter()
        .map(|h| -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
            let full = serde_json::to_value(h)?;
            Ok(columns
                .iter()
                .map(|c| (c.to_string(), full[*c].clone()))
                .collect())
        })
        .collect::<anyhow::Result<_>>()?;

    if json {
        return print_json(&rows);
    }
    println!("{}", columns.join("\t"));
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| match &row[*c] {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        println!("{}", cells.join("\t"));
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
