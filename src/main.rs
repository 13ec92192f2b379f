use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use family_tree::report::{self, TreeSummary};
use family_tree::{Founder, Gender, GenerationConfig, generate_tree, load_tables};

#[derive(Parser, Debug)]
#[command(name = "family-tree")]
#[command(about = "Simulate a family tree from demographic statistics and query it")]
struct Args {
    /// Directory containing the demographic CSV files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Birth year of both founders
    #[arg(long, default_value_t = 1950)]
    start_year: i32,

    /// No child is born after this year
    #[arg(long, default_value_t = 2120)]
    max_year: i32,

    /// First founder as "First,Last,gender" (default: Desmond,Jones,male)
    #[arg(long, value_parser = parse_founder)]
    founder1: Option<Founder>,

    /// Second founder as "First,Last,gender" (default: Molly,Jones,female)
    #[arg(long, value_parser = parse_founder)]
    founder2: Option<Founder>,

    /// Print every query result once instead of starting the menu
    #[arg(long)]
    report: bool,

    /// Print the query results as JSON instead of starting the menu
    #[arg(long, conflicts_with = "report")]
    json: bool,
}

fn parse_founder(s: &str) -> Result<Founder, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [first, last, gender] = parts.as_slice() else {
        return Err(format!("expected \"First,Last,gender\", got \"{s}\""));
    };
    if first.is_empty() || last.is_empty() {
        return Err("founder names cannot be empty".to_string());
    }
    let gender: Gender = gender.parse()?;
    Ok(Founder::new(*first, *last, gender))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = GenerationConfig {
        seed: args.seed.unwrap_or_else(rand::random),
        start_year: args.start_year,
        max_year: args.max_year,
        ..GenerationConfig::default()
    };

    let (default1, default2) = Founder::default_pair();
    let founder1 = args.founder1.unwrap_or(default1);
    let founder2 = args.founder2.unwrap_or(default2);

    eprintln!("Reading files...");
    let tables = load_tables(&args.data_dir).with_context(|| {
        format!(
            "failed to load demographic tables from {}",
            args.data_dir.display()
        )
    })?;

    eprintln!("Generating family tree (seed {})...", config.seed);
    let tree = generate_tree(&tables, &config, &founder1, &founder2);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &TreeSummary::from_tree(&tree))?;
        writeln!(out)?;
    } else if args.report {
        report::write_report(&tree, &mut out)?;
    } else {
        report::run_menu(&tree, &mut io::stdin().lock(), &mut out)?;
    }
    Ok(())
}
