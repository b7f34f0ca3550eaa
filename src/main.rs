use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use insert_bench::error::BenchError;
use insert_bench::insert::STRATEGY_LABEL;
use insert_bench::{db, run_benchmark};

const LOG_FILE: &str = "time_log.txt";

#[derive(Parser, Debug)]
#[command(
    name = "insert-bench",
    about = "Benchmark bulk insertion of a product CSV into PostgreSQL"
)]
struct Args {
    /// Row count of the pre-generated dataset; selects
    /// `~/dados/produtos_<rows>.csv`. Prompted interactively when omitted.
    #[arg(long)]
    rows: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let rows = match args.rows {
        Some(rows) => rows,
        None => prompt_rows()?,
    };

    let home = dirs::home_dir().ok_or(BenchError::MissingHomeDir)?;
    let dataset_path = home.join("dados").join(format!("produtos_{rows}.csv"));
    let log_path = PathBuf::from(LOG_FILE);

    let pool = db::connect().await?;
    db::run_migrations(&pool).await?;

    let report = run_benchmark(pool, &dataset_path, &log_path, STRATEGY_LABEL).await?;
    println!("{}", report.elapsed_secs);

    Ok(())
}

/// Ask for the row count on stdin, defaulting to 1000 on an empty answer.
fn prompt_rows() -> Result<u64, Box<dyn std::error::Error>> {
    print!("Quantidade de linhas [1000]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let answer = line.trim();
    if answer.is_empty() {
        return Ok(1000);
    }

    match answer.parse() {
        Ok(rows) => Ok(rows),
        Err(_) => {
            writeln!(io::stderr(), "error: '{answer}' is not a valid row count")?;
            std::process::exit(1);
        }
    }
}
