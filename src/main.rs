use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use expense_split::config::Config;
use expense_split::expenses::pipeline::ExpensePipeline;

/// Split an American Express activity CSV into a spreadsheet of shared expenses
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the card activity CSV
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the output .xlsx file
    #[arg(short, long)]
    output: PathBuf,
}

fn run(args: &Args) -> Result<usize> {
    let pipeline = ExpensePipeline::new(&Config::default())?;
    let count = pipeline.run(&args.input, &args.output)?;

    Ok(count)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(count) => println!("Successfully processed {} expenses to {}", count, args.output.display()),
        Err(err) => {
            eprintln!("error: {:#}", err);
            process::exit(1);
        },
    }
}
