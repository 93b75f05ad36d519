//! `querydnf`: developer CLI for inspecting and normalizing query predicates.

mod command;
mod error;

use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(
    name = "querydnf",
    version,
    about = "Normalize entity-query predicates into disjunctive normal form"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

///
/// Command
///

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite a predicate into disjunctive normal form.
    Transform(TransformArgs),

    /// Report whether a predicate is already in disjunctive normal form.
    Check(InputArgs),

    /// Evaluate a predicate against one row.
    Eval(EvalArgs),
}

///
/// InputArgs
///

#[derive(Args, Debug)]
struct InputArgs {
    /// Predicate JSON file; reads stdin when omitted.
    #[arg(long, short)]
    input: Option<PathBuf>,
}

///
/// TransformArgs
///

#[derive(Args, Debug)]
struct TransformArgs {
    #[command(flatten)]
    input: InputArgs,

    /// TOML config file with a `[transform]` table.
    #[arg(long, short, env = "QUERYDNF_CONFIG")]
    config: Option<PathBuf>,

    /// Emit the structural fingerprint next to the predicate.
    #[arg(long)]
    fingerprint: bool,

    /// Print transform trace events to stderr.
    #[arg(long)]
    trace: bool,
}

///
/// EvalArgs
///

#[derive(Args, Debug)]
struct EvalArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Row JSON file: `{ "fields": { "col": <value> }, "custom": ["name"] }`.
    #[arg(long, short)]
    row: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Transform(args) => command::transform(
            args.input.input.as_deref(),
            args.config.as_deref(),
            args.fingerprint,
            args.trace,
        ),
        Command::Check(args) => command::check(args.input.as_deref()),
        Command::Eval(args) => command::eval(args.input.input.as_deref(), &args.row),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("querydnf: {err}");
            ExitCode::FAILURE
        }
    }
}
