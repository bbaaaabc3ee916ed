use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use fixture_gen_algo::Checker;
use fixture_gen_algo::OnEmpty;
use fixture_gen_algo::Params;
use fixture_gen_algo::Policy;
use fixture_gen_algo::Recancel;
use fixture_gen_algo::Stats;
use fixture_gen_rt::Fixture;
use owo_colors::OwoColorize;
use rayon::prelude::*;
use tracing::error;

use crate::plan::Plan;

mod logging;
mod plan;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Randomized input files for order-matching engines.
///
/// Without a subcommand, writes the four default presets into `tests/`.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a set of fixtures in parallel.
    Presets(PresetsArgs),
    /// Generate a single fixture.
    Generate(GenerateArgs),
    /// Validate an existing fixture.
    Check(CheckArgs),
}

#[derive(Debug, Default, clap::Args)]
struct PresetsArgs {
    #[clap(
        short,
        long,
        default_value = "tests",
        conflicts_with = "plan",
        help = "Directory receiving the default presets"
    )]
    dir: PathBuf,
    #[clap(short, long, help = "JSON plan replacing the default presets")]
    plan: Option<PathBuf>,
    #[clap(long, help = "Base seed, fixture `i` uses `seed + i`")]
    seed: Option<u64>,
    #[clap(short = 'j', long = "jobs", default_value_t = num_cpus::get())]
    workers: usize,
    #[clap(flatten)]
    policy: PolicyArgs,
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    #[clap(short, long)]
    output: PathBuf,
    #[clap(short = 'n', long, default_value_t = 100)]
    queries: u64,
    #[clap(short, long, default_value_t = 10)]
    instruments: u32,
    #[clap(short, long, default_value_t = 5)]
    clients: u32,
    #[clap(long)]
    seed: Option<u64>,
    #[clap(flatten)]
    policy: PolicyArgs,
}

#[derive(Debug, clap::Args)]
struct CheckArgs {
    path: PathBuf,
    #[clap(short, long, help = "Expected client count")]
    clients: Option<u32>,
    #[clap(short, long, help = "Instrument count bounding instrument ids")]
    instruments: Option<u32>,
    #[clap(short = 'n', long, help = "Upper bound on record lines")]
    queries: Option<u64>,
    #[clap(long, help = "Reject cancelling the same order twice")]
    strict: bool,
    #[clap(long, help = "Print the summary as JSON on stdout")]
    json: bool,
}

#[derive(Debug, Default, clap::Args)]
struct PolicyArgs {
    #[clap(
        long,
        help = "Emit a new order instead of skipping a cancel for a client \
                without orders"
    )]
    replace_skipped: bool,
    #[clap(long, help = "Never draw an already cancelled order again")]
    exclude_cancelled: bool,
}

impl From<&PolicyArgs> for Policy {
    #[inline]
    fn from(args: &PolicyArgs) -> Self {
        Policy::default()
            .on_empty(match args.replace_skipped {
                true => OnEmpty::Replace,
                false => OnEmpty::Skip,
            })
            .recancel(match args.exclude_cancelled {
                true => Recancel::Exclude,
                false => Recancel::Allow,
            })
    }
}

fn main() -> ExitCode {
    logging::init();

    let Args { command } = Args::parse();
    let command = command.unwrap_or_else(|| Command::Presets(PresetsArgs {
        dir: PathBuf::from("tests"),
        workers: num_cpus::get(),
        ..PresetsArgs::default()
    }));

    let result = match command {
        Command::Presets(args) => presets(args),
        Command::Generate(args) => generate(args),
        Command::Check(args) => check(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{:>12} {:#}", "Error".bold().red(), error);
            ExitCode::FAILURE
        }
    }
}

fn presets(args: PresetsArgs) -> Result<()> {
    let jobs = match &args.plan {
        Some(path) => Plan::from_path(path)?
            .fixtures
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let seed = entry.seed.or_else(|| derive_seed(args.seed, i));
                (entry.fixture(), seed)
            })
            .collect::<Vec<_>>(),
        None => Fixture::presets(&args.dir)
            .into_iter()
            .enumerate()
            .map(|(i, fixture)| (fixture, derive_seed(args.seed, i)))
            .collect(),
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1.max(args.workers))
        .build()
        .context("unable to start worker pool")?;
    let policy = Policy::from(&args.policy);

    let begin = Instant::now();
    let results = pool.install(|| {
        jobs.par_iter()
            .map(|(fixture, seed)| {
                fixture_gen_rt::generate(
                    &fixture.path,
                    fixture.params,
                    policy,
                    *seed,
                )
            })
            .collect::<Vec<_>>()
    });

    let mut failed = 0;
    for ((fixture, _), result) in jobs.iter().zip(results) {
        match result {
            Ok(stats) => report(&fixture.path, &fixture.params, &stats),
            Err(err) => {
                error!(
                    path = %fixture.path.display(),
                    error = %err,
                    "generation failed"
                );
                failed += 1;
            }
        }
    }

    eprintln!(
        "{:>12} {} fixture(s) in {:.2}s",
        "Finished".bold().green(),
        jobs.len() - failed,
        begin.elapsed().as_secs_f64(),
    );

    match failed {
        0 => Ok(()),
        n => anyhow::bail!("{n} fixture(s) could not be generated"),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let params = Params::new(args.queries, args.instruments, args.clients);
    let stats = fixture_gen_rt::generate(
        &args.output,
        params,
        Policy::from(&args.policy),
        args.seed,
    )?;
    report(&args.output, &params, &stats);
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    let mut checker = Checker::new().strict(args.strict);
    if let Some(clients) = args.clients {
        checker = checker.clients(clients);
    }
    if let Some(instruments) = args.instruments {
        checker = checker.instruments(instruments);
    }
    if let Some(queries) = args.queries {
        checker = checker.max_records(queries);
    }

    let file = File::open(&args.path)
        .with_context(|| format!("unable to open {}", args.path.display()))?;
    let summary =
        checker.check(BufReader::new(file)).with_context(|| {
            format!("{} is not a valid fixture", args.path.display())
        })?;

    if args.json {
        serde_json::to_writer_pretty(io::stdout().lock(), &summary)?;
        println!();
    } else {
        eprintln!("{:>12} {}", "Valid".bold().green(), args.path.display());
        eprintln!("{:>12} {}", "Clients".bold(), summary.clients);
        eprintln!("{:>12} {}", "Records".bold(), summary.records);
        eprintln!("{:>12} {}", "Buys".bold(), summary.buys);
        eprintln!("{:>12} {}", "Sells".bold(), summary.sells);
        eprintln!(
            "{:>12} {} ({} repeated)",
            "Cancels".bold(),
            summary.cancels,
            summary.recancels
        );
    }

    Ok(())
}

#[inline]
fn derive_seed(seed: Option<u64>, index: usize) -> Option<u64> {
    seed.map(|seed| seed.wrapping_add(index as u64))
}

fn report(path: &Path, params: &Params, stats: &Stats) {
    eprintln!(
        "{:>12} {} ({} of {} queries, {} skipped)",
        "Generated".bold().green(),
        path.display(),
        stats.records(),
        params.queries,
        stats.skipped,
    );
}
