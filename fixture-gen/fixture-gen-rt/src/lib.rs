use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use fixture_gen_algo::Generator;
use fixture_gen_algo::Params;
use fixture_gen_algo::ParamsError;
use fixture_gen_algo::Policy;
use fixture_gen_algo::Stats;
use fixture_types::END_OF_INPUT;
use fixture_types::START;
use fixture_types::TERMINATE;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::debug;
use tracing::info;

mod fixture;
pub use fixture::Fixture;
pub use fixture::PRESETS;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("unable to write {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Seeded runs are reproducible; unseeded runs draw from OS entropy.
#[inline]
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Writes a complete fixture to `out`: client count, start marker, records,
/// end-of-input marker and terminator.
///
/// Nothing is written when `params` are invalid.
pub fn write_fixture<W: Write, R: Rng>(
    out: W,
    params: Params,
    policy: Policy,
    rng: R,
) -> Result<Stats, GenerateError> {
    let mut generator = Generator::new(params, policy, rng)?;
    let mut out = BufWriter::with_capacity(64 * 1024, out);

    writeln!(out, "{}", params.clients)?;
    writeln!(out, "{START}")?;
    for record in generator.by_ref() {
        writeln!(out, "{record}")?;
    }
    writeln!(out, "{END_OF_INPUT}")?;
    writeln!(out, "{TERMINATE}")?;
    out.flush()?;

    Ok(generator.stats())
}

/// Generates a fixture file at `path`, truncating any previous content.
///
/// The parent directory must already exist. On a write failure the file is
/// left incomplete.
pub fn generate(
    path: impl AsRef<Path>,
    params: Params,
    policy: Policy,
    seed: Option<u64>,
) -> Result<Stats, GenerateError> {
    let path = path.as_ref();
    params.validate()?;

    let with_path = |source| GenerateError::File {
        path: path.to_owned(),
        source,
    };

    debug!(path = %path.display(), ?params, ?policy, ?seed, "generating");
    let begin = Instant::now();

    let file = File::create(path).map_err(with_path)?;
    let stats = match write_fixture(file, params, policy, rng(seed)) {
        Ok(stats) => stats,
        Err(GenerateError::Io(source)) => return Err(with_path(source)),
        Err(error) => return Err(error),
    };

    info!(
        path = %path.display(),
        records = stats.records(),
        skipped = stats.skipped,
        elapsed_ms = begin.elapsed().as_millis() as u64,
        "fixture written"
    );

    Ok(stats)
}
