use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use fixture_gen_algo::Params;
use fixture_gen_rt::Fixture;
use serde::Deserialize;

/// JSON list of fixtures replacing the built-in presets.
///
/// ```json
/// { "fixtures": [
///     { "path": "1.in", "queries": 100, "instruments": 10, "clients": 5 }
/// ] }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    pub fixtures: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    pub path: PathBuf,
    pub queries: u64,
    pub instruments: u32,
    pub clients: u32,
    /// Overrides the seed derived from `--seed`.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Plan {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| {
            format!("unable to open plan {}", path.display())
        })?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid plan {}", path.display()))
    }
}

impl Entry {
    #[inline]
    pub fn fixture(&self) -> Fixture {
        Fixture::new(
            &self.path,
            Params::new(self.queries, self.instruments, self.clients),
        )
    }
}
