use std::path::Path;
use std::path::PathBuf;

use fixture_gen_algo::Params;

/// Default fixtures, from smoke test to stress test.
pub const PRESETS: [(&str, Params); 4] = [
    ("1.in", Params::new(100, 10, 5)),
    ("2.in", Params::new(500, 50, 10)),
    ("3.in", Params::new(30_000, 250, 20)),
    ("4.in", Params::new(1_000_000, 500, 40)),
];

/// One file to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub path: PathBuf,
    pub params: Params,
}

impl Fixture {
    #[inline]
    pub fn new(path: impl Into<PathBuf>, params: Params) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    /// [`PRESETS`] placed under `dir`.
    pub fn presets(dir: &Path) -> Vec<Fixture> {
        PRESETS
            .iter()
            .map(|(name, params)| Fixture::new(dir.join(name), *params))
            .collect()
    }
}
