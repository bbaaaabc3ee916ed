use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Single-letter code used on the wire.
    #[inline]
    pub const fn code(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }
}

impl fmt::Display for Side {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;
        f.write_char(self.code())
    }
}

impl FromStr for Side {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Side::Buy),
            "S" => Ok(Side::Sell),
            s => Err(ParseError::UnknownSide(s.to_owned())),
        }
    }
}

#[cfg(feature = "rand")]
mod __rand {
    use rand::distributions::Standard;
    use rand::prelude::*;

    use super::*;

    impl Distribution<Side> for Standard {
        #[inline]
        fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Side {
            match rng.gen_bool(0.5) {
                true => Side::Buy,
                false => Side::Sell,
            }
        }
    }
}
