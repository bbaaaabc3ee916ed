use std::fmt;

use crate::error::RangeError;

/// Limit price of a new order, always within `[Price::MIN, Price::MAX]`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(u16);

impl Price {
    pub const MIN: Price = Price(1);
    pub const MAX: Price = Price(9_999);

    #[inline]
    pub fn new(value: u16) -> Result<Self, RangeError> {
        Self::try_from(u64::from(value))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u64> for Price {
    type Error = RangeError;

    #[inline]
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if (u64::from(Self::MIN.0)..=u64::from(Self::MAX.0)).contains(&value) {
            Ok(Self(value as u16))
        } else {
            Err(RangeError::Price(value))
        }
    }
}

impl fmt::Display for Price {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "rand")]
mod __rand {
    use rand::distributions::Standard;
    use rand::prelude::*;

    use super::*;

    impl Distribution<Price> for Standard {
        #[inline]
        fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Price {
            Price(rng.gen_range(Price::MIN.0..=Price::MAX.0))
        }
    }
}
