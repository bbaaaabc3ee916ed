use std::fmt;

use crate::error::RangeError;

/// Order size, always within `[Quantity::MIN, Quantity::MAX]`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u8);

impl Quantity {
    pub const MIN: Quantity = Quantity(1);
    pub const MAX: Quantity = Quantity(99);

    #[inline]
    pub fn new(value: u8) -> Result<Self, RangeError> {
        Self::try_from(u64::from(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u64> for Quantity {
    type Error = RangeError;

    #[inline]
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if (u64::from(Self::MIN.0)..=u64::from(Self::MAX.0)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RangeError::Quantity(value))
        }
    }
}

impl fmt::Display for Quantity {
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

    impl Distribution<Quantity> for Standard {
        #[inline]
        fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Quantity {
            Quantity(rng.gen_range(Quantity::MIN.0..=Quantity::MAX.0))
        }
    }
}
