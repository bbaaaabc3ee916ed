use std::fmt;
use std::str::FromStr;
use std::str::SplitAsciiWhitespace;

use crate::error::ParseError;
use crate::ClientId;
use crate::InstrumentId;
use crate::OrderId;
use crate::Price;
use crate::Quantity;
use crate::Side;

/// Code of a cancel record.
const CANCEL: &str = "C";

/// A single operation line between the start and end-of-input markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Record {
    New {
        client_id: ClientId,
        side: Side,
        order_id: OrderId,
        instrument_id: InstrumentId,
        price: Price,
        quantity: Quantity,
    },
    Cancel {
        client_id: ClientId,
        order_id: OrderId,
    },
}

impl Record {
    #[inline]
    pub const fn client_id(&self) -> ClientId {
        match self {
            Record::New { client_id, .. }
            | Record::Cancel { client_id, .. } => *client_id,
        }
    }

    #[inline]
    pub const fn order_id(&self) -> OrderId {
        match self {
            Record::New { order_id, .. } | Record::Cancel { order_id, .. } => {
                *order_id
            }
        }
    }

    #[inline]
    pub const fn is_cancel(&self) -> bool {
        matches!(self, Record::Cancel { .. })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::New {
                client_id,
                side,
                order_id,
                instrument_id,
                price,
                quantity,
            } => write!(
                f,
                "{client_id} {side} {order_id} {instrument_id} {price} \
                 {quantity}"
            ),
            Record::Cancel {
                client_id,
                order_id,
            } => write!(f, "{client_id} {CANCEL} {order_id}"),
        }
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = Fields(s.split_ascii_whitespace());

        let client_id = match fields.0.next() {
            Some(field) => ClientId::new(number("client_id", field)?),
            None => return Err(ParseError::Empty),
        };

        let record = match fields.next("side")? {
            CANCEL => Record::Cancel {
                client_id,
                order_id: OrderId::new(fields.number("order_id")?),
            },
            side => Record::New {
                client_id,
                side: side.parse()?,
                order_id: OrderId::new(fields.number("order_id")?),
                instrument_id: InstrumentId::new(
                    fields.number("instrument_id")?,
                ),
                price: Price::try_from(fields.number::<u64>("price")?)?,
                quantity: Quantity::try_from(
                    fields.number::<u64>("quantity")?,
                )?,
            },
        };

        match fields.0.next() {
            Some(extra) => Err(ParseError::TrailingField(extra.to_owned())),
            None => Ok(record),
        }
    }
}

struct Fields<'a>(SplitAsciiWhitespace<'a>);

impl<'a> Fields<'a> {
    #[inline]
    fn next(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        self.0.next().ok_or(ParseError::MissingField(field))
    }

    #[inline]
    fn number<T>(&mut self, field: &'static str) -> Result<T, ParseError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        number(field, self.next(field)?)
    }
}

#[inline]
fn number<T>(field: &'static str, s: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    if s.starts_with('+') {
        return Err(ParseError::NotDecimal {
            field,
            value: s.to_owned(),
        });
    }
    s.parse()
        .map_err(|source| ParseError::InvalidNumber { field, source })
}
