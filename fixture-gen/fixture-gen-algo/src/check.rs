use std::collections::HashMap;
use std::collections::HashSet;
use std::io;
use std::io::BufRead;

use fixture_types::error::ParseError;
use fixture_types::ClientId;
use fixture_types::InstrumentId;
use fixture_types::OrderId;
use fixture_types::Record;
use fixture_types::Side;
use fixture_types::END_OF_INPUT;
use fixture_types::START;
use fixture_types::TERMINATE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: {violation}")]
    Violation { line: usize, violation: Violation },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("fixture is empty")]
    Empty,
    #[error("invalid client count `{0}`")]
    InvalidClientCount(String),
    #[error("client count mismatch (expected={expected}, found={found})")]
    ClientCountMismatch { expected: u32, found: u32 },
    #[error("expected start marker `o`, found `{0}`")]
    ExpectedStart(String),
    #[error(transparent)]
    Record(#[from] ParseError),
    #[error("client {client_id} is outside [0, {clients})")]
    ClientOutOfRange { client_id: ClientId, clients: u32 },
    #[error("instrument {instrument_id} is outside [0, {instruments})")]
    InstrumentOutOfRange {
        instrument_id: InstrumentId,
        instruments: u32,
    },
    #[error("order {order_id} does not follow order {previous}")]
    OrderIdNotIncreasing { order_id: OrderId, previous: OrderId },
    #[error("client {client_id} cancels order {order_id} it never placed")]
    UnknownCancel {
        client_id: ClientId,
        order_id: OrderId,
    },
    #[error("order {0} is cancelled more than once")]
    Recancel(OrderId),
    #[error("more than {0} records")]
    TooManyRecords(u64),
    #[error("missing end-of-input marker `.`")]
    MissingEndOfInput,
    #[error("expected terminator `x`, found `{0}`")]
    ExpectedTerminator(String),
    #[error("missing terminator `x`")]
    MissingTerminator,
    #[error("unexpected line after terminator `{0}`")]
    TrailingLine(String),
}

/// What a valid fixture contained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub clients: u32,
    pub records: u64,
    pub buys: u64,
    pub sells: u64,
    pub cancels: u64,
    /// Cancels that hit an order which was already cancelled.
    pub recancels: u64,
}

/// Streaming validator of the fixture format.
///
/// Without any expectation set, only the file's own consistency is checked:
/// framing, record syntax, client ids against the header, increasing order
/// ids and cancels referencing an earlier order of the same client.
///
/// Numbers must be unsigned decimal digits. Fields may be separated by any
/// ASCII whitespace and CRLF line endings are accepted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checker {
    clients: Option<u32>,
    instruments: Option<u32>,
    max_records: Option<u64>,
    strict: bool,
}

impl Checker {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Header must announce exactly this many clients.
    #[inline]
    pub fn clients(mut self, clients: u32) -> Self {
        self.clients = Some(clients);
        self
    }

    #[inline]
    pub fn instruments(mut self, instruments: u32) -> Self {
        self.instruments = Some(instruments);
        self
    }

    #[inline]
    pub fn max_records(mut self, max_records: u64) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Rejects cancelling the same order twice.
    #[inline]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[inline]
    pub fn check_str(&self, input: &str) -> Result<Summary, CheckError> {
        self.check(input.as_bytes())
    }

    pub fn check<B: BufRead>(&self, reader: B) -> Result<Summary, CheckError> {
        let mut state = State::Header;
        let mut scan = Scan::default();
        let mut line_no = 0;

        for line in reader.lines() {
            let line = line?;
            line_no += 1;

            state = self
                .step(state, &line, &mut scan)
                .map_err(|violation| CheckError::Violation {
                    line: line_no,
                    violation,
                })?;
        }

        let violation = match state {
            State::Done => return Ok(scan.summary),
            State::Header => Violation::Empty,
            State::Start => Violation::ExpectedStart(String::new()),
            State::Records => Violation::MissingEndOfInput,
            State::Terminator => Violation::MissingTerminator,
        };
        Err(CheckError::Violation {
            line: line_no + 1,
            violation,
        })
    }

    fn step(
        &self,
        state: State,
        line: &str,
        scan: &mut Scan,
    ) -> Result<State, Violation> {
        match state {
            State::Header => {
                let invalid = || Violation::InvalidClientCount(line.to_owned());
                if line.starts_with('+') {
                    return Err(invalid());
                }
                let clients = line.parse::<u32>().map_err(|_| invalid())?;
                if let Some(expected) = self.clients {
                    if expected != clients {
                        return Err(Violation::ClientCountMismatch {
                            expected,
                            found: clients,
                        });
                    }
                }
                scan.summary.clients = clients;
                Ok(State::Start)
            }
            State::Start if line == START => Ok(State::Records),
            State::Start => Err(Violation::ExpectedStart(line.to_owned())),
            State::Records if line == END_OF_INPUT => Ok(State::Terminator),
            State::Records => {
                self.record(line.parse()?, scan)?;
                Ok(State::Records)
            }
            State::Terminator if line == TERMINATE => Ok(State::Done),
            State::Terminator => {
                Err(Violation::ExpectedTerminator(line.to_owned()))
            }
            State::Done => Err(Violation::TrailingLine(line.to_owned())),
        }
    }

    fn record(&self, record: Record, scan: &mut Scan) -> Result<(), Violation> {
        let clients = scan.summary.clients;
        let client_id = record.client_id();
        if client_id.get() >= clients {
            return Err(Violation::ClientOutOfRange { client_id, clients });
        }

        if let Some(limit) = self.max_records {
            if scan.summary.records >= limit {
                return Err(Violation::TooManyRecords(limit));
            }
        }

        match record {
            Record::New {
                side,
                order_id,
                instrument_id,
                ..
            } => {
                if let Some(instruments) = self.instruments {
                    if instrument_id.get() >= instruments {
                        return Err(Violation::InstrumentOutOfRange {
                            instrument_id,
                            instruments,
                        });
                    }
                }
                if let Some(previous) = scan.last_order_id {
                    if order_id <= previous {
                        return Err(Violation::OrderIdNotIncreasing {
                            order_id,
                            previous,
                        });
                    }
                }
                scan.last_order_id = Some(order_id);
                scan.owners.insert(order_id, client_id);
                match side {
                    Side::Buy => scan.summary.buys += 1,
                    Side::Sell => scan.summary.sells += 1,
                }
            }
            Record::Cancel { order_id, .. } => {
                if scan.owners.get(&order_id) != Some(&client_id) {
                    return Err(Violation::UnknownCancel {
                        client_id,
                        order_id,
                    });
                }
                if !scan.cancelled.insert(order_id) {
                    if self.strict {
                        return Err(Violation::Recancel(order_id));
                    }
                    scan.summary.recancels += 1;
                }
                scan.summary.cancels += 1;
            }
        }

        scan.summary.records += 1;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
enum State {
    Header,
    Start,
    Records,
    Terminator,
    Done,
}

#[derive(Default)]
struct Scan {
    summary: Summary,
    last_order_id: Option<OrderId>,
    owners: HashMap<OrderId, ClientId>,
    cancelled: HashSet<OrderId>,
}
