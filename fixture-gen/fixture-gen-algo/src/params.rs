use thiserror::Error;

/// Target sizes of a single fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Number of queries drawn. Skipped cancels make the record count lower.
    pub queries: u64,
    pub instruments: u32,
    pub clients: u32,
}

impl Params {
    #[inline]
    pub const fn new(queries: u64, instruments: u32, clients: u32) -> Self {
        Self {
            queries,
            instruments,
            clients,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.clients == 0 {
            return Err(ParamsError::NoClients);
        }
        if self.instruments == 0 {
            return Err(ParamsError::NoInstruments);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("at least one client is required")]
    NoClients,
    #[error("at least one instrument is required")]
    NoInstruments,
}
