/// What happens when a cancel is drawn for a client with nothing to cancel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnEmpty {
    /// Drop the query without writing anything. The fixture ends up with
    /// fewer records than queries.
    #[default]
    Skip,
    /// Draw a buy or sell instead and emit it as a new order.
    Replace,
}

/// Whether an order that was already cancelled can be drawn again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Recancel {
    #[default]
    Allow,
    /// Cancelled orders leave the client's pool of cancellable orders.
    Exclude,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    pub on_empty: OnEmpty,
    pub recancel: Recancel,
}

impl Policy {
    #[inline]
    pub fn on_empty(mut self, on_empty: OnEmpty) -> Self {
        self.on_empty = on_empty;
        self
    }

    #[inline]
    pub fn recancel(mut self, recancel: Recancel) -> Self {
        self.recancel = recancel;
        self
    }
}
