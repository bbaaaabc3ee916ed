use fixture_types::OrderId;

/// Hands out order ids `0, 1, 2, ...` for one generation run.
#[derive(Debug, Default)]
pub struct OrderCounter {
    next: u64,
}

impl OrderCounter {
    #[inline]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    #[inline]
    pub fn allocate(&mut self) -> OrderId {
        let id = OrderId::new(self.next);
        self.next += 1;
        id
    }
}
