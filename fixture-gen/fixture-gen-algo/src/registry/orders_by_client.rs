use std::ops::Deref;

use fixture_types::ClientId;
use fixture_types::OrderId;
use rand::Rng;

use crate::Recancel;

/// Orders placed so far in a run, indexed by client.
///
/// Ids are only appended. With [`Recancel::Exclude`] a picked id is taken out
/// so it can never be cancelled twice.
#[derive(Debug)]
pub struct OrdersByClient(Box<[Vec<OrderId>]>);

impl OrdersByClient {
    #[inline]
    pub fn with_clients(clients: u32) -> Self {
        Self((0..clients).map(|_| Vec::new()).collect())
    }

    #[inline]
    pub fn register(&mut self, client_id: ClientId, order_id: OrderId) {
        self.0[client_id.index()].push(order_id);
    }

    /// Picks one of the client's cancellable orders uniformly at random.
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        client_id: ClientId,
        recancel: Recancel,
        rng: &mut R,
    ) -> Option<OrderId> {
        let orders = &mut self.0[client_id.index()];
        if orders.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..orders.len());
        match recancel {
            Recancel::Allow => Some(orders[index]),
            Recancel::Exclude => Some(orders.swap_remove(index)),
        }
    }
}

impl Deref for OrdersByClient {
    type Target = [Vec<OrderId>];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
