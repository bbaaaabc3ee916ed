use fixture_types::ClientId;
use fixture_types::InstrumentId;
use fixture_types::Record;
use fixture_types::Side;
use rand::distributions::Standard;
use rand::prelude::*;
use tracing::debug;

use crate::OnEmpty;
use crate::OrderCounter;
use crate::OrdersByClient;
use crate::Params;
use crate::ParamsError;
use crate::Policy;

/// Operation type drawn for a query, each with probability 1/3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    Buy,
    Sell,
    Cancel,
}

impl Distribution<QueryKind> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> QueryKind {
        match rng.gen_range(0..3) {
            0 => QueryKind::Buy,
            1 => QueryKind::Sell,
            _ => QueryKind::Cancel,
        }
    }
}

/// Outcome of a single query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Draw {
    Emit(Record),
    /// A cancel was drawn for a client with no cancellable orders.
    Skip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stats {
    pub buys: u64,
    pub sells: u64,
    pub cancels: u64,
    pub skipped: u64,
}

impl Stats {
    /// Record lines emitted so far.
    #[inline]
    pub const fn records(&self) -> u64 {
        self.buys + self.sells + self.cancels
    }

    /// Queries drawn so far, skipped ones included.
    #[inline]
    pub const fn queries(&self) -> u64 {
        self.records() + self.skipped
    }
}

/// Random stream of records bounded by [`Params::queries`].
///
/// The registry and counter live and die with the generator, so two
/// generators never share state.
pub struct Generator<R> {
    params: Params,
    policy: Policy,
    rng: R,
    counter: OrderCounter,
    registry: OrdersByClient,
    stats: Stats,
}

impl<R: Rng> Generator<R> {
    pub fn new(
        params: Params,
        policy: Policy,
        rng: R,
    ) -> Result<Self, ParamsError> {
        params.validate()?;

        Ok(Self {
            params,
            policy,
            rng,
            counter: OrderCounter::new(),
            registry: OrdersByClient::with_clients(params.clients),
            stats: Stats::default(),
        })
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.stats.queries() >= self.params.queries
    }

    /// Runs the next query, or returns `None` once all queries are drawn.
    pub fn draw(&mut self) -> Option<Draw> {
        if self.is_exhausted() {
            return None;
        }

        let client_id =
            ClientId::new(self.rng.gen_range(0..self.params.clients));
        let side = match self.rng.gen::<QueryKind>() {
            QueryKind::Buy => Side::Buy,
            QueryKind::Sell => Side::Sell,
            QueryKind::Cancel => {
                let picked = self.registry.pick(
                    client_id,
                    self.policy.recancel,
                    &mut self.rng,
                );
                match (picked, self.policy.on_empty) {
                    (Some(order_id), _) => {
                        self.stats.cancels += 1;
                        return Some(Draw::Emit(Record::Cancel {
                            client_id,
                            order_id,
                        }));
                    }
                    (None, OnEmpty::Skip) => {
                        debug!(%client_id, "skipping cancel without orders");
                        self.stats.skipped += 1;
                        return Some(Draw::Skip);
                    }
                    (None, OnEmpty::Replace) => {
                        debug!(%client_id, "replacing cancel without orders");
                        self.rng.gen::<Side>()
                    }
                }
            }
        };

        let order_id = self.counter.allocate();
        self.registry.register(client_id, order_id);
        match side {
            Side::Buy => self.stats.buys += 1,
            Side::Sell => self.stats.sells += 1,
        }

        Some(Draw::Emit(Record::New {
            client_id,
            side,
            order_id,
            instrument_id: InstrumentId::new(
                self.rng.gen_range(0..self.params.instruments),
            ),
            price: self.rng.gen(),
            quantity: self.rng.gen(),
        }))
    }
}

impl<R: Rng> Iterator for Generator<R> {
    type Item = Record;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.draw()? {
                Draw::Emit(record) => return Some(record),
                Draw::Skip => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::assert;
    use assert2::let_assert;
    use fixture_types::OrderId;
    use fixture_types::Price;
    use fixture_types::Quantity;

    use super::*;
    use crate::Recancel;

    fn generator(
        params: Params,
        policy: Policy,
        seed: u64,
    ) -> Generator<StdRng> {
        Generator::new(params, policy, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn rejects_empty_domains() {
        let rng = StdRng::seed_from_u64(0);
        let_assert!(
            Err(error) =
                Generator::new(Params::new(5, 1, 0), Policy::default(), rng)
        );
        assert!(error == ParamsError::NoClients);

        let rng = StdRng::seed_from_u64(0);
        assert!(Generator::new(Params::new(5, 0, 1), Policy::default(), rng)
            .is_err_and(|error| error == ParamsError::NoInstruments));
    }

    #[test]
    fn draws_exactly_the_requested_queries() {
        let mut generator =
            generator(Params::new(1_000, 10, 5), Policy::default(), 3);
        let draws = std::iter::from_fn(|| generator.draw()).count();

        assert!(draws == 1_000);
        assert!(generator.stats().queries() == 1_000);
        assert!(generator.draw().is_none());
    }

    #[test]
    fn records_respect_bounds_and_references() {
        let params = Params::new(5_000, 7, 4);
        let mut generator = generator(params, Policy::default(), 11);
        let mut owners = HashMap::<OrderId, ClientId>::new();
        let mut last = None;

        for record in generator.by_ref() {
            assert!(record.client_id().get() < params.clients);
            match record {
                Record::New {
                    client_id,
                    order_id,
                    instrument_id,
                    price,
                    quantity,
                    ..
                } => {
                    assert!(last < Some(order_id));
                    last = Some(order_id);
                    owners.insert(order_id, client_id);
                    assert!(instrument_id.get() < params.instruments);
                    assert!((Price::MIN..=Price::MAX).contains(&price));
                    assert!(
                        (Quantity::MIN..=Quantity::MAX).contains(&quantity)
                    );
                }
                Record::Cancel {
                    client_id,
                    order_id,
                } => {
                    assert!(owners.get(&order_id) == Some(&client_id));
                }
            }
        }

        let stats = generator.stats();
        assert!(stats.records() <= params.queries);
        assert!(stats.buys + stats.sells == owners.len() as u64);
    }

    #[test]
    fn single_client_only_skips_before_its_first_order() {
        for seed in 0..64 {
            let mut generator =
                generator(Params::new(5, 2, 1), Policy::default(), seed);
            let draws =
                std::iter::from_fn(|| generator.draw()).collect::<Vec<_>>();

            let leading_skips =
                draws.iter().take_while(|draw| **draw == Draw::Skip).count();
            assert!(generator.stats().skipped == leading_skips as u64);
            for draw in &draws[leading_skips..] {
                let_assert!(Draw::Emit(record) = draw);
                assert!(record.client_id() == ClientId::new(0));
            }
        }
    }

    #[test]
    fn replace_never_skips() {
        let policy = Policy::default().on_empty(OnEmpty::Replace);
        let mut generator = generator(Params::new(2_000, 3, 40), policy, 5);

        assert!(generator.by_ref().count() == 2_000);
        assert!(generator.stats().skipped == 0);
    }

    #[test]
    fn exclude_never_cancels_twice() {
        let policy = Policy::default().recancel(Recancel::Exclude);
        let generator = generator(Params::new(10_000, 3, 2), policy, 8);

        let mut cancelled = Vec::new();
        for record in generator {
            if let Record::Cancel { order_id, .. } = record {
                cancelled.push(order_id);
            }
        }
        let total = cancelled.len();
        cancelled.sort_unstable();
        cancelled.dedup();

        assert!(total > 0);
        assert!(cancelled.len() == total);
    }

    #[test]
    fn same_seed_same_stream() {
        let params = Params::new(500, 50, 10);
        let left =
            generator(params, Policy::default(), 42).collect::<Vec<_>>();
        let right =
            generator(params, Policy::default(), 42).collect::<Vec<_>>();

        assert!(left == right);
    }

    #[test]
    fn kinds_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut counts = [0u32; 3];
        for _ in 0..30_000 {
            counts[rng.gen::<QueryKind>() as usize] += 1;
        }
        for count in counts {
            assert!((9_000..11_000).contains(&count));
        }
    }
}
