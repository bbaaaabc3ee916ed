pub mod error;

mod client_id;
pub use client_id::ClientId;

mod framing;
pub use framing::END_OF_INPUT;
pub use framing::START;
pub use framing::TERMINATE;

mod instrument_id;
pub use instrument_id::InstrumentId;

mod order_id;
pub use order_id::OrderId;

mod price;
pub use price::Price;

mod quantity;
pub use quantity::Quantity;

mod record;
pub use record::Record;

mod side;
pub use side::Side;
