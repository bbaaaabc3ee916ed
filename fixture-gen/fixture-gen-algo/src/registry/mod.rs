mod orders_by_client;
pub use orders_by_client::OrdersByClient;
