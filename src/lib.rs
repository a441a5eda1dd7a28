//! Order entry desk for a furniture showroom, with debounced address
//! autocomplete for the billing and shipping addresses.

pub mod app;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod lookup;
pub mod order;
pub mod stores;
pub mod widgets;
