// wattly-api: Async client for the DLI web power switch HTTP interface

pub mod auth;
pub mod client;
pub mod error;
pub mod outlet;
pub mod transport;

pub(crate) mod scrape;

pub use auth::login_hash;
pub use client::{PduClient, SessionCookie};
pub use error::Error;
pub use outlet::{Action, OutletSelector};
pub use transport::TransportConfig;
