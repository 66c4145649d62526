pub mod client;
pub mod error;
mod retry;
pub mod stock;
pub mod types;

pub use client::BsaleClient;
pub use error::{ClientError, Resource};
pub use types::ProductPage;
