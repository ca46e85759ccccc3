pub mod client;

pub use client::{AmadeusClient, ProviderConfig};
