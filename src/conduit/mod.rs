pub mod client;
pub mod methods;

pub use client::ConduitClient;
