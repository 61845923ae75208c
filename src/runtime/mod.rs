//! Remote API access and the browsing flow built on it

pub mod browse;
pub mod client;

pub use browse::{Browser, WatchView};
pub use client::{Client, ClientBuilder};
