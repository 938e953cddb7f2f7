//! Raw HTTP clients

mod client;
mod line;
mod relay;

pub use client::PointsClient;
pub use line::LineClient;
pub use relay::RelayClient;
