//! LIFF Points Networking - HTTP clients for the points backend, the
//! messaging platform and the relay

pub mod api;
pub mod http;

pub use api::{PointsBackend, PushApi, RelayApi};
pub use http::{LineClient, PointsClient, RelayClient};
