//! Data models for the points backend, the identity layer and the relay

mod points;
mod profile;
mod redeem;
mod relay;

pub use points::*;
pub use profile::*;
pub use redeem::*;
pub use relay::*;
