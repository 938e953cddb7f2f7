//! LIFF Points Relay - server-side push-message relay

pub mod config;
pub mod relay;
pub mod state;

pub use config::load_relay_config;
pub use relay::build_router;
pub use state::RelayState;
