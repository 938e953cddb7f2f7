//! LIFF Points Engine - Identity resolution and the redemption widget

pub mod greeting;
pub mod identity;
pub mod widget;

pub use identity::{IdentityProvider, IdentityResolution, LiffIdentity, LiffSdk, SdkError};
pub use widget::{Balance, RedemptionOutcome, RedemptionWidget, SubmitError, WidgetState};
