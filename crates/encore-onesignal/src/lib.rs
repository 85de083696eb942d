// OneSignal push capability
//
// Wraps OneSignal's user API behind encore-core's PushCapability trait.
// Delivery and scheduling stay with OneSignal; this crate only answers
// whether a user can receive pushes and has allowed them.

mod client;
mod config;
mod types;

pub use client::{OneSignalClient, OneSignalPush};
pub use config::{OneSignalConfig, DEFAULT_API_URL};
pub use types::{OneSignalSubscription, OneSignalUser};
