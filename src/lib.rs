//! Polls a remote key-value store for the `light` and `buzzer` states and
//! drives an active-low LED and buzzer on a Raspberry Pi to match.

pub mod channel;
pub mod command;
pub mod config;
pub mod controller;
pub mod delay;
pub mod error;
pub mod output;
pub mod store;
pub mod switch;

pub use channel::Channel;
pub use config::Config;
pub use controller::{Action, Controller, Observed, PollReport};
pub use delay::{Delay, ThreadDelay};
pub use error::{ConfigError, StoreError};
pub use output::{DigitalOutputs, GpioOutputs};
pub use store::{FirebaseStore, KeyValueStore};
pub use switch::Switch;
