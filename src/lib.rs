#![deny(rust_2018_idioms)]

pub use config::Config;
pub use domain::{
    MemberId, NotificationRequest, NotificationRequestBuilder, OutgoingNotification,
    RelaySummary,
};

pub mod config;
pub mod domain;
pub mod flow;
mod request;
pub mod wire;
