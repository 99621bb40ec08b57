//! Shared HTTP agent
//!
//! All API clients go through one agent so connection reuse and the
//! timeout policy are applied uniformly.

use once_cell::sync::Lazy;
use std::time::Duration;

/// Agent shared by the news, translation, and hosted-TTS clients
pub static AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(30)))
        .build();
    config.into()
});
