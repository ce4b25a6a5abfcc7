//! P2P crypto sell desk.
//!
//! # Overview
//!
//! Client-side core of a peer-to-peer crypto-to-fiat sell desk: the user
//! picks a blockchain network and asset, enters an amount, picks a fiat
//! payout method with its details, and submits an order to the order
//! service.
//!
//! Use [`state::SellScreen`] (or the bare [`state::OrderForm`]) to hold the
//! draft and enforce the catalog cascades and validation rules, then submit
//! through any [`client::OrderSubmitter`], [`client::HttpClient`] being the
//! HTTP one.
//!
//! [`store::Navigator`] keeps track of the active screen across restarts.
//!
//! See `./tests` and the `order_desk` terminal front-end for examples.
//!
//! # Limitations/follow-ups
//!
//! * No authentication, profile, rewards or order history. These screens
//!   are placeholders.
//!
//! * Rates are fetched on demand only.
//!
//! # Testing
//!
//! [`testing`] module provides an in-memory order service and draft
//! fixtures.

pub mod client;
pub mod config;
pub mod error;
pub mod num;
pub mod state;
pub mod store;
pub mod testing;
pub mod types;

use std::time::Duration;

use url::Url;

/// Development order service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug)]
/// Order service the desk is talking to.
pub struct Endpoint {
    base_url: Url,
    timeout: Option<Duration>,
}

impl Endpoint {
    pub fn custom(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }

    /// Bounds every request, the service being unresponsive beyond that is
    /// treated as unreachable.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
