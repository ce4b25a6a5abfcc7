//! Desk configuration.
//!
//! Configuration comes from environment variables (via .env file or shell)
//! prefixed with `P2P_`, the front-ends may override the service URL from
//! their command line.

use std::{path::PathBuf, time::Duration};

use url::Url;

use crate::{
    DEFAULT_API_URL, Endpoint,
    error::ConfigError,
    store::FileStore,
    types::{DetailRule, DetailRules, PaymentMethod},
};

/// Prefix of the configuration environment variables.
pub const ENV_PREFIX: &str = "P2P_";

/// Environment configuration.
#[derive(Debug, Default, serde::Deserialize)]
pub struct EnvConfig {
    /// Order service base URL (default: http://localhost:5000)
    pub api_url: Option<String>,

    /// Optional request timeout, unbounded if not set
    pub timeout_seconds: Option<u64>,

    /// Navigation state file (default: <data dir>/p2p-desk/state.json)
    pub state_path: Option<PathBuf>,

    /// Minimum SBP phone number length
    pub sbp_min_details: Option<usize>,

    /// Minimum e-wallet identifier length
    pub wallet_min_details: Option<usize>,

    /// Minimum mobile number length
    pub mobile_min_details: Option<usize>,

    /// Exact number of card digits
    pub card_digits: Option<usize>,
}

impl EnvConfig {
    /// Load configuration from `P2P_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::prefixed(ENV_PREFIX).from_env()?)
    }

    /// Load configuration from `(name, value)` pairs, names carrying the
    /// `P2P_` prefix.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }

    /// Order service endpoint, `api_url` taking precedence over the
    /// environment.
    pub fn endpoint(&self, api_url: Option<&str>) -> Result<Endpoint, ConfigError> {
        let url = api_url
            .or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL);
        let endpoint = Endpoint::custom(Url::parse(url)?);
        Ok(match self.timeout_seconds {
            Some(secs) => endpoint.with_timeout(Duration::from_secs(secs)),
            None => endpoint,
        })
    }

    /// Payment details rules, defaults overridden per method.
    pub fn detail_rules(&self) -> Result<DetailRules, ConfigError> {
        let mut rules = DetailRules::default();
        let overrides = [
            (PaymentMethod::Sbp, self.sbp_min_details.map(DetailRule::MinLength)),
            (PaymentMethod::EWallet, self.wallet_min_details.map(DetailRule::MinLength)),
            (PaymentMethod::MobileTopUp, self.mobile_min_details.map(DetailRule::MinLength)),
            (PaymentMethod::BankCard, self.card_digits.map(DetailRule::ExactDigits)),
        ];
        for (method, rule) in overrides {
            let Some(rule) = rule else { continue };
            if rule == DetailRule::ExactDigits(0) {
                return Err(ConfigError::ZeroCardDigits);
            }
            rules = rules.with_rule(method, rule);
        }
        Ok(rules)
    }

    pub fn state_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.state_path {
            Some(path) => Ok(path.clone()),
            None => Ok(FileStore::default_path()?),
        }
    }
}
