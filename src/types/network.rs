use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::UnknownOption;

/// Blockchain network the sold asset is sent over.
///
/// Each network owns a closed, ordered list of assets accepted on it,
/// see [`assets_for`]. The first asset of the list is the default one
/// picked whenever the network changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Ton,
    Tron,
    Ethereum,
    BnbSmartChain,
}

/// Ticker of an asset accepted by the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    Ton,
    Usdt,
    Not,
    Dogs,
    Trx,
    Usdc,
    Eth,
    Bnb,
}

impl Default for Asset {
    fn default() -> Self {
        Network::default().default_asset()
    }
}

/// Assets valid for the given network, never empty.
pub fn assets_for(network: Network) -> &'static [Asset] {
    match network {
        Network::Ton => &[Asset::Ton, Asset::Usdt, Asset::Not, Asset::Dogs],
        Network::Tron => &[Asset::Usdt, Asset::Trx, Asset::Usdc],
        Network::Ethereum => &[Asset::Eth, Asset::Usdt, Asset::Usdc],
        Network::BnbSmartChain => &[Asset::Bnb, Asset::Usdt],
    }
}

impl Network {
    /// All networks in presentation order.
    pub const ALL: [Network; 4] = [
        Network::Ton,
        Network::Tron,
        Network::Ethereum,
        Network::BnbSmartChain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Network::Ton => "TON (The Open Network)",
            Network::Tron => "Tron (TRC20)",
            Network::Ethereum => "Ethereum (ERC20)",
            Network::BnbSmartChain => "BNB Smart Chain (BEP20)",
        }
    }

    /// Lowercase alternative spellings, used by the searchable selector only.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Network::Ton => &["ton", "toncoin", "the open network", "тон"],
            Network::Tron => &["trc20", "trc-20", "tron", "trx", "трон"],
            Network::Ethereum => &["erc20", "erc-20", "eth", "ethereum", "эфир"],
            Network::BnbSmartChain => &["bep20", "bep-20", "bsc", "bnb", "binance"],
        }
    }

    pub fn assets(&self) -> &'static [Asset] {
        assets_for(*self)
    }

    pub fn default_asset(&self) -> Asset {
        self.assets()[0]
    }

    pub fn supports(&self, asset: Asset) -> bool {
        self.assets().contains(&asset)
    }

    /// Looks a network up by its exact display label.
    pub fn from_label(label: &str) -> Result<Self, UnknownOption> {
        Self::ALL
            .into_iter()
            .find(|n| n.label() == label)
            .ok_or_else(|| UnknownOption::new("network", label))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl Asset {
    pub fn ticker(&self) -> &'static str {
        match self {
            Asset::Ton => "TON",
            Asset::Usdt => "USDT",
            Asset::Not => "NOT",
            Asset::Dogs => "DOGS",
            Asset::Trx => "TRX",
            Asset::Usdc => "USDC",
            Asset::Eth => "ETH",
            Asset::Bnb => "BNB",
        }
    }

    pub fn from_ticker(ticker: &str) -> Result<Self, UnknownOption> {
        Network::ALL
            .iter()
            .flat_map(|n| n.assets())
            .copied()
            .find(|a| a.ticker() == ticker)
            .ok_or_else(|| UnknownOption::new("asset", ticker))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.ticker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_network_has_assets() {
        for network in Network::ALL {
            assert!(!assets_for(network).is_empty(), "{network}");
            assert!(network.supports(network.default_asset()));
        }
    }

    #[test]
    fn test_default_assets() {
        assert_eq!(Network::Ton.default_asset(), Asset::Ton);
        assert_eq!(Network::Tron.default_asset(), Asset::Usdt);
        assert_eq!(Network::Ethereum.default_asset(), Asset::Eth);
        assert_eq!(Network::BnbSmartChain.default_asset(), Asset::Bnb);
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(Network::from_label("Tron (TRC20)"), Ok(Network::Tron));
        assert!(Network::from_label("tron").is_err());
        assert_eq!(Asset::from_ticker("DOGS"), Ok(Asset::Dogs));
        assert!(Asset::from_ticker("usdt").is_err());
    }

    #[test]
    fn test_serialize_as_labels() {
        assert_eq!(
            serde_json::to_string(&Network::BnbSmartChain).unwrap(),
            "\"BNB Smart Chain (BEP20)\""
        );
        assert_eq!(serde_json::to_string(&Asset::Usdc).unwrap(), "\"USDC\"");
    }
}
