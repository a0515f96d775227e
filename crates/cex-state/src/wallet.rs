//! # Wallet Network Catalog
//!
//! Static per-asset deposit addresses and network parameters for the demo
//! wallet. The catalog is fixed at compile time — the demo has no address
//! derivation or custody backend; these are display addresses only.

use serde::{Deserialize, Serialize};

use cex_core::AssetSymbol;

/// QR code rendering service used for deposit address QR images.
const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=";

/// Deposit memo required by BNB Beacon-style networks.
const BNB_MEMO: &str = "12345678";

/// Per-asset network parameters. Serialize-only: the catalog is compile
/// time constant and never read back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Settlement network name.
    pub network: &'static str,
    /// Minimum accepted deposit.
    pub min_amount: f64,
    /// Confirmations before crediting.
    pub confirmations: u32,
    /// Human-readable crediting estimate.
    pub estimated_time: &'static str,
}

/// Everything a client needs to make a deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInfo {
    /// The deposit address.
    pub deposit_address: String,
    /// QR image URL for the address.
    pub qr_code: String,
    /// Memo/tag, when the network requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Settlement network name.
    pub network: String,
    /// Minimum accepted deposit.
    pub min_amount: f64,
    /// Confirmations before crediting.
    pub confirmations: u32,
    /// Human-readable crediting estimate.
    pub estimated_time: String,
}

/// Display deposit addresses per asset.
const DEPOSIT_ADDRESSES: &[(&str, &str)] = &[
    ("BTC", "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"),
    ("ETH", "0x742d35Cc6634C0532925a3b8D4C0C8b3C2b5d2e1"),
    ("USDT", "0x742d35Cc6634C0532925a3b8D4C0C8b3C2b5d2e1"),
    ("BNB", "bnb1grpf0955h0ykzq3ar5nmum7y6gdfl6lxfn46h2"),
    ("SOL", "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM"),
    (
        "ADA",
        "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3jcu5d8ps7zex2k2xt3uqxgjqnnj83ws8lhrn648jjxtwq2ytjqp",
    ),
    ("DOT", "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5"),
];

/// Network parameters per asset.
const NETWORK_CONFIGS: &[(&str, NetworkConfig)] = &[
    (
        "BTC",
        NetworkConfig {
            network: "Bitcoin",
            min_amount: 0.0001,
            confirmations: 3,
            estimated_time: "30-60 minutes",
        },
    ),
    (
        "ETH",
        NetworkConfig {
            network: "Ethereum",
            min_amount: 0.01,
            confirmations: 12,
            estimated_time: "5-15 minutes",
        },
    ),
    (
        "USDT",
        NetworkConfig {
            network: "Ethereum (ERC-20)",
            min_amount: 10.0,
            confirmations: 12,
            estimated_time: "5-15 minutes",
        },
    ),
    (
        "BNB",
        NetworkConfig {
            network: "BNB Smart Chain",
            min_amount: 0.01,
            confirmations: 15,
            estimated_time: "3-5 minutes",
        },
    ),
    (
        "SOL",
        NetworkConfig {
            network: "Solana",
            min_amount: 0.01,
            confirmations: 1,
            estimated_time: "1-2 minutes",
        },
    ),
    (
        "ADA",
        NetworkConfig {
            network: "Cardano",
            min_amount: 1.0,
            confirmations: 15,
            estimated_time: "10-20 minutes",
        },
    ),
    (
        "DOT",
        NetworkConfig {
            network: "Polkadot",
            min_amount: 0.1,
            confirmations: 1,
            estimated_time: "6-12 minutes",
        },
    ),
];

/// Network parameters for an asset, if supported.
pub fn network_config(asset: &AssetSymbol) -> Option<NetworkConfig> {
    NETWORK_CONFIGS
        .iter()
        .find(|(sym, _)| *sym == asset.as_str())
        .map(|(_, config)| *config)
}

/// Display deposit address for an asset, if supported.
fn deposit_address(asset: &AssetSymbol) -> Option<&'static str> {
    DEPOSIT_ADDRESSES
        .iter()
        .find(|(sym, _)| *sym == asset.as_str())
        .map(|(_, addr)| *addr)
}

/// Full deposit details for an asset, if supported.
pub fn deposit_info(asset: &AssetSymbol) -> Option<DepositInfo> {
    let config = network_config(asset)?;
    let address = deposit_address(asset)?;

    Some(DepositInfo {
        deposit_address: address.to_string(),
        qr_code: format!("{QR_SERVICE_URL}{address}"),
        memo: (asset.as_str() == "BNB").then(|| BNB_MEMO.to_string()),
        network: config.network.to_string(),
        min_amount: config.min_amount,
        confirmations: config.confirmations,
        estimated_time: config.estimated_time.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(s: &str) -> AssetSymbol {
        AssetSymbol::new(s).unwrap()
    }

    #[test]
    fn every_cataloged_asset_has_an_address() {
        for (sym, _) in NETWORK_CONFIGS {
            let asset = symbol(sym);
            assert!(
                deposit_info(&asset).is_some(),
                "missing address for {sym}"
            );
        }
    }

    #[test]
    fn btc_deposit_info() {
        let info = deposit_info(&symbol("BTC")).unwrap();
        assert_eq!(info.deposit_address, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        assert_eq!(info.network, "Bitcoin");
        assert_eq!(info.confirmations, 3);
        assert!(info.qr_code.contains(&info.deposit_address));
        assert!(info.memo.is_none());
    }

    #[test]
    fn bnb_requires_memo() {
        let info = deposit_info(&symbol("BNB")).unwrap();
        assert_eq!(info.memo.as_deref(), Some(BNB_MEMO));
    }

    #[test]
    fn unsupported_asset_yields_none() {
        assert!(network_config(&symbol("DOGE")).is_none());
        assert!(deposit_info(&symbol("DOGE")).is_none());
    }

    #[test]
    fn lookup_is_case_normalized_via_symbol() {
        // AssetSymbol uppercases on construction, so lowercase input works.
        assert!(deposit_info(&symbol("btc")).is_some());
    }
}
