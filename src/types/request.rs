use serde::{Deserialize, Serialize};

use super::{Asset, Network, PaymentMethod};

/// Message surfaced when the order service can not be reached.
pub const SERVICE_UNAVAILABLE: &str = "Сервер недоступен";

/// Snapshot of a valid order draft, as posted to the order service.
///
/// `network` and `method` are sent as display labels, `amount` exactly as
/// typed by the user.
#[derive(Clone, PartialEq, Eq, Serialize, derive_more::Debug)]
pub struct OrderRequest {
    pub network: Network,
    pub asset: Asset,
    pub method: PaymentMethod,
    pub amount: String,
    #[debug("<{} chars>", details.chars().count())]
    pub details: String,
    /// Present only for methods that require a bank.
    pub bank: Option<String>,
}

/// Order service reply.
///
/// Transport failures are folded into `success: false` with
/// [`SERVICE_UNAVAILABLE`] by the client, so callers deal with a single shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OrderResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn unavailable() -> Self {
        Self::rejected(SERVICE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let request = OrderRequest {
            network: Network::Tron,
            asset: Asset::Usdt,
            method: PaymentMethod::BankCard,
            amount: "50".to_string(),
            details: "1111222233334444".to_string(),
            bank: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "network": "Tron (TRC20)",
                "asset": "USDT",
                "method": "Банковская карта",
                "amount": "50",
                "details": "1111222233334444",
                "bank": null,
            })
        );
    }

    #[test]
    fn test_request_debug_masks_details() {
        let request = OrderRequest {
            network: Network::Ton,
            asset: Asset::Ton,
            method: PaymentMethod::Sbp,
            amount: "1".to_string(),
            details: "+79001234567".to_string(),
            bank: Some("ВТБ".to_string()),
        };
        let debug = format!("{request:?}");
        assert!(!debug.contains("79001234567"));
        assert!(debug.contains("<12 chars>"));
    }

    #[test]
    fn test_response_message_is_optional() {
        let resp: OrderResponse = serde_json::from_value(json!({"success": true, "id": 7})).unwrap();
        assert_eq!(resp, OrderResponse::accepted());

        let resp: OrderResponse =
            serde_json::from_value(json!({"success": false, "message": "Лимит превышен"})).unwrap();
        assert_eq!(resp, OrderResponse::rejected("Лимит превышен"));

        assert!(serde_json::from_value::<OrderResponse>(json!({"message": "oops"})).is_err());
    }
}
