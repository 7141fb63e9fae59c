//! Request DTOs for quoting API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{RankControls, ServiceLevel, ShipmentRequest, SortKey, TransportMode};

/// Request to quote and rank a shipment.
///
/// Missing locations or measurements are accepted and simply produce no
/// quotes.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub mode: TransportMode,
    pub service_level: ServiceLevel,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub length_cm: f64,
    #[serde(default)]
    pub width_cm: f64,
    #[serde(default)]
    pub height_cm: f64,
    /// Accepts a JSON number or a decimal string
    #[serde(default)]
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub only_lower_emission: bool,
    #[serde(default)]
    pub sort_by: SortKey,
}

impl QuoteRequest {
    /// Split into the shipment and the ranking controls
    pub fn into_parts(self) -> (ShipmentRequest, RankControls) {
        let shipment = ShipmentRequest {
            origin: self.origin,
            destination: self.destination,
            mode: self.mode,
            service_level: self.service_level,
            weight_kg: self.weight_kg,
            length_cm: self.length_cm,
            width_cm: self.width_cm,
            height_cm: self.height_cm,
        };
        let controls = RankControls {
            max_price: self.max_price,
            only_lower_emission: self.only_lower_emission,
            sort_by: self.sort_by,
        };
        (shipment, controls)
    }
}

/// Request to estimate lane distance
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_request_defaults() {
        let request: QuoteRequest =
            serde_json::from_str(r#"{"mode": "road", "service_level": "economy"}"#).unwrap();
        let (shipment, controls) = request.into_parts();

        assert!(shipment.origin.is_empty());
        assert_eq!(shipment.weight_kg, 0.0);
        assert!(!shipment.is_quotable());
        assert_eq!(controls, RankControls::default());
    }

    #[test]
    fn test_quote_request_full() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "origin": "Rotterdam, NL",
                "destination": "Shanghai, CN",
                "mode": "ocean",
                "service_level": "standard",
                "weight_kg": 1200,
                "length_cm": 200,
                "width_cm": 120,
                "height_cm": 100,
                "max_price": "2500",
                "only_lower_emission": true,
                "sort_by": "co2e"
            }"#,
        )
        .unwrap();
        let (shipment, controls) = request.into_parts();

        assert_eq!(shipment.mode, TransportMode::Ocean);
        assert_eq!(shipment.volume_m3(), 2.4);
        assert_eq!(controls.max_price, Some(dec!(2500)));
        assert!(controls.only_lower_emission);
        assert_eq!(controls.sort_by, SortKey::Co2e);
    }

    #[test]
    fn test_quote_request_numeric_max_price() {
        let parse = |max_price: &str| {
            let json = format!(
                r#"{{"mode": "air", "service_level": "express", "max_price": {max_price}}}"#
            );
            let request: QuoteRequest = serde_json::from_str(&json).unwrap();
            request.into_parts().1.max_price
        };

        assert_eq!(parse("400"), Some(dec!(400)));
        assert_eq!(parse("399.5"), Some(dec!(399.5)));
        assert_eq!(parse(r#""400""#), Some(dec!(400)));
        assert_eq!(parse("null"), None);
    }

    #[test]
    fn test_quote_request_rejects_unknown_mode() {
        let result: Result<QuoteRequest, _> =
            serde_json::from_str(r#"{"mode": "rail", "service_level": "standard"}"#);
        assert!(result.is_err());
    }
}
