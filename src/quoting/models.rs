//! Domain models for freight quoting.
//!
//! Shipment input, per-carrier quote output, and the rate tables that
//! parameterize the estimators. Rate tables are ordinary values handed to the
//! engine so alternate rosters and pricing can be substituted.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Price floor used when a rate table document does not set one
pub const DEFAULT_MIN_PRICE: Decimal = dec!(25);

fn default_min_price() -> Decimal {
    DEFAULT_MIN_PRICE
}

/// Transport mode of a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Air,
    Ocean,
    Road,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Air, TransportMode::Ocean, TransportMode::Road];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Air => "air",
            TransportMode::Ocean => "ocean",
            TransportMode::Road => "road",
        }
    }
}

/// Service level requested for a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevel {
    Economy,
    Standard,
    Express,
}

impl ServiceLevel {
    pub const ALL: [ServiceLevel; 3] = [
        ServiceLevel::Economy,
        ServiceLevel::Standard,
        ServiceLevel::Express,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceLevel::Economy => "economy",
            ServiceLevel::Standard => "standard",
            ServiceLevel::Express => "express",
        }
    }
}

/// Key used to order ranked quotes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Price,
    EtaDays,
    Co2e,
}

/// A shipment to be quoted
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRequest {
    pub origin: String,
    pub destination: String,
    pub mode: TransportMode,
    pub service_level: ServiceLevel,
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl ShipmentRequest {
    /// Volume in cubic meters
    pub fn volume_m3(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm / 1_000_000.0
    }

    /// Whether the shipment carries enough information to be quoted.
    ///
    /// Both locations must be non-empty and weight and every dimension
    /// strictly positive. NaN fails every comparison and is rejected too.
    pub fn is_quotable(&self) -> bool {
        !self.origin.is_empty()
            && !self.destination.is_empty()
            && self.weight_kg > 0.0
            && self.length_cm > 0.0
            && self.width_cm > 0.0
            && self.height_cm > 0.0
    }
}

/// A single carrier's estimate for a shipment
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub carrier: String,
    pub price: Decimal,
    pub eta_days: u32,
    pub co2e_kg: u64,
    pub mode: TransportMode,
    pub service_level: ServiceLevel,
}

/// User-selected constraints applied to a quote set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankControls {
    /// Upper bound on price, inclusive. `None` keeps every quote.
    pub max_price: Option<Decimal>,
    pub only_lower_emission: bool,
    pub sort_by: SortKey,
}

/// Per-mode constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    /// Grams CO2e per tonne-kilometer
    pub emission_factor_g_per_tkm: f64,
    /// Average distance covered per day, used as the transit divisor
    pub speed_km_per_day: f64,
    /// Mode adjustment applied to the base rate
    pub rate_multiplier: f64,
    /// Carrier roster in display order
    pub carriers: Vec<String>,
}

/// Per-service-level constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProfile {
    /// Nominal transit time advertised for the level
    pub speed_hint_days: f64,
    pub price_multiplier: f64,
}

/// Coefficients of the lane distance stand-in heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceHeuristic {
    pub base_km: f64,
    /// Added per unit of difference in location name length
    pub per_length_char_km: f64,
    /// Added per unit of difference between the first characters' code points
    pub per_code_point_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeTable {
    pub air: ModeProfile,
    pub ocean: ModeProfile,
    pub road: ModeProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTable {
    pub economy: ServiceProfile,
    pub standard: ServiceProfile,
    pub express: ServiceProfile,
}

/// Static configuration consumed by the quoting engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTables {
    pub modes: ModeTable,
    pub services: ServiceTable,
    pub distance: DistanceHeuristic,
    /// Lowest price ever quoted, in display currency units
    #[serde(default = "default_min_price")]
    pub min_price: Decimal,
}

impl RateTables {
    pub fn mode(&self, mode: TransportMode) -> &ModeProfile {
        match mode {
            TransportMode::Air => &self.modes.air,
            TransportMode::Ocean => &self.modes.ocean,
            TransportMode::Road => &self.modes.road,
        }
    }

    pub fn service(&self, level: ServiceLevel) -> &ServiceProfile {
        match level {
            ServiceLevel::Economy => &self.services.economy,
            ServiceLevel::Standard => &self.services.standard,
            ServiceLevel::Express => &self.services.express,
        }
    }

    /// Parse and validate a JSON rate table document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tables: RateTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Check that every divisor and multiplier is usable.
    ///
    /// Speeds, multipliers and speed hints must be finite and strictly
    /// positive. Emission factors, heuristic coefficients and the price
    /// floor must be non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in TransportMode::ALL {
            let profile = self.mode(mode);
            let name = mode.as_str();
            require_positive(format!("modes.{name}.speed_km_per_day"), profile.speed_km_per_day)?;
            require_positive(format!("modes.{name}.rate_multiplier"), profile.rate_multiplier)?;
            require_non_negative(
                format!("modes.{name}.emission_factor_g_per_tkm"),
                profile.emission_factor_g_per_tkm,
            )?;
        }

        for level in ServiceLevel::ALL {
            let profile = self.service(level);
            let name = level.as_str();
            require_positive(format!("services.{name}.speed_hint_days"), profile.speed_hint_days)?;
            require_positive(format!("services.{name}.price_multiplier"), profile.price_multiplier)?;
        }

        require_non_negative("distance.base_km".to_string(), self.distance.base_km)?;
        require_non_negative(
            "distance.per_length_char_km".to_string(),
            self.distance.per_length_char_km,
        )?;
        require_non_negative(
            "distance.per_code_point_km".to_string(),
            self.distance.per_code_point_km,
        )?;

        if self.min_price < Decimal::ZERO {
            return Err(ConfigError::Invalid {
                field: "min_price".to_string(),
                reason: "must be a non-negative amount",
            });
        }

        Ok(())
    }
}

fn require_positive(field: String, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a finite number greater than zero",
        })
    }
}

fn require_non_negative(field: String, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a finite, non-negative number",
        })
    }
}

fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for RateTables {
    fn default() -> Self {
        Self {
            modes: ModeTable {
                air: ModeProfile {
                    emission_factor_g_per_tkm: 602.0,
                    speed_km_per_day: 900.0,
                    rate_multiplier: 2.2,
                    carriers: roster(&["SkyBridge Air", "AeroFreight", "JetStream Cargo"]),
                },
                ocean: ModeProfile {
                    emission_factor_g_per_tkm: 16.0,
                    speed_km_per_day: 350.0,
                    rate_multiplier: 0.6,
                    carriers: roster(&["BlueWave Lines", "Meridian Maritime", "Harbor Link"]),
                },
                road: ModeProfile {
                    emission_factor_g_per_tkm: 62.0,
                    speed_km_per_day: 550.0,
                    rate_multiplier: 1.0,
                    carriers: roster(&["Interstate Haulers", "RoadRunner Freight", "TransCon Logistics"]),
                },
            },
            services: ServiceTable {
                economy: ServiceProfile {
                    speed_hint_days: 7.0,
                    price_multiplier: 0.85,
                },
                standard: ServiceProfile {
                    speed_hint_days: 4.0,
                    price_multiplier: 1.0,
                },
                express: ServiceProfile {
                    speed_hint_days: 2.0,
                    price_multiplier: 1.35,
                },
            },
            distance: DistanceHeuristic {
                base_km: 500.0,
                per_length_char_km: 180.0,
                per_code_point_km: 22.0,
            },
            min_price: DEFAULT_MIN_PRICE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment() -> ShipmentRequest {
        ShipmentRequest {
            origin: "Seattle, WA".to_string(),
            destination: "Taipei, TW".to_string(),
            mode: TransportMode::Air,
            service_level: ServiceLevel::Standard,
            weight_kg: 100.0,
            length_cm: 120.0,
            width_cm: 80.0,
            height_cm: 60.0,
        }
    }

    #[test]
    fn test_volume_in_cubic_meters() {
        assert!((shipment().volume_m3() - 0.576).abs() < 1e-12);
    }

    #[test]
    fn test_is_quotable_requires_locations() {
        let mut s = shipment();
        assert!(s.is_quotable());
        s.origin.clear();
        assert!(!s.is_quotable());

        let mut s = shipment();
        s.destination.clear();
        assert!(!s.is_quotable());
    }

    #[test]
    fn test_is_quotable_requires_positive_measurements() {
        let mut s = shipment();
        s.weight_kg = 0.0;
        assert!(!s.is_quotable());

        let mut s = shipment();
        s.height_cm = -1.0;
        assert!(!s.is_quotable());

        let mut s = shipment();
        s.width_cm = f64::NAN;
        assert!(!s.is_quotable());
    }

    #[test]
    fn test_default_tables_are_valid() {
        assert!(RateTables::default().validate().is_ok());
    }

    #[test]
    fn test_mode_ordering_of_defaults() {
        let tables = RateTables::default();
        let air = tables.mode(TransportMode::Air);
        let road = tables.mode(TransportMode::Road);
        let ocean = tables.mode(TransportMode::Ocean);

        assert!(air.rate_multiplier > road.rate_multiplier);
        assert!(road.rate_multiplier > ocean.rate_multiplier);
        assert!(air.speed_km_per_day > road.speed_km_per_day);
        assert!(road.speed_km_per_day > ocean.speed_km_per_day);
    }

    #[test]
    fn test_validate_rejects_zero_speed() {
        let mut tables = RateTables::default();
        tables.modes.ocean.speed_km_per_day = 0.0;

        match tables.validate() {
            Err(ConfigError::Invalid { field, .. }) => {
                assert_eq!(field, "modes.ocean.speed_km_per_day");
            }
            other => panic!("expected invalid field, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_multiplier() {
        let mut tables = RateTables::default();
        tables.services.express.price_multiplier = -1.0;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_heuristic() {
        let mut tables = RateTables::default();
        tables.distance.base_km = f64::INFINITY;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_tables_json_round_trip() {
        let json = serde_json::to_string(&RateTables::default()).unwrap();
        let parsed = RateTables::from_json_str(&json).unwrap();
        assert_eq!(parsed, RateTables::default());
    }

    #[test]
    fn test_min_price_defaults_when_absent() {
        let mut json = serde_json::to_value(RateTables::default()).unwrap();
        json.as_object_mut().unwrap().remove("min_price");

        let parsed = RateTables::from_json_str(&json.to_string()).unwrap();
        assert_eq!(parsed.min_price, DEFAULT_MIN_PRICE);
    }

    #[test]
    fn test_min_price_read_from_document() {
        let mut json = serde_json::to_value(RateTables::default()).unwrap();
        json["min_price"] = serde_json::json!(40);

        let parsed = RateTables::from_json_str(&json.to_string()).unwrap();
        assert_eq!(parsed.min_price, dec!(40));
    }

    #[test]
    fn test_validate_rejects_negative_min_price() {
        let mut tables = RateTables::default();
        tables.min_price = dec!(-1);

        match tables.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "min_price"),
            other => panic!("expected invalid field, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_str_rejects_malformed() {
        assert!(matches!(
            RateTables::from_json_str("{\"modes\": 3}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_enums_use_snake_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&TransportMode::Ocean).unwrap(), "\"ocean\"");
        assert_eq!(serde_json::to_string(&SortKey::EtaDays).unwrap(), "\"eta_days\"");
        let level: ServiceLevel = serde_json::from_str("\"express\"").unwrap();
        assert_eq!(level, ServiceLevel::Express);
    }
}
