//! Response DTOs for quoting API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{RateTables, ServiceLevel, TransportMode};
use super::services::{QuoteSummary, RankedQuote};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// A single ranked carrier quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub carrier: String,
    pub price: MoneyResponse,
    pub eta_days: u32,
    pub co2e_kg: u64,
    pub mode: TransportMode,
    pub service_level: ServiceLevel,
    pub best: bool,
}

impl QuoteResponse {
    fn from_ranked(ranked: RankedQuote, currency: &str) -> Self {
        let quote = ranked.quote;
        Self {
            carrier: quote.carrier,
            price: MoneyResponse {
                amount: quote.price,
                currency: currency.to_string(),
            },
            eta_days: quote.eta_days,
            co2e_kg: quote.co2e_kg,
            mode: quote.mode,
            service_level: quote.service_level,
            best: ranked.best,
        }
    }
}

/// Response for a quote-and-rank request
#[derive(Debug, Serialize)]
pub struct QuoteSummaryResponse {
    pub distance_km: f64,
    pub min_co2e_kg: Option<u64>,
    pub currency: String,
    pub quotes: Vec<QuoteResponse>,
}

impl QuoteSummaryResponse {
    pub fn from_summary(summary: QuoteSummary, currency: &str) -> Self {
        Self {
            distance_km: summary.distance_km,
            min_co2e_kg: summary.min_co2e_kg,
            currency: currency.to_string(),
            quotes: summary
                .quotes
                .into_iter()
                .map(|ranked| QuoteResponse::from_ranked(ranked, currency))
                .collect(),
        }
    }
}

/// Response for lane distance estimation
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

/// Mode entry in the catalog
#[derive(Debug, Serialize)]
pub struct ModeCatalogEntry {
    pub mode: TransportMode,
    pub emission_factor_g_per_tkm: f64,
    pub speed_km_per_day: f64,
    pub rate_multiplier: f64,
    pub carriers: Vec<String>,
}

/// Service level entry in the catalog
#[derive(Debug, Serialize)]
pub struct ServiceCatalogEntry {
    pub service_level: ServiceLevel,
    pub speed_hint_days: f64,
    pub price_multiplier: f64,
}

/// Modes, rosters and service levels currently in effect
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub currency: String,
    pub min_price: MoneyResponse,
    pub modes: Vec<ModeCatalogEntry>,
    pub service_levels: Vec<ServiceCatalogEntry>,
}

impl CatalogResponse {
    pub fn from_tables(tables: &RateTables, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            min_price: MoneyResponse {
                amount: tables.min_price,
                currency: currency.to_string(),
            },
            modes: TransportMode::ALL
                .into_iter()
                .map(|mode| {
                    let profile = tables.mode(mode);
                    ModeCatalogEntry {
                        mode,
                        emission_factor_g_per_tkm: profile.emission_factor_g_per_tkm,
                        speed_km_per_day: profile.speed_km_per_day,
                        rate_multiplier: profile.rate_multiplier,
                        carriers: profile.carriers.clone(),
                    }
                })
                .collect(),
            service_levels: ServiceLevel::ALL
                .into_iter()
                .map(|level| {
                    let profile = tables.service(level);
                    ServiceCatalogEntry {
                        service_level: level,
                        speed_hint_days: profile.speed_hint_days,
                        price_multiplier: profile.price_multiplier,
                    }
                })
                .collect(),
        }
    }
}

/// Generic quoting error response
#[derive(Debug, Serialize)]
pub struct QuotingErrorResponse {
    pub error_type: String,
    pub message: String,
}
