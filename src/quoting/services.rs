//! Quote generation and ranking.
//!
//! Orchestrates the estimators once per carrier and applies the filter/sort
//! pipeline. Everything is recomputed from scratch on each call.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::calculators::{
    estimate_base_rate, estimate_co2e_kg, estimate_transit_days, DistanceEstimator,
};
use super::models::{Quote, RankControls, RateTables, ShipmentRequest, SortKey};

/// Emissions band kept by the lower-emission filter, relative to the cleanest quote
pub const LOWER_EMISSION_BAND: Decimal = dec!(1.2);

/// Per-carrier price step applied down the roster
const CARRIER_PRICE_STEP: f64 = 0.05;

/// Per-carrier emissions step applied down the roster
const CARRIER_CO2E_STEP: f64 = 0.03;

/// A ranked quote with its best-price designation
#[derive(Debug, Clone, PartialEq)]
pub struct RankedQuote {
    pub quote: Quote,
    pub best: bool,
}

/// Result of a full quote-and-rank pass
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSummary {
    pub distance_km: f64,
    /// Lowest CO2e across the unfiltered quote set
    pub min_co2e_kg: Option<u64>,
    pub quotes: Vec<RankedQuote>,
}

/// Generate one quote per carrier in the shipment mode's roster.
///
/// Uses the heuristic distance from `tables`.
pub fn generate_quotes(tables: &RateTables, shipment: &ShipmentRequest) -> Vec<Quote> {
    generate_quotes_with(tables, &tables.distance, shipment)
}

/// Generate quotes using a caller-supplied distance source.
///
/// Returns an empty list when the shipment is not quotable yet; the
/// distance source is not consulted in that case.
pub fn generate_quotes_with<D>(
    tables: &RateTables,
    distance: &D,
    shipment: &ShipmentRequest,
) -> Vec<Quote>
where
    D: DistanceEstimator + ?Sized,
{
    let distance_km = if shipment.is_quotable() {
        distance.estimate_km(&shipment.origin, &shipment.destination)
    } else {
        0.0
    };
    quotes_for_lane(tables, shipment, distance_km)
}

/// Build the per-carrier quotes for an already estimated lane distance.
///
/// The i-th carrier's price multiplier is scaled by `1 + 0.05i`, its ETA is
/// pushed back `i` days and its emissions scaled by `1 + 0.03i`.
fn quotes_for_lane(tables: &RateTables, shipment: &ShipmentRequest, distance_km: f64) -> Vec<Quote> {
    if !shipment.is_quotable() {
        debug!(
            mode = shipment.mode.as_str(),
            "Shipment incomplete, no quotes generated"
        );
        return Vec::new();
    }

    let mode = tables.mode(shipment.mode);
    let service = tables.service(shipment.service_level);
    let volume_m3 = shipment.volume_m3();

    let base_eta = estimate_transit_days(distance_km, mode, service.speed_hint_days);
    let base_co2e = estimate_co2e_kg(mode, distance_km, shipment.weight_kg);

    let quotes: Vec<Quote> = mode
        .carriers
        .iter()
        .enumerate()
        .map(|(index, carrier)| {
            let step = index as f64;
            let multiplier = service.price_multiplier * (1.0 + step * CARRIER_PRICE_STEP);
            let co2e = base_co2e as f64 * (1.0 + step * CARRIER_CO2E_STEP);

            Quote {
                carrier: carrier.clone(),
                price: estimate_base_rate(
                    shipment.weight_kg,
                    volume_m3,
                    distance_km,
                    multiplier,
                    mode,
                    tables.min_price,
                ),
                eta_days: base_eta.saturating_add(index as u32),
                co2e_kg: co2e.round() as u64,
                mode: shipment.mode,
                service_level: shipment.service_level,
            }
        })
        .collect();

    debug!(
        mode = shipment.mode.as_str(),
        service_level = shipment.service_level.as_str(),
        distance_km,
        count = quotes.len(),
        "Generated quotes"
    );

    quotes
}

/// Emissions ceiling for the lower-emission filter, `None` for an empty set
pub fn lower_emission_threshold(quotes: &[Quote]) -> Option<Decimal> {
    quotes
        .iter()
        .map(|quote| quote.co2e_kg)
        .min()
        .map(|min| Decimal::from(min) * LOWER_EMISSION_BAND)
}

/// Filter and order a quote set.
///
/// 1. Drop quotes priced above `max_price`.
/// 2. With `only_lower_emission`, keep quotes within 20% of the cleanest
///    quote that survived step 1.
/// 3. Stable sort by the selected key, so ties keep roster order.
pub fn rank(quotes: Vec<Quote>, controls: &RankControls) -> Vec<Quote> {
    let mut ranked: Vec<Quote> = quotes
        .into_iter()
        .filter(|quote| controls.max_price.map_or(true, |max| quote.price <= max))
        .collect();

    // Threshold comes from the price-filtered set, not the full roster
    if controls.only_lower_emission {
        if let Some(threshold) = lower_emission_threshold(&ranked) {
            ranked.retain(|quote| Decimal::from(quote.co2e_kg) <= threshold);
        }
    }

    match controls.sort_by {
        SortKey::Price => ranked.sort_by_key(|quote| quote.price),
        SortKey::EtaDays => ranked.sort_by_key(|quote| quote.eta_days),
        SortKey::Co2e => ranked.sort_by_key(|quote| quote.co2e_kg),
    }

    ranked
}

/// Lowest price in a quote set
pub fn best_price(quotes: &[Quote]) -> Option<Decimal> {
    quotes.iter().map(|quote| quote.price).min()
}

/// Flag every quote sharing the lowest price as best
pub fn mark_best(quotes: Vec<Quote>) -> Vec<RankedQuote> {
    let best = best_price(&quotes);
    quotes
        .into_iter()
        .map(|quote| RankedQuote {
            best: Some(quote.price) == best,
            quote,
        })
        .collect()
}

/// Run the whole pipeline: generate, rank, mark best and summarize.
pub fn quote_shipment(
    tables: &RateTables,
    shipment: &ShipmentRequest,
    controls: &RankControls,
) -> QuoteSummary {
    quote_shipment_with(tables, &tables.distance, shipment, controls)
}

/// [`quote_shipment`] with a caller-supplied distance source
pub fn quote_shipment_with<D>(
    tables: &RateTables,
    distance: &D,
    shipment: &ShipmentRequest,
    controls: &RankControls,
) -> QuoteSummary
where
    D: DistanceEstimator + ?Sized,
{
    // Reported even when the shipment cannot be quoted yet
    let distance_km = distance.estimate_km(&shipment.origin, &shipment.destination);
    let quotes = quotes_for_lane(tables, shipment, distance_km);
    let min_co2e_kg = quotes.iter().map(|quote| quote.co2e_kg).min();
    let generated = quotes.len();

    let ranked = rank(quotes, controls);

    debug!(
        generated,
        kept = ranked.len(),
        sort_by = ?controls.sort_by,
        only_lower_emission = controls.only_lower_emission,
        "Ranked quotes"
    );

    QuoteSummary {
        distance_km,
        min_co2e_kg,
        quotes: mark_best(ranked),
    }
}
