//! Shaping of decoded upstream payloads into canonical rates.
//!
//! Everything here is pure: the current time is passed in by the caller, so
//! the same payload always shapes to the same output.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::RatesError;
use crate::models::{
    parse_timestamp, snippet, DirectQuote, Offer, OfficialQuote, OfficialRate, RateQuote, RateValue,
    UpstreamPayload,
};
use crate::normalize::{ensure_finite, format_two_decimals, normalize_rate};

lazy_static! {
    /// BCV home page markup holding the official rate, e.g.
    /// `<span class="tasa-oficial">36,50</span>`.
    static ref OFFICIAL_RATE_TAG: Regex =
        Regex::new(r#"<span class="tasa-oficial">\s*([\d,.]+)\s*</span>"#)
            .expect("Invalid regex pattern");
}

/// Mean price of a list of P2P offers, rendered to two decimals.
pub fn average_offer_price(offers: &[Offer]) -> Result<String, RatesError> {
    if offers.is_empty() {
        return Err(RatesError::shape("no offers returned"));
    }

    let mut sum = 0.0;
    for offer in offers {
        sum += offer.adv.price.to_f64()?;
    }
    let mean = ensure_finite(sum / offers.len() as f64, "offer average")?;

    Ok(format_two_decimals(mean))
}

/// Build a quote from the SELL and BUY P2P legs.
pub fn quote_from_offers(
    sell: &UpstreamPayload,
    buy: &UpstreamPayload,
    now: DateTime<Utc>,
) -> Result<RateQuote, RatesError> {
    Ok(RateQuote {
        sell: Some(average_offer_price(offers_of(sell)?)?),
        buy: Some(average_offer_price(offers_of(buy)?)?),
        updated: now,
    })
}

/// Pass through a quote that already exposes `sell`/`buy`/`date`.
pub fn quote_from_direct(
    payload: &UpstreamPayload,
    now: DateTime<Utc>,
) -> Result<RateQuote, RatesError> {
    let UpstreamPayload::Quote(DirectQuote { sell, buy, date }) = payload else {
        return Err(unexpected(payload, "direct quote"));
    };

    let updated = updated_or(date.as_deref(), now)?;

    match (sell, buy) {
        (Some(sell), Some(buy)) => Ok(RateQuote {
            sell: Some(side(sell)?),
            buy: Some(side(buy)?),
            updated,
        }),
        (None, None) => Ok(RateQuote::unavailable(updated)),
        (Some(_), None) => Err(RatesError::shape("quote has a sell side but no buy side")),
        (None, Some(_)) => Err(RatesError::shape("quote has a buy side but no sell side")),
    }
}

/// Extract the official rate from a JSON payload.
pub fn official_from_payload(
    payload: &UpstreamPayload,
    now: DateTime<Utc>,
) -> Result<OfficialRate, RatesError> {
    let UpstreamPayload::Official(OfficialQuote { oficial, date }) = payload else {
        return Err(unexpected(payload, "official rate"));
    };

    let rate = oficial.to_f64()?;
    OfficialRate::new(rate, updated_or(date.as_deref(), now)?)
}

/// Scrape the official rate from the BCV home page.
pub fn official_from_page(
    payload: &UpstreamPayload,
    now: DateTime<Utc>,
) -> Result<OfficialRate, RatesError> {
    let UpstreamPayload::Page(html) = payload else {
        return Err(unexpected(payload, "html page"));
    };

    let raw = OFFICIAL_RATE_TAG
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            RatesError::shape(format!(
                "official rate tag not found (received: \"{}\")",
                snippet(html)
            ))
        })?;

    OfficialRate::new(normalize_rate(raw)?, now)
}

fn offers_of(payload: &UpstreamPayload) -> Result<&[Offer], RatesError> {
    match payload {
        UpstreamPayload::Offers(page) => page
            .data
            .as_deref()
            .ok_or_else(|| RatesError::shape("offers page has no data")),
        other => Err(unexpected(other, "offers page")),
    }
}

fn side(value: &RateValue) -> Result<String, RatesError> {
    Ok(format_two_decimals(value.to_f64()?))
}

fn updated_or(date: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>, RatesError> {
    match date {
        Some(raw) => parse_timestamp(raw),
        None => Ok(now),
    }
}

fn unexpected(payload: &UpstreamPayload, expected: &str) -> RatesError {
    RatesError::shape(format!(
        "expected {}, got {}",
        expected,
        payload.schema().as_str()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayloadSchema;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 6, 13, 0, 0).unwrap()
    }

    fn decode(schema: PayloadSchema, body: &str) -> UpstreamPayload {
        UpstreamPayload::decode(schema, body).unwrap()
    }

    #[test]
    fn test_average_of_single_offer() {
        let page = decode(PayloadSchema::Offers, r#"{"data":[{"adv":{"price":"130.00"}}]}"#);
        assert_eq!(average_offer_price(offers_of(&page).unwrap()).unwrap(), "130.00");
    }

    #[test]
    fn test_average_of_many_offers() {
        let page = decode(
            PayloadSchema::Offers,
            r#"{"data":[{"adv":{"price":"130.00"}},{"adv":{"price":"131.00"}},{"adv":{"price":132.5}}]}"#,
        );
        assert_eq!(average_offer_price(offers_of(&page).unwrap()).unwrap(), "131.17");
    }

    #[test]
    fn test_empty_offers_is_shape_error() {
        assert!(matches!(
            average_offer_price(&[]),
            Err(RatesError::Shape(_))
        ));

        let sell = decode(PayloadSchema::Offers, r#"{"data":[]}"#);
        let buy = decode(PayloadSchema::Offers, r#"{"data":[{"adv":{"price":"131.00"}}]}"#);
        assert!(matches!(
            quote_from_offers(&sell, &buy, now()),
            Err(RatesError::Shape(_))
        ));
    }

    #[test]
    fn test_unparseable_offer_price_is_parse_error() {
        let page = decode(PayloadSchema::Offers, r#"{"data":[{"adv":{"price":"NaN"}}]}"#);
        assert!(matches!(
            average_offer_price(offers_of(&page).unwrap()),
            Err(RatesError::Parse(_))
        ));
    }

    #[test]
    fn test_quote_from_offers() {
        let sell = decode(PayloadSchema::Offers, r#"{"data":[{"adv":{"price":"130.00"}}]}"#);
        let buy = decode(PayloadSchema::Offers, r#"{"data":[{"adv":{"price":"128.50"}}]}"#);
        let quote = quote_from_offers(&sell, &buy, now()).unwrap();
        assert_eq!(quote.sell.as_deref(), Some("130.00"));
        assert_eq!(quote.buy.as_deref(), Some("128.50"));
        assert_eq!(quote.updated, now());
    }

    #[test]
    fn test_offers_without_data_is_shape_error() {
        let sell = decode(PayloadSchema::Offers, r#"{"data":null}"#);
        let buy = decode(PayloadSchema::Offers, r#"{"data":[{"adv":{"price":"128.50"}}]}"#);
        assert!(matches!(
            quote_from_offers(&sell, &buy, now()),
            Err(RatesError::Shape(_))
        ));
    }

    #[test]
    fn test_quote_from_direct_numbers() {
        let payload = decode(
            PayloadSchema::Quote,
            r#"{"sell":132.45,"buy":131,"variation":-0.12,"date":"2025-06-06T12:54:37.436Z"}"#,
        );
        let quote = quote_from_direct(&payload, now()).unwrap();
        assert_eq!(quote.sell.as_deref(), Some("132.45"));
        assert_eq!(quote.buy.as_deref(), Some("131.00"));
        assert_eq!(
            quote.updated,
            parse_timestamp("2025-06-06T12:54:37.436Z").unwrap()
        );
    }

    #[test]
    fn test_quote_from_direct_without_date_uses_now() {
        let payload = decode(PayloadSchema::Quote, r#"{"sell":"132,45","buy":"131,00"}"#);
        let quote = quote_from_direct(&payload, now()).unwrap();
        assert_eq!(quote.sell.as_deref(), Some("132.45"));
        assert_eq!(quote.updated, now());
    }

    #[test]
    fn test_quote_from_direct_both_sides_missing() {
        let payload = decode(PayloadSchema::Quote, r#"{"sell":null,"buy":null}"#);
        let quote = quote_from_direct(&payload, now()).unwrap();
        assert_eq!(quote, RateQuote::unavailable(now()));
    }

    #[test]
    fn test_quote_from_direct_one_side_missing_is_shape_error() {
        let payload = decode(PayloadSchema::Quote, r#"{"sell":132.45}"#);
        assert!(matches!(
            quote_from_direct(&payload, now()),
            Err(RatesError::Shape(_))
        ));
    }

    #[test]
    fn test_official_from_payload() {
        let payload = decode(
            PayloadSchema::Official,
            r#"{"oficial":174231.00,"date":"2025-06-06T12:55:00.000Z"}"#,
        );
        let rate = official_from_payload(&payload, now()).unwrap();
        assert_eq!(rate.rate, 174231.0);
        assert_eq!(rate.updated, parse_timestamp("2025-06-06T12:55:00.000Z").unwrap());
    }

    #[test]
    fn test_official_from_locale_string() {
        let payload = decode(PayloadSchema::Official, r#"{"oficial":"174.231,00"}"#);
        let rate = official_from_payload(&payload, now()).unwrap();
        assert_eq!(rate.rate, 174231.0);
        assert_eq!(rate.updated, now());
    }

    #[test]
    fn test_official_with_bad_date_is_shape_error() {
        let payload = decode(PayloadSchema::Official, r#"{"oficial":36.5,"date":"hoy"}"#);
        assert!(matches!(
            official_from_payload(&payload, now()),
            Err(RatesError::Shape(_))
        ));
    }

    #[test]
    fn test_official_from_page() {
        let html = r#"<div><strong>USD</strong><span class="tasa-oficial">36,50</span></div>"#;
        let payload = decode(PayloadSchema::Page, html);
        let rate = official_from_page(&payload, now()).unwrap();
        assert_eq!(rate.rate, 36.5);
        assert_eq!(rate.updated, now());
    }

    #[test]
    fn test_official_from_page_without_tag() {
        let payload = decode(PayloadSchema::Page, "<html>mantenimiento</html>");
        let err = official_from_page(&payload, now()).unwrap_err();
        assert!(matches!(err, RatesError::Shape(m) if m.contains("mantenimiento")));
    }

    #[test]
    fn test_wrong_variant_is_shape_error() {
        let payload = decode(PayloadSchema::Page, "<html></html>");
        assert!(matches!(
            official_from_payload(&payload, now()),
            Err(RatesError::Shape(_))
        ));
        assert!(matches!(
            quote_from_direct(&payload, now()),
            Err(RatesError::Shape(_))
        ));
    }

    #[test]
    fn test_shaping_is_deterministic() {
        let payload = decode(
            PayloadSchema::Official,
            r#"{"oficial":"174.231,00","date":"2025-06-06T12:55:00.000Z"}"#,
        );
        assert_eq!(
            official_from_payload(&payload, now()).unwrap(),
            official_from_payload(&payload, now()).unwrap()
        );
    }
}
