use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::movie_source::RawDetail;
use crate::{MovieId, ProviderId, ValidationError};

/// Location of one provider's record for a title.
///
/// The structured pair is the canonical form; the flat `provider=id` string
/// is an interface-boundary encoding only (`Display`/`FromStr`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
    pub provider: ProviderId,
    pub movie_id: MovieId,
}

impl ProviderRef {
    pub fn new(provider: ProviderId, movie_id: MovieId) -> Self {
        Self { provider, movie_id }
    }
}

impl Display for ProviderRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.provider, self.movie_id)
    }
}

impl FromStr for ProviderRef {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some((provider, movie_id)) = value.split_once('=') else {
            return Err(ValidationError::InvalidProviderRef {
                value: value.to_owned(),
            });
        };
        Ok(Self {
            provider: provider.parse()?,
            movie_id: MovieId::new(movie_id)?,
        })
    }
}

/// One title as advertised by at least one provider.
///
/// The title string is the cross-provider merge key: matching is exact,
/// case- and whitespace-sensitive, with no normalization. The poster is the
/// first one seen; later providers offering the same title only append a
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub poster: String,
    pub references: Vec<ProviderRef>,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, poster: impl Into<String>, reference: ProviderRef) -> Self {
        Self {
            title: title.into(),
            poster: poster.into(),
            references: vec![reference],
        }
    }
}

/// One provider's priced detail record for a specific title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferDetail {
    pub provider: ProviderId,
    pub logo: String,
    pub poster: String,
    pub movie_id: MovieId,
    pub price: f64,
    /// Remaining provider-specific detail fields, passed through unmodified.
    pub extra: Map<String, Value>,
    pub cheapest: bool,
}

impl OfferDetail {
    /// Build an offer from a raw detail payload, extracting the mandatory
    /// `Poster`/`ID`/`Price` fields and keeping the rest as the pass-through
    /// bag. A payload that fails price validation is rejected here so it can
    /// be dropped rather than surfaced as a zero-priced offer.
    pub fn from_raw(
        provider: ProviderId,
        logo: impl Into<String>,
        raw: RawDetail,
    ) -> Result<Self, ValidationError> {
        let mut fields = raw.fields;
        let poster = take_text(&mut fields, "Poster")?;
        let movie_id = MovieId::new(take_text(&mut fields, "ID")?)?;
        let price_value = fields
            .remove("Price")
            .ok_or(ValidationError::MissingDetailField { field: "Price" })?;
        let price = parse_price(&price_value)?;

        Ok(Self {
            provider,
            logo: logo.into(),
            poster,
            movie_id,
            price,
            extra: fields,
            cheapest: false,
        })
    }
}

/// Per-request price comparison across providers.
///
/// Cheapest flagging uses exact equality on the parsed `f64`; ties are all
/// flagged. There is deliberately no epsilon tolerance — a known limitation
/// under currency representation, preserved until product requirements say
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub offers: Vec<OfferDetail>,
}

impl Quote {
    /// Wrap surviving offers, flagging every offer whose price equals the
    /// minimum. An empty offer list yields an empty quote, not an error.
    pub fn new(mut offers: Vec<OfferDetail>) -> Self {
        let minimum = offers
            .iter()
            .map(|offer| offer.price)
            .reduce(f64::min);

        if let Some(minimum) = minimum {
            for offer in &mut offers {
                offer.cheapest = offer.price == minimum;
            }
        }

        Self { offers }
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn cheapest_price(&self) -> Option<f64> {
        self.offers
            .iter()
            .find(|offer| offer.cheapest)
            .map(|offer| offer.price)
    }
}

/// Parse and validate an offer price from its wire representation.
///
/// Upstreams disagree on whether `Price` is a JSON number or a numeric
/// string; both are accepted. The parsed value must be finite and
/// non-negative.
pub fn parse_price(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64().ok_or_else(|| ValidationError::PriceNotNumeric {
            value: number.to_string(),
        })?,
        Value::String(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::PriceNotNumeric {
                    value: text.clone(),
                })?
        }
        other => {
            return Err(ValidationError::PriceNotNumeric {
                value: other.to_string(),
            })
        }
    };

    if !parsed.is_finite() {
        return Err(ValidationError::NonFinitePrice {
            value: value.to_string(),
        });
    }
    if parsed < 0.0 {
        return Err(ValidationError::NegativePrice {
            value: value.to_string(),
        });
    }

    Ok(parsed)
}

fn take_text(
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match fields.remove(field) {
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ValidationError::DetailFieldNotText { field }),
        None => Err(ValidationError::MissingDetailField { field }),
    }
}
