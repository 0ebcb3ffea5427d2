//! Data models for upstream payloads and canonical rate shapes.

mod payload;
mod rate;
mod timestamp;
mod value;

pub use payload::{
    AdvDetail, DirectQuote, Offer, OffersPage, OfficialQuote, PayloadSchema, UpstreamPayload,
};
pub(crate) use payload::snippet;
pub use rate::{FallbackRate, OfficialRate, RateQuote};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use value::RateValue;
