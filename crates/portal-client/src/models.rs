//! Portal Models
//!
//! Request and response payloads exchanged with the backend services.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

pub const BANK_A: &str = "BANK_A";
pub const BANK_B: &str = "BANK_B";

/// Banks the platform knows about, in display order
pub const BANKS: [&str; 2] = [BANK_A, BANK_B];

/// Transaction count per location code
pub type LocationCounts = BTreeMap<String, u64>;

/// Amount keyed by a label (category, bank, ...)
pub type Amounts = BTreeMap<String, f64>;

/// Aggregated spending profile sent to the segmentation model.
///
/// Amounts travel as decimal strings so the model service receives exactly
/// what the user typed, without float re-encoding on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerProfile {
    pub utilities: String,
    pub groceries: String,
    pub transport: String,
    pub shopping: String,
    pub dining: String,
    pub other: String,
}

/// Cluster ids, one per submitted profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<u32>,
}

impl PredictionResponse {
    /// Segment of the first submitted profile
    pub fn first_segment(&self) -> Option<u32> {
        self.predictions.first().copied()
    }
}

/// Acknowledgement returned by job-launching endpoints.
///
/// Both fields are optional: retraining answers 202 with a message, other
/// deployments answer with an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl JobAck {
    /// Server message, ignoring blank strings
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Result of a data generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    #[serde(deserialize_with = "count_from_number_or_string")]
    pub records_generated: u64,
    #[serde(default)]
    pub bank_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One row of the top-spenders ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSpender {
    pub customer_id: String,
    pub total_spent: f64,
}

/// Turn the service's `{customerId: total}` map into a ranking, biggest first.
pub fn rank_spenders(totals: Amounts) -> Vec<TopSpender> {
    let mut ranking: Vec<TopSpender> = totals
        .into_iter()
        .map(|(customer_id, total_spent)| TopSpender {
            customer_id,
            total_spent,
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.total_spent
            .total_cmp(&a.total_spent)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    ranking
}

// The generation service stringifies its counters.
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or its string form")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative count {}", v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 {
                Ok(v as u64)
            } else {
                Err(E::custom(format!("invalid count {}", v)))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid count '{}'", v)))
        }
    }

    deserializer.deserialize_any(CountVisitor)
}
