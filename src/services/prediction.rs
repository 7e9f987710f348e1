//! Deterministic mock predictions.
//!
//! A [`WeatherSnapshot`] is rendered into a canonical string and hashed with
//! SHA-256. The first byte of the digest selects one of eight disaster
//! buckets that together cover every byte value exactly once.

use crate::models::{DisasterPrediction, RiskLevel, WeatherSnapshot};
use sha2::{Digest, Sha256};
use std::{fmt, ops::Range};
use thiserror::Error;

/// Lowercase hex SHA-256 digest of a snapshot's canonical string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionKey(String);

impl PredictionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First digest byte, the value used for bucketing
    pub fn first_byte(&self) -> Option<u8> {
        leading_byte(&self.0)
    }
}

impl fmt::Display for PredictionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the snapshot as `temp_humidity_wind_pressure_clouds_description`.
///
/// Each reading renders as the provider typed it: `20` for an integer,
/// `20.0` for a whole decimal.
pub fn canonical_string(snapshot: &WeatherSnapshot) -> String {
    format!(
        "{}_{}_{}_{}_{}_{}",
        snapshot.temperature,
        snapshot.humidity,
        snapshot.wind_speed,
        snapshot.pressure,
        snapshot.cloud_coverage,
        snapshot.description
    )
}

/// Derive the prediction key for a snapshot. Pure: equal snapshots always
/// produce equal keys.
pub fn derive_key(snapshot: &WeatherSnapshot) -> PredictionKey {
    let digest = Sha256::digest(canonical_string(snapshot).as_bytes());
    PredictionKey(hex::encode(digest))
}

/// Parse the leading two hex characters of a digest.
fn leading_byte(digest_hex: &str) -> Option<u8> {
    let prefix = digest_hex.get(..2).unwrap_or(digest_hex);
    if prefix.is_empty() {
        return None;
    }
    u8::from_str_radix(prefix, 16).ok()
}

/// Problems found while validating a bucket table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("bucket table is empty")]
    Empty,

    #[error("bucket {start}..{end} is empty")]
    EmptyBucket { start: u16, end: u16 },

    #[error("byte values {start}..{end} are not covered by any bucket")]
    Gap { start: u16, end: u16 },

    #[error("bucket starting at {start} overlaps the previous bucket ending at {previous_end}")]
    Overlap { start: u16, previous_end: u16 },

    #[error("buckets end at {end}, expected 256")]
    Incomplete { end: u16 },
}

/// A half-open range of digest byte values bound to one prediction
#[derive(Debug, Clone, PartialEq)]
pub struct DisasterBucket {
    pub range: Range<u16>,
    pub prediction: DisasterPrediction,
}

impl DisasterBucket {
    pub fn new(range: Range<u16>, prediction: DisasterPrediction) -> Self {
        Self { range, prediction }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.range.contains(&u16::from(byte))
    }
}

/// Read-only mapping from digest bytes to predictions.
///
/// Construction checks that the buckets are ordered and partition `0..256`
/// with no gap or overlap, so every byte resolves to exactly one bucket.
#[derive(Debug, Clone)]
pub struct DisasterBucketTable {
    buckets: Vec<DisasterBucket>,
    fallback: DisasterPrediction,
}

impl DisasterBucketTable {
    pub fn new(buckets: Vec<DisasterBucket>) -> Result<Self, TableError> {
        if buckets.is_empty() {
            return Err(TableError::Empty);
        }

        let mut next: u16 = 0;
        for bucket in &buckets {
            let (start, end) = (bucket.range.start, bucket.range.end);
            if start > next {
                return Err(TableError::Gap { start: next, end: start });
            }
            if start < next {
                return Err(TableError::Overlap {
                    start,
                    previous_end: next,
                });
            }
            if end <= start {
                return Err(TableError::EmptyBucket { start, end });
            }
            next = end;
        }

        if next != 256 {
            return Err(TableError::Incomplete { end: next });
        }

        Ok(Self {
            buckets,
            fallback: DisasterPrediction::no_match(),
        })
    }

    /// The eight-bucket table served by the API
    pub fn standard() -> Result<Self, TableError> {
        Self::new(vec![
            DisasterBucket::new(
                0..32,
                DisasterPrediction::new(
                    "Flood",
                    0.87,
                    RiskLevel::High,
                    "Evacuate low areas immediately. Secure valuables on higher ground.",
                ),
            ),
            DisasterBucket::new(
                32..64,
                DisasterPrediction::new(
                    "Storm",
                    0.75,
                    RiskLevel::Medium,
                    "Stay indoors and away from windows. Secure loose outdoor items.",
                ),
            ),
            DisasterBucket::new(
                64..96,
                DisasterPrediction::new(
                    "Drought",
                    0.65,
                    RiskLevel::Medium,
                    "Conserve water. Implement water-saving measures. Monitor local advisories.",
                ),
            ),
            DisasterBucket::new(
                96..128,
                DisasterPrediction::new(
                    "Earthquake",
                    0.45,
                    RiskLevel::Low,
                    "Monitor seismic activity reports. Ensure emergency kits are prepared.",
                ),
            ),
            DisasterBucket::new(
                128..160,
                DisasterPrediction::new(
                    "Wildfire",
                    0.72,
                    RiskLevel::Medium,
                    "Clear dry vegetation around property. Stay updated on evacuation notices.",
                ),
            ),
            DisasterBucket::new(
                160..192,
                DisasterPrediction::new(
                    "Tornado",
                    0.60,
                    RiskLevel::Medium,
                    "Identify safe shelter locations. Keep emergency radio accessible.",
                ),
            ),
            DisasterBucket::new(
                192..224,
                DisasterPrediction::new(
                    "Heatwave",
                    0.80,
                    RiskLevel::High,
                    "Stay hydrated. Limit outdoor activities. Check on vulnerable individuals.",
                ),
            ),
            DisasterBucket::new(
                224..256,
                DisasterPrediction::new(
                    "None",
                    0.01,
                    RiskLevel::Low,
                    "No immediate action required. Continue normal activities.",
                ),
            ),
        ])
    }

    pub fn buckets(&self) -> &[DisasterBucket] {
        &self.buckets
    }

    /// Prediction for a single byte value. Buckets are checked in order.
    pub fn lookup(&self, byte: u8) -> DisasterPrediction {
        self.buckets
            .iter()
            .find(|bucket| bucket.contains(byte))
            .map(|bucket| bucket.prediction.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Prediction for a hex digest, keyed on its first byte.
    ///
    /// An empty digest, or one whose prefix is not hex, yields the
    /// "insufficient data" prediction.
    pub fn bucket(&self, digest_hex: &str) -> DisasterPrediction {
        match leading_byte(digest_hex) {
            Some(byte) => self.lookup(byte),
            None => DisasterPrediction::insufficient_data(),
        }
    }
}
