//! Pipeline tests over the public API: provider payload to prediction,
//! without HTTP.

use disaster_prediction_api::{DisasterBucketTable, RiskLevel, derive_key, normalize};
use serde_json::json;

#[test]
fn test_payload_to_prediction_pipeline() {
    let payload = json!({
        "weather": [{"description": "broken clouds"}],
        "main": {"temp": 17.96, "humidity": 59, "pressure": 1012},
        "wind": {"speed": 4.1},
        "clouds": {"all": 75}
    });

    let snapshot = normalize(&payload).expect("payload should normalize");
    let key = derive_key(&snapshot);
    assert_eq!(
        key.as_str(),
        "964d4e12384a10af1a93ba76b43f61ea65fcf1001fae948820b4a7ee7ed5f3d4"
    );

    let table = DisasterBucketTable::standard().unwrap();
    let prediction = table.bucket(key.as_str());
    assert_eq!(prediction.disaster_type, "Wildfire");
    assert_eq!(prediction.confidence_score, 0.72);
    assert_eq!(prediction.risk_level, RiskLevel::Medium);
}

#[test]
fn test_every_byte_resolves_to_exactly_one_bucket() {
    let table = DisasterBucketTable::standard().unwrap();

    for byte in 0..=u8::MAX {
        let matches = table
            .buckets()
            .iter()
            .filter(|bucket| bucket.contains(byte))
            .count();
        assert_eq!(matches, 1, "byte {byte} matched {matches} buckets");
    }
}

#[test]
fn test_bucket_never_fails_on_hex_prefixes() {
    let table = DisasterBucketTable::standard().unwrap();
    let labels = [
        "Flood",
        "Storm",
        "Drought",
        "Earthquake",
        "Wildfire",
        "Tornado",
        "Heatwave",
        "None",
    ];

    for byte in 0..=u8::MAX {
        let digest = format!("{byte:02x}{}", "0".repeat(62));
        let prediction = table.bucket(&digest);
        assert!(
            labels.contains(&prediction.disaster_type.as_str()),
            "unexpected label {} for byte {byte}",
            prediction.disaster_type
        );
        assert!((0.0..=1.0).contains(&prediction.confidence_score));
    }
}

#[test]
fn test_weather_change_changes_key() {
    let payload = |description: &str| {
        json!({
            "weather": [{"description": description}],
            "main": {"temp": 20.0, "humidity": 50, "pressure": 1000},
            "wind": {"speed": 2.0},
            "clouds": {"all": 10}
        })
    };

    let clear = derive_key(&normalize(&payload("clear sky")).unwrap());
    let rain = derive_key(&normalize(&payload("light rain")).unwrap());
    let clear_again = derive_key(&normalize(&payload("clear sky")).unwrap());

    assert_ne!(clear, rain);
    assert_eq!(clear, clear_again);
}
