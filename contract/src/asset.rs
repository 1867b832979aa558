//! The asset record stored in world state.
//!
//! ## JSON encoding
//!
//! Every endorsing peer must produce byte-identical values for the same
//! asset, whatever language its contract is written in. Fields are
//! therefore declared in alphabetical order of their JSON names (serde
//! emits declaration order), and encoding goes through [`crate::codec`],
//! which writes `Weight` in its shortest form and escapes strings the way
//! Go's `encoding/json` does:
//!
//! ```text
//! {"AppraisedValue":300,"Color":"black","ID":"asset1","Manufacter":"Audi",
//!  "Material":"Plastic","Model":"A4","ProductionDate":"12-07-2023",
//!  "Recyclability":"low","SerialNumber":"SN123456789","Size":135,"Weight":50}
//! ```
//!
//! Decoding is lenient: missing fields and a `null` weight take their zero
//! values, and unknown fields are ignored.
//!
//! `Manufacter` is spelled as it is on the ledger; renaming it would orphan
//! every stored record.

use serde::{Deserialize, Serialize};

use crate::codec;

/// A physical asset tracked on the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    #[serde(rename = "AppraisedValue")]
    pub appraised_value: i64,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Manufacter")]
    pub manufacter: String,
    #[serde(rename = "Material")]
    pub material: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "ProductionDate")]
    pub production_date: String,
    #[serde(rename = "Recyclability")]
    pub recyclability: String,
    #[serde(rename = "SerialNumber")]
    pub serial_number: String,
    #[serde(rename = "Size")]
    pub size: i64,
    #[serde(rename = "Weight", with = "weight")]
    pub weight: f32,
}

impl Asset {
    /// Encode to the canonical JSON bytes stored under the asset's ID.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        codec::to_vec(self)
    }

    /// Decode from stored JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Rejects weights JSON cannot represent; reads `null` as zero.
mod weight {
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if !value.is_finite() {
            return Err(S::Error::custom(format!("unsupported weight value: {value}")));
        }
        serializer.serialize_f32(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// The assets written by `InitLedger`.
pub fn seed_assets() -> Vec<Asset> {
    #[allow(clippy::too_many_arguments)]
    fn asset(
        id: &str,
        manufacter: &str,
        model: &str,
        material: &str,
        color: &str,
        production_date: &str,
        serial_number: &str,
        recyclability: &str,
        size: i64,
        weight: f32,
        appraised_value: i64,
    ) -> Asset {
        Asset {
            appraised_value,
            color: color.into(),
            id: id.into(),
            manufacter: manufacter.into(),
            material: material.into(),
            model: model.into(),
            production_date: production_date.into(),
            recyclability: recyclability.into(),
            serial_number: serial_number.into(),
            size,
            weight,
        }
    }

    vec![
        asset("asset1", "Audi", "A4", "Plastic", "black", "12-07-2023", "SN123456789", "low", 135, 50.0, 300),
        asset("asset2", "BMW", "X5", "Metal", "red", "24-06-21", "SN987654321", "medium", 150, 75.5, 400),
        asset("asset3", "Tesla", "Model 3", "Aluminum", "white", "15-11-2022", "SN192837465", "high", 180, 68.7, 500),
        asset("asset4", "Ford", "Mustang", "Steel", "blue", "04-02-2024", "SN543216789", "low", 190, 80.0, 600),
        asset("asset5", "Chevrolet", "Camaro", "Carbon Fiber", "yellow", "30-09-2019", "SN987321654", "medium", 185, 78.3, 550),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_encoding() {
        let asset = &seed_assets()[0];
        let json = String::from_utf8(asset.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"AppraisedValue":300,"Color":"black","ID":"asset1","Manufacter":"Audi","Material":"Plastic","Model":"A4","ProductionDate":"12-07-2023","Recyclability":"low","SerialNumber":"SN123456789","Size":135,"Weight":50}"#
        );
    }

    #[test]
    fn test_fractional_weight_keeps_shortest_form() {
        let asset = &seed_assets()[2];
        let json = String::from_utf8(asset.to_json().unwrap()).unwrap();
        assert!(json.ends_with(r#""Weight":68.7}"#), "{json}");
    }

    #[test]
    fn test_decode_accepts_integer_and_float_weight() {
        let int_form = r#"{"AppraisedValue":1,"Color":"c","ID":"x","Manufacter":"m","Material":"mt","Model":"md","ProductionDate":"d","Recyclability":"r","SerialNumber":"s","Size":2,"Weight":50}"#;
        let float_form = int_form.replace(r#""Weight":50"#, r#""Weight":50.0"#);
        let a = Asset::from_json(int_form.as_bytes()).unwrap();
        let b = Asset::from_json(float_form.as_bytes()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.weight, 50.0);
        assert_eq!(a.id, "x");
    }

    #[test]
    fn test_decode_fills_missing_fields() {
        let json = r#"{"ID":"x","Color":"c"}"#;
        let asset = Asset::from_json(json.as_bytes()).unwrap();
        assert_eq!(asset.id, "x");
        assert_eq!(asset.color, "c");
        assert_eq!(asset.appraised_value, 0);
        assert_eq!(asset.manufacter, "");
        assert_eq!(asset.weight, 0.0);
    }

    #[test]
    fn test_decode_ignores_unknown_fields_and_null_weight() {
        let asset = Asset::from_json(br#"{"not":"an asset","Weight":null}"#).unwrap();
        assert_eq!(asset, Asset::default());
    }

    #[test]
    fn test_non_finite_weight_refused() {
        for weight in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let asset = Asset {
                weight,
                ..seed_assets()[0].clone()
            };
            let err = asset.to_json().unwrap_err();
            assert!(err.to_string().contains("unsupported weight value"), "{err}");
        }
    }

    #[test]
    fn test_encoding_escapes_html_and_shortens_weight() {
        let asset = Asset {
            color: "R&D <x>".into(),
            weight: 123_456_789.0,
            ..seed_assets()[0].clone()
        };
        let json = String::from_utf8(asset.to_json().unwrap()).unwrap();
        assert!(json.contains(r#""Color":"R\u0026D \u003cx\u003e""#), "{json}");
        assert!(json.ends_with(r#""Weight":123456790}"#), "{json}");

        let heavy = Asset {
            weight: 1e20,
            ..seed_assets()[0].clone()
        };
        let json = String::from_utf8(heavy.to_json().unwrap()).unwrap();
        assert!(json.ends_with(r#""Weight":100000000000000000000}"#), "{json}");
    }

    #[test]
    fn test_seed_assets() {
        let seeds = seed_assets();
        let ids: Vec<&str> = seeds.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["asset1", "asset2", "asset3", "asset4", "asset5"]);
        assert_eq!(seeds[1].manufacter, "BMW");
        assert_eq!(seeds[1].weight, 75.5);
        assert_eq!(seeds[4].material, "Carbon Fiber");
        assert_eq!(seeds[4].appraised_value, 550);
    }

    #[test]
    fn test_decode_roundtrip_preserves_fields() {
        for asset in seed_assets() {
            let decoded = Asset::from_json(&asset.to_json().unwrap()).unwrap();
            assert_eq!(decoded, asset);
        }
    }
}
