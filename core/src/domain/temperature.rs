//! Temperature reading and unit conversion

use serde::{Deserialize, Serialize};

/// A Celsius reading with its Fahrenheit and Kelvin derivations.
///
/// Built only through [`Temperature::from_celsius`], so the three scales always
/// describe the same value. Kelvin uses the `+273` offset, not `+273.15`;
/// clients of the original services depend on that exact constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(rename = "temp_C")]
    celsius: f64,
    #[serde(rename = "temp_F")]
    fahrenheit: f64,
    #[serde(rename = "temp_K")]
    kelvin: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64, city: Option<String>) -> Self {
        let (celsius, fahrenheit, kelvin) = convert(celsius);
        Self {
            city,
            celsius,
            fahrenheit,
            kelvin,
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn celsius(&self) -> f64 {
        self.celsius
    }

    pub fn fahrenheit(&self) -> f64 {
        self.fahrenheit
    }

    pub fn kelvin(&self) -> f64 {
        self.kelvin
    }
}

/// Celsius to (C, F, K)
pub fn convert(celsius: f64) -> (f64, f64, f64) {
    (celsius, celsius * 1.8 + 32.0, celsius + 273.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point() {
        assert_eq!(convert(0.0), (0.0, 32.0, 273.0));
    }

    #[test]
    fn boiling_point() {
        assert_eq!(convert(100.0), (100.0, 212.0, 373.0));
    }

    #[test]
    fn negative_celsius() {
        let (c, f, k) = convert(-40.0);
        assert_eq!(c, -40.0);
        assert!((f - -40.0).abs() < 1e-9);
        assert_eq!(k, 233.0);
    }

    #[test]
    fn fields_are_consistent() {
        let temp = Temperature::from_celsius(21.7, Some("Salvador".to_string()));
        assert_eq!(temp.celsius(), 21.7);
        assert!((temp.fahrenheit() - (21.7 * 1.8 + 32.0)).abs() < 1e-9);
        assert!((temp.kelvin() - 294.7).abs() < 1e-9);
        assert_eq!(temp.city(), Some("Salvador"));
    }

    #[test]
    fn serializes_wire_shape() {
        let temp = Temperature::from_celsius(25.0, Some("São Paulo".to_string()));
        let json = serde_json::to_value(&temp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "city": "São Paulo",
                "temp_C": 25.0,
                "temp_F": 77.0,
                "temp_K": 298.0
            })
        );
    }

    #[test]
    fn serializes_without_city() {
        let json = serde_json::to_value(Temperature::from_celsius(0.0, None)).unwrap();
        assert!(json.get("city").is_none());
        assert_eq!(json["temp_F"], 32.0);
    }

    #[test]
    fn deserializes_relay_reply() {
        let body = r#"{"city":"Salvador","temp_C":28.5,"temp_F":83.3,"temp_K":301.5}"#;
        let temp: Temperature = serde_json::from_str(body).unwrap();
        assert_eq!(temp.city(), Some("Salvador"));
        assert_eq!(temp.celsius(), 28.5);
        assert_eq!(temp.kelvin(), 301.5);
    }
}
