//! Test fixtures

use crate::domain::Coordinates;

/// Credential handed to stub geocoders
pub const TEST_TOKEN: &str = "test-token";

/// Coordinates for a known CEP in São Paulo
pub fn sao_paulo() -> Coordinates {
    Coordinates::new("-23.5505", "-46.6333", Some("São Paulo".to_string()))
}
