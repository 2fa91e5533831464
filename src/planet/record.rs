//! Planet record types
//!
//! Records arrive from catalog fetches and generators whose numeric fields are
//! loosely typed: numbers, numeric strings, `null`, or garbage. Deserialization
//! accepts all of these and keeps only finite numbers; everything else becomes
//! `None` and is defaulted later by [`to_feature_vector`](super::to_feature_vector).

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Catalog confirmation status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationStatus {
    /// Confirmed planet
    #[default]
    Confirmed,
    /// Unconfirmed candidate (earns a novelty bonus when prioritizing)
    Candidate,
}

impl ConfirmationStatus {
    /// Parse a status string, case-insensitively
    ///
    /// Anything other than "candidate" is treated as confirmed.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("candidate") {
            ConfirmationStatus::Candidate
        } else {
            ConfirmationStatus::Confirmed
        }
    }

    /// Status name as displayed by the catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationStatus::Confirmed => "Confirmed",
            ConfirmationStatus::Candidate => "Candidate",
        }
    }
}

/// A planet as supplied by the catalog layer
///
/// Every physical attribute is independently optional. Units: mass in Earth
/// masses, radius in Earth radii, temperature in Kelvin, orbital period in
/// days, distance in parsecs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetRecord {
    /// Planet name
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,

    /// Host star name
    #[serde(alias = "hostStar", deserialize_with = "lenient::string")]
    pub host_star: String,

    /// Mass in Earth masses
    #[serde(deserialize_with = "lenient::number")]
    pub mass: Option<f64>,

    /// Radius in Earth radii
    #[serde(deserialize_with = "lenient::number")]
    pub radius: Option<f64>,

    /// Equilibrium temperature in Kelvin
    #[serde(deserialize_with = "lenient::number")]
    pub temperature: Option<f64>,

    /// Orbital period in days
    #[serde(alias = "orbitalPeriod", deserialize_with = "lenient::number")]
    pub orbital_period: Option<f64>,

    /// Distance from Earth in parsecs
    #[serde(deserialize_with = "lenient::number")]
    pub distance: Option<f64>,

    /// Free-form atmosphere description ("Unknown" when not characterized)
    #[serde(deserialize_with = "lenient::optional_string")]
    pub atmosphere: Option<String>,

    /// Precomputed habitability score in [0, 1]
    #[serde(alias = "habitabilityScore", deserialize_with = "lenient::number")]
    pub habitability_score: Option<f64>,

    /// Upstream detection confidence in [0, 1]
    #[serde(alias = "aiConfidence", deserialize_with = "lenient::number")]
    pub ai_confidence: Option<f64>,

    /// Number of follow-up observations already performed
    #[serde(alias = "followUpObservations", deserialize_with = "lenient::number")]
    pub follow_up_observations: Option<f64>,

    /// Confirmation status
    #[serde(alias = "confirmedStatus", deserialize_with = "lenient::status")]
    pub confirmed_status: ConfirmationStatus,

    /// Year of discovery
    #[serde(alias = "discoveryYear", deserialize_with = "lenient::year")]
    pub discovery_year: Option<i32>,

    /// Discovery method (e.g. "Transit", "Radial Velocity")
    #[serde(alias = "discoveryMethod", deserialize_with = "lenient::optional_string")]
    pub discovery_method: Option<String>,

    /// Discovering telescope or facility
    #[serde(deserialize_with = "lenient::optional_string")]
    pub telescope: Option<String>,
}

impl PlanetRecord {
    /// Create an otherwise empty record with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a record from an arbitrary JSON value
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `value` is not a JSON object.
    /// Individual malformed fields never produce an error.
    ///
    /// # Example
    ///
    /// ```
    /// use exo_insight::planet::PlanetRecord;
    ///
    /// let value = serde_json::json!({ "name": "Kepler-22 b", "mass": "n/a", "radius": "2.4" });
    /// let planet = PlanetRecord::from_json_value(&value)?;
    /// assert_eq!(planet.mass, None);
    /// assert_eq!(planet.radius, Some(2.4));
    /// # Ok::<(), exo_insight::AnalysisError>(())
    /// ```
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, AnalysisError> {
        if !value.is_object() {
            return Err(AnalysisError::InvalidInput(format!(
                "planet record must be an object, got {}",
                json_kind(value)
            )));
        }
        Self::deserialize(value).map_err(|e| AnalysisError::InvalidInput(e.to_string()))
    }

    /// Atmosphere text, or an empty string when absent
    pub fn atmosphere_text(&self) -> &str {
        self.atmosphere.as_deref().unwrap_or("")
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Field deserializers that never fail on a wrong JSON type
mod lenient {
    use super::ConfirmationStatus;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn to_number(value: &Value) -> Option<f64> {
        let n = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        n.filter(|v| v.is_finite())
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(to_number(&value))
    }

    pub fn year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(to_number(&value)
            .filter(|y| (i32::MIN as f64..=i32::MAX as f64).contains(y))
            .map(|y| y.round() as i32))
    }

    pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        optional_string(deserializer).map(Option::unwrap_or_default)
    }

    pub fn status<'de, D>(deserializer: D) -> Result<ConfirmationStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => ConfirmationStatus::parse(&s),
            _ => ConfirmationStatus::default(),
        })
    }
}
