//! The formatted response shape.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::Recommendation;

/// A formatted-mode response. Failures are carried in the value, never raised.
#[derive(Debug, Clone)]
pub struct Response {
    /// Ranked recommendations, empty on failure.
    pub recommendations: Vec<Recommendation>,
    /// Failure message.
    pub error: Option<String>,
}

impl Response {
    /// A successful response.
    pub fn success(recommendations: Vec<Recommendation>) -> Self {
        Self {
            recommendations,
            error: None,
        }
    }

    /// A failed response with no recommendations.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            recommendations: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Returns true if the request succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("success", &self.is_success())?;
        if let Some(error) = &self.error {
            map.serialize_entry("error", error)?;
        }
        let formatted: Vec<_> = self.recommendations.iter().map(Formatted).collect();
        map.serialize_entry("recommendations", &formatted)?;
        map.end()
    }
}

/// One recommendation in the formatted shape.
struct Formatted<'a>(&'a Recommendation);

impl Serialize for Formatted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rec = self.0;
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("match_score", &rec.score)?;
        map.serialize_entry(rec.kind.posting_key(), &rec.posting)?;
        map.serialize_entry(rec.kind.explanation_key(), &rec.explanation)?;
        map.end()
    }
}
