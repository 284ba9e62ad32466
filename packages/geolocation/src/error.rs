use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

/// Failure reported by a location provider.
///
/// The screen treats this as an opaque payload: it is serialized whole and
/// shown in a dialog, never matched on. The numeric codes follow the classic
/// geolocation API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("location request timed out")]
    Timeout,
}

impl GeoError {
    pub fn code(&self) -> u8 {
        match self {
            GeoError::PermissionDenied => 1,
            GeoError::PositionUnavailable(_) => 2,
            GeoError::Timeout => 3,
        }
    }

    /// The `{"code":…,"message":…}` record shown to the user, serialized the
    /// same way for every cause.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("null"))
    }
}

impl Serialize for GeoError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut record = serializer.serialize_struct("GeoError", 2)?;
        record.serialize_field("code", &self.code())?;
        record.serialize_field("message", &self.to_string())?;
        record.end()
    }
}
