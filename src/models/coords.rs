use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (latitude, longitude) pair.
///
/// Persisted as a two-element array `[lat, lng]`, so a stored record can
/// never carry anything but exactly two components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse "LAT,LNG" as typed on the command line.
    pub fn parse(s: &str) -> AppResult<Self> {
        let (lat_raw, lng_raw) = s
            .split_once(',')
            .ok_or_else(|| AppError::InvalidCoords(s.to_string()))?;

        let lat: f64 = lat_raw
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoords(s.to_string()))?;
        let lng: f64 = lng_raw
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoords(s.to_string()))?;

        Self::checked(lat, lng).ok_or_else(|| AppError::InvalidCoords(s.to_string()))
    }

    /// Build coordinates only if both components are inside WGS84 bounds.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        (lat_ok && lng_ok).then_some(Self { lat, lng })
    }

    /// OpenStreetMap link centered on this point.
    pub fn osm_url(&self, zoom: u8) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map={zoom}/{lat}/{lng}",
            lat = self.lat,
            lng = self.lng,
            zoom = zoom
        )
    }
}

impl From<[f64; 2]> for Coords {
    fn from(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[0],
            lng: pair[1],
        }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}
