use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A vaccine type offered by a vaccination center
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vaccine {
    /// Human-readable display name of the vaccine
    #[serde(rename = "ID")]
    pub id: String,

    /// Opaque identifier used by the upstream API
    #[serde(rename = "Slug")]
    pub slug: String,
}

/// A vaccination center as delivered by the directory endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VaccinationCenter {
    /// Display name of the center
    #[serde(rename = "Zentrumsname")]
    pub name: String,

    /// Postal code of the center
    #[serde(rename = "PLZ")]
    pub zip: String,

    /// City the center is located in
    #[serde(rename = "Ort")]
    pub city: String,

    /// Federal state the center is located in
    #[serde(rename = "BundeslandRealName")]
    pub state: String,

    /// Booking page for appointments at this center
    #[serde(rename = "BookingURL")]
    pub booking_url: String,

    /// Street address of the center
    #[serde(rename = "Adress")]
    pub address: String,

    /// Opaque identifier of the center, unique within a directory fetch
    #[serde(rename = "Slug")]
    pub slug: String,

    /// Vaccines offered by this center
    #[serde(rename = "Vaccines")]
    pub vaccines: Vec<Vaccine>,
}

impl VaccinationCenter {
    /// Display name of the first vaccine in this center whose slug matches
    pub fn vaccine_name_by_slug(&self, slug: &str) -> Option<&str> {
        self.vaccines
            .iter()
            .find(|vaccine| vaccine.slug == slug)
            .map(|vaccine| vaccine.id.as_str())
    }
}

/// A single vaccine-slug status snapshot from the availability endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VaccineAvailability {
    /// Whether a slot can currently be booked
    #[serde(rename = "Available")]
    pub available: bool,

    /// Whether booking is disabled for this vaccine
    #[serde(rename = "NoBooking")]
    pub no_booking: bool,

    /// Vaccine slug this record refers to
    #[serde(rename = "Slug")]
    pub slug: String,

    /// Epoch seconds of the last status change
    #[serde(rename = "Time")]
    pub time: i64,

    /// Whether the status is indeterminate
    #[serde(rename = "Unknown")]
    pub unknown: bool,

    /// Whether a waiting room is active instead of direct booking
    #[serde(rename = "WaitingRoom")]
    pub waiting_room: bool,

    /// Display name resolved from the slug; empty until reconciliation
    #[serde(skip)]
    pub friendly_name: String,

    /// Center offering this vaccine; `None` until reconciliation or when
    /// the slug matches no known center
    #[serde(skip)]
    pub center: Option<VaccinationCenter>,
}

impl VaccineAvailability {
    /// Timestamp of the last status change, if the upstream reported one
    pub fn last_change(&self) -> Option<DateTime<Utc>> {
        if self.time > 0 {
            DateTime::from_timestamp(self.time, 0)
        } else {
            None
        }
    }
}

/// Custom error type for scan operations
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// API error
    #[error("API error: {0}")]
    ApiError(String),

    /// Rate limited by the upstream API
    #[error("Rate limited by upstream API")]
    RateLimited,

    /// Requested resource not found upstream
    #[error("Resource not found")]
    NotFound,

    /// Data format error
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
