use reqwest::Client;
use tracing::debug;

use crate::scan_types::{ScanError, VaccinationCenter, VaccineAvailability};

/// Base URL of the production Impfterminradar API
const DEFAULT_BASE_URL: &str = "https://www.impfterminradar.de/api";

/// Client for interacting with the Impfterminradar API
pub struct RadarClient {
    client: Client,
    base_url: String,
}

impl RadarClient {
    /// Create a new API client against the production base URL
    pub fn new() -> Result<Self, ScanError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new API client against a specific base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ScanError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ScanError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the vaccination centers around a postal code.
    /// Upstream ordering is preserved; this is called once at startup.
    pub async fn get_vaccination_centers(
        &self,
        zip: &str,
        radius_km: u32,
    ) -> Result<Vec<VaccinationCenter>, ScanError> {
        debug!("Fetching centers around {} within {} km", zip, radius_km);

        let url = format!("{}/centers", self.base_url);
        let params = [("PLZ", zip.to_string()), ("Radius", radius_km.to_string())];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ScanError::Network(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            match status.as_u16() {
                429 => return Err(ScanError::RateLimited),
                404 => return Err(ScanError::NotFound),
                _ => return Err(ScanError::ApiError(format!("HTTP {}", status))),
            }
        }

        let centers: Vec<VaccinationCenter> = response
            .json()
            .await
            .map_err(|e| ScanError::DataFormat(format!("Failed to parse centers: {}", e)))?;

        Ok(centers)
    }

    /// Fetch the current availability status for every vaccine offered by
    /// the given centers, as one batched request.
    ///
    /// The response is authoritative: the upstream may omit slugs it was
    /// asked about or report additional ones.
    pub async fn get_vaccine_availability(
        &self,
        centers: &[VaccinationCenter],
    ) -> Result<Vec<VaccineAvailability>, ScanError> {
        let slugs = collect_vaccine_slugs(centers);
        debug!("Requesting availability for {} vaccine slugs", slugs.len());

        let url = format!("{}/vaccinations/availability", self.base_url);

        let response = self
            .client
            .patch(&url)
            .json(&slugs)
            .send()
            .await
            .map_err(|e| ScanError::Network(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            match status.as_u16() {
                429 => return Err(ScanError::RateLimited),
                404 => return Err(ScanError::NotFound),
                _ => return Err(ScanError::ApiError(format!("HTTP {}", status))),
            }
        }

        let records: Vec<VaccineAvailability> = response
            .json()
            .await
            .map_err(|e| ScanError::DataFormat(format!("Failed to parse availability: {}", e)))?;

        Ok(records)
    }
}

/// Collect every vaccine slug referenced by the given centers, in the order
/// encountered. Duplicates are kept; the upstream endpoint tolerates
/// repeated slugs.
pub fn collect_vaccine_slugs(centers: &[VaccinationCenter]) -> Vec<String> {
    centers
        .iter()
        .flat_map(|center| center.vaccines.iter().map(|vaccine| vaccine.slug.clone()))
        .collect()
}
