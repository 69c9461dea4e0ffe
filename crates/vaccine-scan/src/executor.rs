use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, error, info};

use crate::radar_client::RadarClient;
use crate::reconciler::resolve_all;
use crate::scan_types::{ScanError, VaccinationCenter, VaccineAvailability};

/// Trait for services delivering availability alerts
#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    /// Notify about a vaccine that can currently be booked at a center
    async fn send_availability_notification(
        &self,
        vaccine_name: &str,
        center: &VaccinationCenter,
    ) -> Result<(), NotificationError>;
}

/// Errors raised by the notification delivery path
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Telegram transport or protocol error
    #[error("Telegram error: {0}")]
    Telegram(String),
}

/// Configuration for the scan executor
#[derive(Debug, Clone)]
pub struct ScanExecutorConfig {
    /// Postal code around which centers are searched
    pub zip_code: String,

    /// Search radius in kilometers
    pub radius_km: u32,

    /// Fixed delay between poll cycles
    pub poll_interval: Duration,
}

/// Main poll loop driving fetch, reconciliation and notification
pub struct ScanExecutor {
    client: RadarClient,
    notification_service: Arc<dyn NotificationService>,
    config: ScanExecutorConfig,
}

impl ScanExecutor {
    /// Create a new executor around a client and a notification service
    pub fn new(
        client: RadarClient,
        notification_service: Arc<dyn NotificationService>,
        config: ScanExecutorConfig,
    ) -> Self {
        Self {
            client,
            notification_service,
            config,
        }
    }

    /// Start the poll loop. Fetches the center directory once, then runs
    /// fetch-reconcile-notify cycles on a fixed interval until the process
    /// is terminated. No error inside the loop is fatal.
    pub async fn start(&self) {
        info!(
            "Starting vaccine scan around {} within {} km",
            self.config.zip_code, self.config.radius_km
        );

        let centers = match self
            .client
            .get_vaccination_centers(&self.config.zip_code, self.config.radius_km)
            .await
        {
            Ok(centers) => {
                info!("Monitoring {} vaccination centers", centers.len());
                centers
            }
            Err(e) => {
                // keep polling anyway; an empty directory degrades to no-op cycles
                error!("Failed to fetch vaccination centers: {}", e);
                Vec::new()
            }
        };

        let mut poll_interval = interval(self.config.poll_interval);

        loop {
            poll_interval.tick().await;

            match self.run_cycle(&centers).await {
                Ok(found) => info!(
                    "found {}, retry after {:?}...",
                    found, self.config.poll_interval
                ),
                Err(e) => error!(
                    "Error polling availability: {}, retry after {:?}...",
                    e, self.config.poll_interval
                ),
            }
        }
    }

    /// Run one fetch-reconcile-notify cycle. Returns a short summary of
    /// what was found, for the cycle log.
    async fn run_cycle(&self, centers: &[VaccinationCenter]) -> Result<String, ScanError> {
        let records = self.client.get_vaccine_availability(centers).await?;
        let records = resolve_all(centers, records);

        Ok(notify_available(&records, self.notification_service.as_ref()).await)
    }
}

/// Scan reconciled records and raise one notification per vaccine that is
/// currently available at a known center. Records without a resolved
/// center are dropped silently. Returns the cycle summary, either
/// `<vaccine> in <center>` for the last find or `nothing`.
pub async fn notify_available(
    records: &[VaccineAvailability],
    notification_service: &dyn NotificationService,
) -> String {
    let mut found = String::from("nothing");

    for record in records {
        if !record.available {
            continue;
        }

        let Some(center) = &record.center else {
            debug!("Dropping availability for unknown slug {}", record.slug);
            continue;
        };

        if let Some(changed_at) = record.last_change() {
            debug!("{} changed status at {}", record.friendly_name, changed_at);
        }

        found = format!("{} in {}", record.friendly_name, center.name);

        if let Err(e) = notification_service
            .send_availability_notification(&record.friendly_name, center)
            .await
        {
            error!(
                "Failed to send notification for {}: {}",
                record.friendly_name, e
            );
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::scan_types::Vaccine;

    struct RecordingNotificationService {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingNotificationService {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl NotificationService for RecordingNotificationService {
        async fn send_availability_notification(
            &self,
            vaccine_name: &str,
            center: &VaccinationCenter,
        ) -> Result<(), NotificationError> {
            self.sent
                .lock()
                .unwrap()
                .push(format!("{} @ {}", vaccine_name, center.name));

            if self.fail {
                Err(NotificationError::Telegram("boom".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn center(name: &str, vaccines: &[(&str, &str)]) -> VaccinationCenter {
        VaccinationCenter {
            name: name.to_string(),
            zip: "50679".to_string(),
            city: "Köln".to_string(),
            state: "Nordrhein-Westfalen".to_string(),
            booking_url: "https://booking.example.com/messe".to_string(),
            address: "Messeplatz 1".to_string(),
            slug: name.to_lowercase(),
            vaccines: vaccines
                .iter()
                .map(|(id, slug)| Vaccine {
                    id: id.to_string(),
                    slug: slug.to_string(),
                })
                .collect(),
        }
    }

    fn record(slug: &str, available: bool) -> VaccineAvailability {
        VaccineAvailability {
            available,
            no_booking: false,
            slug: slug.to_string(),
            time: 0,
            unknown: false,
            waiting_room: false,
            friendly_name: String::new(),
            center: None,
        }
    }

    #[tokio::test]
    async fn test_notify_available_end_to_end() {
        let centers = vec![center("Impfzentrum Messe", &[("BioNTech", "bnt")])];
        let records = resolve_all(&centers, vec![record("bnt", true)]);
        let service = RecordingNotificationService::new(false);

        let found = notify_available(&records, &service).await;

        assert_eq!(found, "BioNTech in Impfzentrum Messe");
        let sent = service.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), ["BioNTech @ Impfzentrum Messe"]);
    }

    #[tokio::test]
    async fn test_notify_available_skips_unavailable() {
        let centers = vec![center("Impfzentrum Messe", &[("BioNTech", "bnt")])];
        let records = resolve_all(&centers, vec![record("bnt", false)]);
        let service = RecordingNotificationService::new(false);

        let found = notify_available(&records, &service).await;

        assert_eq!(found, "nothing");
        assert!(service.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notify_available_drops_unknown_slug() {
        let centers = vec![center("Impfzentrum Messe", &[("BioNTech", "bnt")])];
        let records = resolve_all(&centers, vec![record("astra", true)]);
        let service = RecordingNotificationService::new(false);

        let found = notify_available(&records, &service).await;

        assert_eq!(found, "nothing");
        assert!(service.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notify_available_once_per_record() {
        let centers = vec![center(
            "Impfzentrum Messe",
            &[("BioNTech", "bnt"), ("Moderna", "mod")],
        )];
        let records = resolve_all(&centers, vec![record("bnt", true), record("mod", true)]);
        let service = RecordingNotificationService::new(false);

        let found = notify_available(&records, &service).await;

        // summary names the last find, every record got its own notification
        assert_eq!(found, "Moderna in Impfzentrum Messe");
        assert_eq!(service.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_notify_available_survives_delivery_failure() {
        let centers = vec![center(
            "Impfzentrum Messe",
            &[("BioNTech", "bnt"), ("Moderna", "mod")],
        )];
        let records = resolve_all(&centers, vec![record("bnt", true), record("mod", true)]);
        let service = RecordingNotificationService::new(true);

        let found = notify_available(&records, &service).await;

        // a failed delivery is logged, not propagated; the scan keeps going
        assert_eq!(found, "Moderna in Impfzentrum Messe");
        assert_eq!(service.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_notify_available_with_no_records() {
        let service = RecordingNotificationService::new(false);

        let found = notify_available(&[], &service).await;

        assert_eq!(found, "nothing");
        assert!(service.sent.lock().unwrap().is_empty());
    }
}
