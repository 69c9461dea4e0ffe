use std::sync::Arc;

use tracing::{error, info};

use crate::executor::{NotificationError, NotificationService};
use crate::scan_types::VaccinationCenter;
use crate::telegram_service::Messenger;

/// Notification service formatting availability alerts and delivering them
/// through an optional messenger. Without a messenger every alert goes to
/// the local log instead; delivery failures are logged and swallowed.
pub struct NotificationServiceImpl {
    messenger: Option<Arc<dyn Messenger>>,
}

impl NotificationServiceImpl {
    /// Create a new notification service. Pass `None` to degrade all
    /// notifications to the local log.
    pub fn new(messenger: Option<Arc<dyn Messenger>>) -> Self {
        Self { messenger }
    }

    /// Build the message for a newly available vaccine: a bold headline
    /// naming the vaccine, the center's address, its zip and city, and
    /// the booking link.
    fn create_notification_content(vaccine_name: &str, center: &VaccinationCenter) -> String {
        format!(
            "<b>{} available!</b>\n{}\n{} {}\n\nvisit {}",
            vaccine_name, center.address, center.zip, center.city, center.booking_url
        )
    }
}

#[async_trait::async_trait]
impl NotificationService for NotificationServiceImpl {
    async fn send_availability_notification(
        &self,
        vaccine_name: &str,
        center: &VaccinationCenter,
    ) -> Result<(), NotificationError> {
        let message = Self::create_notification_content(vaccine_name, center);

        let Some(messenger) = &self.messenger else {
            info!("messenger not configured - skip send");
            info!("{}", message);
            return Ok(());
        };

        // fire-and-forget: a failed delivery never fails the poll cycle
        if let Err(e) = messenger.send_message(&message).await {
            error!("Failed to deliver notification: {}", e);
        }

        Ok(())
    }
}
