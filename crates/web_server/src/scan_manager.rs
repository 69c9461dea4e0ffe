use std::sync::Arc;

use tokio::task::JoinHandle;

use vaccine_scan::{
    Messenger, NotificationServiceImpl, RadarClient, ScanError, ScanExecutor, ScanExecutorConfig,
    TelegramMessenger,
};

use crate::config::Config;

/// Manager for the scan execution system
/// Integrates with the web server to provide background scanning
pub struct ScanManager {
    executor_handle: Option<JoinHandle<()>>,
}

impl ScanManager {
    /// Create a new scan manager
    pub fn new() -> Self {
        Self {
            executor_handle: None,
        }
    }

    /// Start the scan executor as a background task
    pub fn start(&mut self, config: &Config) -> Result<(), ScanError> {
        log::info!("Starting vaccine scan system");

        let client = RadarClient::new()?;

        let messenger: Option<Arc<dyn Messenger>> = match &config.telegram {
            Some(telegram) => Some(Arc::new(TelegramMessenger::new(
                telegram.bot_token.clone(),
                telegram.chat_id.clone(),
            ))),
            None => {
                log::warn!("Telegram credentials not set - notifications go to the console");
                None
            }
        };

        let notification_service = Arc::new(NotificationServiceImpl::new(messenger));

        let executor = ScanExecutor::new(
            client,
            notification_service,
            ScanExecutorConfig {
                zip_code: config.postal_code.clone(),
                radius_km: config.radius_km,
                poll_interval: config.poll_interval,
            },
        );

        let handle = tokio::spawn(async move {
            executor.start().await;
        });

        self.executor_handle = Some(handle);

        log::info!("Vaccine scan system started successfully");
        Ok(())
    }
}

impl Drop for ScanManager {
    fn drop(&mut self) {
        if let Some(handle) = self.executor_handle.take() {
            handle.abort();
        }
    }
}
