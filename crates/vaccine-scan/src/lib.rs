//! # Vaccine Scan
//!
//! This crate provides types and services for tracking vaccine slot
//! availability. It polls the Impfterminradar API for the vaccination
//! centers around a postal code and raises a notification whenever one of
//! their vaccines becomes bookable.

/// Types for vaccination centers and availability records
mod scan_types;
pub use scan_types::*;

/// Client for the Impfterminradar API
mod radar_client;
pub use radar_client::*;

/// Slug-to-center resolution for availability records
mod reconciler;
pub use reconciler::*;

/// Poll loop driving fetch, reconciliation and notification
mod executor;
pub use executor::*;

/// Service formatting and delivering availability notifications
mod notification_service;
pub use notification_service::*;

/// Telegram transport for notifications
mod telegram_service;
pub use telegram_service::*;
