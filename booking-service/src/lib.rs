pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::Application;

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::config::Settings;
use crate::services::{
    BookingWizard, Clock, ConfirmationLedger, InMemoryServiceCatalog, PaymentFlow,
    ServiceCatalog, SystemClock,
};

/// A payment attempt together with the wizard it was checked out from.
pub struct PaymentSession {
    pub booking_id: Uuid,
    pub flow: PaymentFlow,
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub catalog: Arc<dyn ServiceCatalog>,
    pub wizards: Arc<DashMap<Uuid, BookingWizard>>,
    pub payments: Arc<DashMap<Uuid, PaymentSession>>,
    pub ledger: Arc<ConfirmationLedger>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let catalog = Arc::new(InMemoryServiceCatalog::new(settings.catalog.clone()));
        Self {
            settings,
            catalog,
            wizards: Arc::new(DashMap::new()),
            payments: Arc::new(DashMap::new()),
            ledger: Arc::new(ConfirmationLedger::new()),
            clock,
        }
    }
}
