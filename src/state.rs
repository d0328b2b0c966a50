//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    config::AppConfig,
    identity::{HeaderIdentity, IdentityProvider},
    repositories::RentalStore,
    services::{
        booking_service::BookingService,
        catalog_service::CatalogService,
        contact_service::{ContactMailer, ContactService, LogMailer},
        payment_gateway::{PaymentGateway, SimulatedGateway},
        payment_service::PaymentService,
        receipt_service::ReceiptService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RentalStore>,
    pub catalog: CatalogService,
    pub bookings: BookingService,
    pub payments: PaymentService,
    pub receipts: ReceiptService,
    pub contact: ContactService,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Wire every service against `store` with explicit capabilities.
    pub fn new(
        store: Arc<dyn RentalStore>,
        gateway: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn ContactMailer>,
        identity: Arc<dyn IdentityProvider>,
        cfg: &AppConfig,
    ) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            bookings: BookingService::new(store.clone()),
            payments: PaymentService::new(store.clone(), gateway),
            receipts: ReceiptService::new(store.clone()),
            contact: ContactService::new(mailer, &cfg.from_email, &cfg.contact_email),
            identity,
            store,
        }
    }

    /// Production wiring: simulated gateway, logging mailer, header identity.
    pub fn with_defaults(store: Arc<dyn RentalStore>, cfg: &AppConfig) -> Self {
        Self::new(
            store,
            Arc::new(SimulatedGateway),
            Arc::new(LogMailer),
            Arc::new(HeaderIdentity::new(&cfg.identity_header)),
            cfg,
        )
    }
}
