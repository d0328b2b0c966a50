//! Card charging capability.
//!
//! The payment workflow only talks to [`PaymentGateway`]. The shipped
//! implementation, [`SimulatedGateway`], authorizes every charge without
//! contacting anyone; a real processor slots in behind the same trait.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::dto::payment_dto::CardDetails;

/// Successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    /// Processor-issued reference, stored on the payment record.
    pub reference: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Declined(String),
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge `amount` to `card`. Implementations must not log or retain
    /// the full card number or CVV.
    async fn charge(
        &self,
        card: &CardDetails,
        amount: Decimal,
    ) -> Result<Authorization, GatewayError>;
}

/// Mock processor: approves everything and issues `SIM-` references.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway;

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(
        &self,
        card: &CardDetails,
        amount: Decimal,
    ) -> Result<Authorization, GatewayError> {
        let reference = format!("SIM-{}", Uuid::new_v4().simple());
        info!(
            card_last4 = card.last4(),
            amount = %amount,
            reference = %reference,
            "simulated charge approved"
        );
        Ok(Authorization { reference })
    }
}
