//! Payment workflow: validate card input, charge through the gateway and
//! record the payment together with the booking's paid flag.
//!
//! Paying an already-paid booking is not an error: the caller gets the
//! existing receipt back and nothing is charged or written.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::payment_dto::{CardDetails, PaymentForm, PaymentFormView},
    models::{
        booking::{Booking, Receipt},
        payment::Payment,
        timestamp,
    },
    repositories::{PaymentRecord, RentalStore},
    services::{RentalError, RentalResult, payment_gateway::PaymentGateway},
};

/// What the payment page should show.
#[derive(Debug)]
pub enum PaymentPage {
    /// Booking still unpaid; render the form.
    Pending(PaymentFormView),
    /// Nothing left to pay; go to the receipt.
    AlreadyPaid(Uuid),
}

/// Result of a payment submission.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// A new payment was captured by this call.
    Captured(Receipt),
    /// The booking was paid before; this is the existing receipt.
    AlreadyPaid(Receipt),
}

impl PaymentOutcome {
    pub fn receipt(&self) -> &Receipt {
        match self {
            PaymentOutcome::Captured(receipt) | PaymentOutcome::AlreadyPaid(receipt) => receipt,
        }
    }

    pub fn into_receipt(self) -> Receipt {
        match self {
            PaymentOutcome::Captured(receipt) | PaymentOutcome::AlreadyPaid(receipt) => receipt,
        }
    }
}

#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn RentalStore>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn RentalStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { store, gateway }
    }

    async fn booking(&self, booking_id: Uuid) -> RentalResult<Booking> {
        self.store
            .find_booking(booking_id)
            .await?
            .ok_or(RentalError::BookingNotFound(booking_id))
    }

    async fn existing_receipt(&self, booking: Booking) -> RentalResult<Receipt> {
        let payment = self.store.find_payment_for_booking(booking.id).await?;
        Ok(Receipt { booking, payment })
    }

    pub async fn payment_page(&self, booking_id: Uuid) -> RentalResult<PaymentPage> {
        let booking = self.booking(booking_id).await?;
        if booking.paid {
            return Ok(PaymentPage::AlreadyPaid(booking.id));
        }
        Ok(PaymentPage::Pending(PaymentFormView::new(booking)))
    }

    /// Pay for a booking.
    ///
    /// On validation or gateway failure the booking is left unpaid and no
    /// payment exists. On success exactly one payment is stored, for the
    /// booking's total, keeping only the card's last four digits.
    pub async fn submit_payment(
        &self,
        booking_id: Uuid,
        form: &PaymentForm,
    ) -> RentalResult<PaymentOutcome> {
        let booking = self.booking(booking_id).await?;
        if booking.paid {
            info!(booking_id = %booking.id, "booking already paid, returning receipt");
            return Ok(PaymentOutcome::AlreadyPaid(
                self.existing_receipt(booking).await?,
            ));
        }

        let card = CardDetails::parse(form)?;
        let authorization = self.gateway.charge(&card, booking.total_amount).await?;

        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            cardholder_name: card.cardholder_name.clone(),
            card_last4: card.last4().to_string(),
            amount: booking.total_amount,
            reference: authorization.reference,
            created_at: timestamp(),
        };

        match self.store.record_payment(&payment).await? {
            PaymentRecord::Recorded => {
                info!(
                    booking_id = %booking.id,
                    payment_id = %payment.id,
                    amount = %payment.amount,
                    reference = %payment.reference,
                    "payment captured"
                );
                let booking = Booking {
                    paid: true,
                    ..booking
                };
                Ok(PaymentOutcome::Captured(Receipt {
                    booking,
                    payment: Some(payment),
                }))
            }
            PaymentRecord::AlreadyPaid => {
                // Lost a race with a concurrent submission. The gateway
                // authorization is not stored and must be voided by hand.
                warn!(
                    booking_id = %booking.id,
                    reference = %payment.reference,
                    "booking was paid concurrently; authorization not recorded"
                );
                let booking = self.booking(booking_id).await?;
                Ok(PaymentOutcome::AlreadyPaid(
                    self.existing_receipt(booking).await?,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dto::booking_dto::BookingForm,
        services::{
            booking_service::BookingService,
            payment_gateway::{Authorization, GatewayError, SimulatedGateway},
            test_support::{seed_vehicle, store_with_pool},
        },
    };
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use sqlx::SqlitePool;

    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn charge(
            &self,
            _card: &CardDetails,
            _amount: Decimal,
        ) -> Result<Authorization, GatewayError> {
            Err(GatewayError::Declined("insufficient funds".into()))
        }
    }

    fn card(number: &str) -> PaymentForm {
        PaymentForm {
            card_number: number.into(),
            cardholder_name: "Jane Smith".into(),
            expiry_date: "12/27".into(),
            cvv: "123".into(),
        }
    }

    async fn unpaid_booking(
        gateway: Arc<dyn PaymentGateway>,
    ) -> (PaymentService, Booking, Arc<SqlitePool>) {
        let (store, pool) = store_with_pool().await;
        let car = seed_vehicle(&store, "Civic", "5000.00", true).await;
        let booking = BookingService::new(store.clone())
            .submit_booking(
                car.id,
                &BookingForm {
                    customer_name: "Jane Smith".into(),
                    customer_email: "jane@example.com".into(),
                    customer_phone: String::new(),
                    start_date: "2025-09-01".into(),
                    end_date: "2025-09-05".into(),
                },
            )
            .await
            .unwrap();
        (PaymentService::new(store, gateway), booking, pool)
    }

    async fn payment_rows(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn captures_payment_and_marks_booking_paid() {
        let (service, booking, _pool) = unpaid_booking(Arc::new(SimulatedGateway)).await;

        let outcome = service
            .submit_payment(booking.id, &card("4111 1111 1111 1111"))
            .await
            .unwrap();
        let receipt = match outcome {
            PaymentOutcome::Captured(receipt) => receipt,
            other => panic!("expected capture, got {other:?}"),
        };
        assert!(receipt.booking.paid);
        let payment = receipt.payment.unwrap();
        assert_eq!(payment.card_last4, "1111");
        assert_eq!(payment.amount, booking.total_amount);
        assert_eq!(payment.cardholder_name, "Jane Smith");
        assert!(payment.reference.starts_with("SIM-"));
    }

    #[tokio::test]
    async fn paying_twice_keeps_one_payment() {
        let (service, booking, pool) = unpaid_booking(Arc::new(SimulatedGateway)).await;

        let first = service
            .submit_payment(booking.id, &card("4111111111111111"))
            .await
            .unwrap();
        let second = service
            .submit_payment(booking.id, &card("5500 0000 0000 0004"))
            .await
            .unwrap();

        assert!(matches!(first, PaymentOutcome::Captured(_)));
        assert!(matches!(second, PaymentOutcome::AlreadyPaid(_)));
        assert_eq!(first.receipt().payment, second.receipt().payment);
        assert_eq!(payment_rows(&pool).await, 1);
    }

    #[tokio::test]
    async fn already_paid_short_circuits_before_validation() {
        let (service, booking, _pool) = unpaid_booking(Arc::new(SimulatedGateway)).await;
        service
            .submit_payment(booking.id, &card("4111111111111111"))
            .await
            .unwrap();

        let again = service
            .submit_payment(booking.id, &PaymentForm::default())
            .await
            .unwrap();
        assert!(matches!(again, PaymentOutcome::AlreadyPaid(_)));
    }

    #[tokio::test]
    async fn invalid_card_leaves_booking_untouched() {
        let (service, booking, pool) = unpaid_booking(Arc::new(SimulatedGateway)).await;

        let err = service
            .submit_payment(booking.id, &card("4111"))
            .await
            .unwrap_err();
        match err {
            RentalError::Validation(errors) => {
                assert_eq!(errors.messages(), vec!["Invalid card number."])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(payment_rows(&pool).await, 0);
        assert!(matches!(
            service.payment_page(booking.id).await.unwrap(),
            PaymentPage::Pending(_)
        ));
    }

    #[tokio::test]
    async fn declined_charge_records_nothing() {
        let (service, booking, pool) = unpaid_booking(Arc::new(DecliningGateway)).await;

        let err = service
            .submit_payment(booking.id, &card("4111111111111111"))
            .await
            .unwrap_err();
        assert!(matches!(err, RentalError::PaymentDeclined(reason) if reason == "insufficient funds"));
        assert_eq!(payment_rows(&pool).await, 0);
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let (service, _booking, _pool) = unpaid_booking(Arc::new(SimulatedGateway)).await;
        let missing = Uuid::new_v4();
        let err = service
            .submit_payment(missing, &card("4111111111111111"))
            .await
            .unwrap_err();
        assert!(matches!(err, RentalError::BookingNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn payment_page_redirects_once_paid() {
        let (service, booking, _pool) = unpaid_booking(Arc::new(SimulatedGateway)).await;
        match service.payment_page(booking.id).await.unwrap() {
            PaymentPage::Pending(view) => assert_eq!(view.nights, 4),
            other => panic!("expected form, got {other:?}"),
        }
        service
            .submit_payment(booking.id, &card("4111111111111111"))
            .await
            .unwrap();
        assert!(matches!(
            service.payment_page(booking.id).await.unwrap(),
            PaymentPage::AlreadyPaid(id) if id == booking.id
        ));
    }
}
