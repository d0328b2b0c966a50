//! Read-only receipt and per-customer listings.

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::{
        booking::{Booking, Receipt},
        payment::Payment,
    },
    repositories::RentalStore,
    services::{RentalError, RentalResult},
};

#[derive(Clone)]
pub struct ReceiptService {
    store: Arc<dyn RentalStore>,
}

impl ReceiptService {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self { store }
    }

    /// Booking plus its payment; `payment` is `None` while unpaid.
    pub async fn get_receipt(&self, booking_id: Uuid) -> RentalResult<Receipt> {
        let booking = self
            .store
            .find_booking(booking_id)
            .await?
            .ok_or(RentalError::BookingNotFound(booking_id))?;
        let payment = self.store.find_payment_for_booking(booking_id).await?;
        Ok(Receipt { booking, payment })
    }

    pub async fn list_payments_for_user(&self, email: &str) -> RentalResult<Vec<Payment>> {
        Ok(self.store.list_payments_by_email(email).await?)
    }

    pub async fn list_bookings_for_user(&self, email: &str) -> RentalResult<Vec<Booking>> {
        Ok(self.store.list_bookings_by_email(email).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dto::{booking_dto::BookingForm, payment_dto::PaymentForm},
        services::{
            booking_service::BookingService,
            payment_gateway::SimulatedGateway,
            payment_service::PaymentService,
            test_support::{seed_vehicle, store},
        },
    };

    fn booking_form(email: &str) -> BookingForm {
        BookingForm {
            customer_name: "Customer".into(),
            customer_email: email.into(),
            customer_phone: String::new(),
            start_date: "2025-03-01".into(),
            end_date: "2025-03-03".into(),
        }
    }

    fn payment_form() -> PaymentForm {
        PaymentForm {
            card_number: "4111111111111111".into(),
            cardholder_name: "Customer".into(),
            expiry_date: "01/29".into(),
            cvv: "999".into(),
        }
    }

    #[tokio::test]
    async fn receipt_has_no_payment_until_paid() {
        let store = store().await;
        let car = seed_vehicle(&store, "Civic", "100", true).await;
        let booking = BookingService::new(store.clone())
            .submit_booking(car.id, &booking_form("a@example.com"))
            .await
            .unwrap();
        let receipts = ReceiptService::new(store.clone());

        let before = receipts.get_receipt(booking.id).await.unwrap();
        assert_eq!(before.booking, booking);
        assert!(before.payment.is_none());

        PaymentService::new(store, Arc::new(SimulatedGateway))
            .submit_payment(booking.id, &payment_form())
            .await
            .unwrap();
        let after = receipts.get_receipt(booking.id).await.unwrap();
        assert!(after.booking.paid);
        assert_eq!(after.payment.unwrap().amount.to_string(), "200.00");
    }

    #[tokio::test]
    async fn missing_receipt_is_not_found() {
        let receipts = ReceiptService::new(store().await);
        let err = receipts.get_receipt(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RentalError::BookingNotFound(_)));
    }

    #[tokio::test]
    async fn listings_are_scoped_to_the_customer() {
        let store = store().await;
        let car = seed_vehicle(&store, "Civic", "100", true).await;
        let bookings = BookingService::new(store.clone());
        let payments = PaymentService::new(store.clone(), Arc::new(SimulatedGateway));

        let mine_paid = bookings
            .submit_booking(car.id, &booking_form("me@example.com"))
            .await
            .unwrap();
        let mine_unpaid = bookings
            .submit_booking(car.id, &booking_form("me@example.com"))
            .await
            .unwrap();
        let theirs = bookings
            .submit_booking(car.id, &booking_form("them@example.com"))
            .await
            .unwrap();
        payments.submit_payment(mine_paid.id, &payment_form()).await.unwrap();
        payments.submit_payment(theirs.id, &payment_form()).await.unwrap();

        let receipts = ReceiptService::new(store);
        let my_bookings = receipts.list_bookings_for_user("me@example.com").await.unwrap();
        let ids: Vec<_> = my_bookings.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![mine_unpaid.id, mine_paid.id]);

        let my_payments = receipts.list_payments_for_user("me@example.com").await.unwrap();
        assert_eq!(my_payments.len(), 1);
        assert_eq!(my_payments[0].booking_id, mine_paid.id);

        assert!(receipts.list_payments_for_user("nobody@example.com").await.unwrap().is_empty());
    }
}
