//! Payment gateway interface

use async_trait::async_trait;

use super::model::{NewPayment, Payment, PaymentStatus};
use crate::shared::AppResult;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create(&self, payment: NewPayment) -> AppResult<Payment>;

    async fn get_by_id(&self, id: &str) -> AppResult<Payment>;

    /// Ask the backend for a hosted checkout link; returns the URL.
    async fn create_payment_link(&self, id: &str) -> AppResult<String>;

    async fn update_status(&self, id: &str, status: PaymentStatus) -> AppResult<Payment>;
}
