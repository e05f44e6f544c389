//! HTTP implementation of PaymentGateway

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::payment::PaymentGateway;
use crate::domain::{NewPayment, Payment, PaymentStatus};
use crate::infrastructure::http::{path_segment, ApiClient};
use crate::infrastructure::mappers::{checkout_url_from_wire, payment_from_wire};
use crate::shared::{AppError, AppResult};

pub struct HttpPaymentGateway {
    client: Arc<ApiClient>,
}

impl HttpPaymentGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        if !payment.amount.is_finite() || payment.amount < 0.0 {
            return Err(AppError::validation("amount", "Amount cannot be negative"));
        }

        let value = self.client.post("Payment", &payment).await?;
        let mut created = payment_from_wire(&value)?;
        // Zero-amount payments are settled on creation even when the echo omits the status
        if payment.is_zero_amount() {
            created.status = PaymentStatus::Completed;
        }
        info!(
            payment_id = %created.id,
            amount = created.amount,
            method = created.method.as_str(),
            "Payment created"
        );
        Ok(created)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Payment> {
        let id = path_segment("paymentId", id)?;
        let value = self
            .client
            .get_with_fallback(&format!("Payment/{}", id), &format!("Payments/{}", id))
            .await?;
        payment_from_wire(&value)
    }

    async fn create_payment_link(&self, id: &str) -> AppResult<String> {
        let id = path_segment("paymentId", id)?;
        let value = self
            .client
            .post_empty(&format!("Payment/{}/create-payment-link", id))
            .await?;
        checkout_url_from_wire(&value)
    }

    async fn update_status(&self, id: &str, status: PaymentStatus) -> AppResult<Payment> {
        let id = path_segment("paymentId", id)?;
        let value = self
            .client
            .put(
                &format!("Payment/{}/status", id),
                &json!({ "Status": status.as_str() }),
            )
            .await?;
        info!(payment_id = id, status = status.as_str(), "Payment status updated");

        if value.is_null() {
            return self.get_by_id(id).await;
        }
        payment_from_wire(&value)
    }
}
