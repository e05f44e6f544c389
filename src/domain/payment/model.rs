//! Payment entity

use serde::Serialize;

use crate::domain::status_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }

    /// Unknown or missing values fall back to `Pending`.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("processing") | Some("1") => Self::Processing,
            Some("completed") | Some("paid") | Some("success") | Some("2") => Self::Completed,
            Some("failed") | Some("cancelled") | Some("3") => Self::Failed,
            Some("refunded") | Some("4") => Self::Refunded,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
    Subscription,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Online => "Online",
            Self::Subscription => "Subscription",
        }
    }

    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("cash") => Self::Cash,
            Some("card") | Some("creditcard") => Self::Card,
            Some("subscription") | Some("package") => Self::Subscription,
            _ => Self::Online,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub user_id: Option<String>,
    pub booking_id: Option<String>,
    pub swap_id: Option<String>,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Hosted checkout page for non-zero payments
    pub checkout_url: Option<String>,
}

impl Payment {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

/// Payload for recording a payment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewPayment {
    #[serde(rename = "UserID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "BookingID", skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(rename = "SwapID", skip_serializing_if = "Option::is_none")]
    pub swap_id: Option<String>,
    pub amount: f64,
    #[serde(rename = "PaymentMethod")]
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

impl NewPayment {
    /// Subscription-covered swaps cost nothing and are settled on creation.
    pub fn new(amount: f64, method: PaymentMethod) -> Self {
        let (method, status) = if amount == 0.0 {
            (PaymentMethod::Subscription, PaymentStatus::Completed)
        } else {
            (method, PaymentStatus::Pending)
        };
        Self {
            user_id: None,
            booking_id: None,
            swap_id: None,
            amount,
            method,
            status,
        }
    }

    pub fn for_booking(mut self, booking_id: impl Into<String>) -> Self {
        self.booking_id = Some(booking_id.into());
        self
    }

    pub fn for_user(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn is_zero_amount(&self) -> bool {
        self.amount == 0.0
    }
}
