//! Check-in workflow state

use serde::Serialize;

use crate::domain::{Booking, Payment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInStep {
    #[default]
    Scan,
    Verify,
    Payment,
    Swap,
    Completed,
}

impl CheckInStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Verify => "verify",
            Self::Payment => "payment",
            Self::Swap => "swap",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for CheckInStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the verify screen shows about the customer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub vehicle_plate: Option<String>,
}

impl CustomerInfo {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            name: booking.customer_name.clone(),
            phone: booking.customer_phone.clone(),
            vehicle_plate: booking.vehicle_plate.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInState {
    pub step: CheckInStep,
    pub booking: Option<Booking>,
    pub customer: CustomerInfo,
    pub old_battery_id: String,
    pub new_battery_id: String,
    pub swap_transaction_id: Option<String>,
    pub payment: Option<Payment>,
    pub payment_completed: bool,
    /// Hosted checkout page for non-zero payments
    pub checkout_url: Option<String>,
}

impl CheckInState {
    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }

    pub fn booking_id(&self) -> Option<&str> {
        self.booking.as_ref().map(|b| b.id.as_str())
    }
}
