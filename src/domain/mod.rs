pub mod battery;
pub mod booking;
pub mod gateways;
pub mod payment;
pub mod swap;
pub mod transfer;
pub mod user;

pub use battery::{Battery, BatteryLocation, BatterySlot, BatteryStatus, ConditionLog, SlotStatus};
pub use booking::{Booking, BookingStatus, NewBooking, UiBookingStatus};
pub use gateways::GatewayProvider;
pub use payment::{NewPayment, Payment, PaymentMethod, PaymentStatus};
pub use swap::{NewSwapTransaction, SwapStatus, SwapTransaction};
pub use transfer::{BatteryTransfer, NewBatteryTransfer, TransferStatus};
pub use user::{AuthTokens, AuthUser, LoginResult, Role};

/// Canonical comparison key for backend enumerations:
/// lowercase, separators and whitespace dropped.
pub(crate) fn status_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
