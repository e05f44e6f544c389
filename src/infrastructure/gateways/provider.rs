//! HTTP-backed implementation of GatewayProvider

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::battery::BatteryGateway;
use crate::domain::booking::BookingGateway;
use crate::domain::payment::PaymentGateway;
use crate::domain::swap::SwapGateway;
use crate::domain::transfer::TransferGateway;
use crate::domain::user::AuthGateway;
use crate::domain::GatewayProvider;
use crate::infrastructure::http::ApiClient;
use crate::session::SharedSession;
use crate::shared::AppResult;

use super::auth::HttpAuthGateway;
use super::battery::HttpBatteryGateway;
use super::booking::HttpBookingGateway;
use super::payment::HttpPaymentGateway;
use super::swap::HttpSwapGateway;
use super::transfer::HttpTransferGateway;

/// All gateways sharing one `ApiClient` and therefore one session.
///
/// ```ignore
/// let gateways = HttpGateways::from_config(&config, session.clone())?;
/// let booking = gateways.bookings().get_by_id("BK-1001").await?;
/// ```
pub struct HttpGateways {
    auth: HttpAuthGateway,
    bookings: HttpBookingGateway,
    batteries: HttpBatteryGateway,
    swaps: HttpSwapGateway,
    payments: HttpPaymentGateway,
    transfers: HttpTransferGateway,
}

impl HttpGateways {
    pub fn new(client: Arc<ApiClient>, booking_ttl: std::time::Duration) -> Self {
        Self {
            auth: HttpAuthGateway::new(client.clone()),
            bookings: HttpBookingGateway::new(client.clone(), booking_ttl),
            batteries: HttpBatteryGateway::new(client.clone()),
            swaps: HttpSwapGateway::new(client.clone()),
            payments: HttpPaymentGateway::new(client.clone()),
            transfers: HttpTransferGateway::new(client),
        }
    }

    pub fn from_config(config: &AppConfig, session: SharedSession) -> AppResult<Self> {
        let client = Arc::new(ApiClient::new(&config.backend, session)?);
        Ok(Self::new(client, config.cache.booking_ttl()))
    }
}

impl GatewayProvider for HttpGateways {
    fn auth(&self) -> &dyn AuthGateway {
        &self.auth
    }

    fn bookings(&self) -> &dyn BookingGateway {
        &self.bookings
    }

    fn batteries(&self) -> &dyn BatteryGateway {
        &self.batteries
    }

    fn swaps(&self) -> &dyn SwapGateway {
        &self.swaps
    }

    fn payments(&self) -> &dyn PaymentGateway {
        &self.payments
    }

    fn transfers(&self) -> &dyn TransferGateway {
        &self.transfers
    }
}
