//! In-memory gateways for workflow tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::battery::BatteryGateway;
use crate::domain::booking::BookingGateway;
use crate::domain::payment::PaymentGateway;
use crate::domain::swap::SwapGateway;
use crate::domain::transfer::TransferGateway;
use crate::domain::user::AuthGateway;
use crate::domain::*;
use crate::shared::{AppError, AppResult};

/// One fake standing in for every gateway.
///
/// `fail(op, err)` makes the next call of `op` fail once.
#[derive(Default)]
pub struct FakeBackend {
    pub bookings: Mutex<HashMap<String, Booking>>,
    pub payments: Mutex<HashMap<String, Payment>>,
    pub swaps: Mutex<HashMap<String, SwapTransaction>>,
    pub completed_swaps: Mutex<Vec<(String, Option<f64>)>>,
    pub calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, AppError>>,
}

impl FakeBackend {
    pub fn with_booking(booking: Booking) -> Self {
        let fake = Self::default();
        fake.bookings
            .lock()
            .unwrap()
            .insert(booking.id.clone(), booking);
        fake
    }

    pub fn fail(&self, op: &'static str, err: AppError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn called(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn set_payment_status(&self, id: &str, status: PaymentStatus) {
        if let Some(p) = self.payments.lock().unwrap().get_mut(id) {
            p.status = status;
        }
    }

    fn enter(&self, op: &'static str) -> AppResult<()> {
        self.calls.lock().unwrap().push(op);
        match self.failures.lock().unwrap().remove(op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn booking(id: &str, station: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_string(),
        customer_id: "U-5".to_string(),
        customer_name: Some("Tran Van A".to_string()),
        customer_phone: Some("0909123456".to_string()),
        vehicle_id: Some("V-2".to_string()),
        vehicle_plate: Some("59A-123.45".to_string()),
        station_id: station.to_string(),
        battery_type_id: Some("BT-1".to_string()),
        scheduled_at: None,
        status,
    }
}

fn not_found(what: &str, id: &str) -> AppError {
    AppError::Backend {
        status: 404,
        message: format!("{} {} not found", what, id),
    }
}

#[async_trait]
impl AuthGateway for FakeBackend {
    async fn login(&self, _email: &str, _password: &str) -> AppResult<LoginResult> {
        self.enter("auth.login")?;
        Err(AppError::Unauthorized("not supported by fake".into()))
    }

    async fn refresh(&self) -> AppResult<AuthTokens> {
        self.enter("auth.refresh")?;
        Err(AppError::SessionExpired)
    }

    async fn me(&self) -> AppResult<AuthUser> {
        self.enter("auth.me")?;
        Err(AppError::Unauthorized("not supported by fake".into()))
    }

    async fn logout(&self) {
        let _ = self.enter("auth.logout");
    }
}

#[async_trait]
impl BookingGateway for FakeBackend {
    async fn get_by_id(&self, id: &str) -> AppResult<Booking> {
        self.enter("booking.get")?;
        self.bookings
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("Booking", id))
    }

    async fn list_for_station(&self, station_id: Option<&str>) -> AppResult<Vec<Booking>> {
        self.enter("booking.list")?;
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| station_id.map_or(true, |s| b.station_id == s))
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewBooking) -> AppResult<Booking> {
        self.enter("booking.create")?;
        let mut bookings = self.bookings.lock().unwrap();
        let mut created = booking(
            &format!("BK-{}", 2000 + bookings.len()),
            &new.station_id,
            BookingStatus::Pending,
        );
        created.customer_id = new.customer_id;
        bookings.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> AppResult<Booking> {
        self.enter("booking.update_status")?;
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings.get_mut(id).ok_or_else(|| not_found("Booking", id))?;
        booking.status = status;
        Ok(booking.clone())
    }

    async fn cancel(&self, id: &str) -> AppResult<()> {
        self.enter("booking.cancel")?;
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings.get_mut(id).ok_or_else(|| not_found("Booking", id))?;
        booking.status = BookingStatus::Cancelled;
        Ok(())
    }
}

#[async_trait]
impl BatteryGateway for FakeBackend {
    async fn get_by_id(&self, id: &str) -> AppResult<Battery> {
        self.enter("battery.get")?;
        Err(not_found("Battery", id))
    }

    async fn get_by_station(&self, _station_id: &str) -> AppResult<Vec<Battery>> {
        self.enter("battery.list")?;
        Ok(Vec::new())
    }

    async fn update_status(&self, id: &str, _status: BatteryStatus) -> AppResult<Battery> {
        self.enter("battery.update_status")?;
        Err(not_found("Battery", id))
    }

    async fn create_condition_log(&self, _log: ConditionLog) -> AppResult<()> {
        self.enter("battery.condition_log")
    }

    async fn slots_by_station(&self, _station_id: &str) -> AppResult<Vec<BatterySlot>> {
        self.enter("battery.slots")?;
        Ok(Vec::new())
    }
}

#[async_trait]
impl SwapGateway for FakeBackend {
    async fn get_by_id(&self, id: &str) -> AppResult<SwapTransaction> {
        self.enter("swap.get")?;
        self.swaps
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("Swap", id))
    }

    async fn get_by_station(&self, station_id: &str) -> AppResult<Vec<SwapTransaction>> {
        self.enter("swap.list")?;
        Ok(self
            .swaps
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.station_id == station_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewSwapTransaction) -> AppResult<SwapTransaction> {
        self.enter("swap.create")?;
        let mut swaps = self.swaps.lock().unwrap();
        let swap = SwapTransaction {
            id: format!("SW-{}", swaps.len() + 1),
            booking_id: new.booking_id,
            old_battery_id: new.old_battery_id,
            new_battery_id: new.new_battery_id,
            station_id: new.station_id,
            amount: new.amount,
            payment_status: PaymentStatus::Completed,
            status: SwapStatus::Pending,
            created_at: None,
        };
        swaps.insert(swap.id.clone(), swap.clone());
        Ok(swap)
    }

    async fn complete(&self, id: &str, soh: Option<f64>) -> AppResult<()> {
        self.enter("swap.complete")?;
        let mut swaps = self.swaps.lock().unwrap();
        let swap = swaps.get_mut(id).ok_or_else(|| not_found("Swap", id))?;
        swap.status = SwapStatus::Completed;
        self.completed_swaps
            .lock()
            .unwrap()
            .push((id.to_string(), soh));
        Ok(())
    }

    async fn cancel(&self, id: &str) -> AppResult<()> {
        self.enter("swap.cancel")?;
        let mut swaps = self.swaps.lock().unwrap();
        let swap = swaps.get_mut(id).ok_or_else(|| not_found("Swap", id))?;
        swap.status = SwapStatus::Cancelled;
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for FakeBackend {
    async fn create(&self, new: NewPayment) -> AppResult<Payment> {
        self.enter("payment.create")?;
        let mut payments = self.payments.lock().unwrap();
        let payment = Payment {
            id: format!("P-{}", payments.len() + 1),
            user_id: new.user_id,
            booking_id: new.booking_id,
            swap_id: new.swap_id,
            amount: new.amount,
            method: new.method,
            status: new.status,
            checkout_url: None,
        };
        payments.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Payment> {
        self.enter("payment.get")?;
        self.payments
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("Payment", id))
    }

    async fn create_payment_link(&self, id: &str) -> AppResult<String> {
        self.enter("payment.link")?;
        Ok(format!("https://pay.example/{}", id))
    }

    async fn update_status(&self, id: &str, status: PaymentStatus) -> AppResult<Payment> {
        self.enter("payment.update_status")?;
        let mut payments = self.payments.lock().unwrap();
        let payment = payments.get_mut(id).ok_or_else(|| not_found("Payment", id))?;
        payment.status = status;
        Ok(payment.clone())
    }
}

#[async_trait]
impl TransferGateway for FakeBackend {
    async fn get_by_id(&self, id: &str) -> AppResult<BatteryTransfer> {
        self.enter("transfer.get")?;
        Err(not_found("Transfer", id))
    }

    async fn list(&self) -> AppResult<Vec<BatteryTransfer>> {
        self.enter("transfer.list")?;
        Ok(Vec::new())
    }

    async fn create(&self, new: NewBatteryTransfer) -> AppResult<BatteryTransfer> {
        self.enter("transfer.create")?;
        Ok(BatteryTransfer {
            id: "T-1".into(),
            battery_id: new.battery_id,
            from_station_id: Some(new.from_station_id),
            to_station_id: Some(new.to_station_id),
            status: TransferStatus::Pending,
        })
    }

    async fn update(&self, id: &str, _status: &str) -> AppResult<BatteryTransfer> {
        self.enter("transfer.update")?;
        Err(not_found("Transfer", id))
    }
}

impl GatewayProvider for FakeBackend {
    fn auth(&self) -> &dyn AuthGateway {
        self
    }

    fn bookings(&self) -> &dyn BookingGateway {
        self
    }

    fn batteries(&self) -> &dyn BatteryGateway {
        self
    }

    fn swaps(&self) -> &dyn SwapGateway {
        self
    }

    fn payments(&self) -> &dyn PaymentGateway {
        self
    }

    fn transfers(&self) -> &dyn TransferGateway {
        self
    }
}
