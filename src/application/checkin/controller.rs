//! Station check-in workflow
//!
//! `scan → verify → payment → swap → completed`, driven by explicit operator
//! actions. Every action validates first, then calls the backend, and only
//! mutates state once the call succeeded, so a failure leaves the workflow
//! at the step it was in.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state::{CheckInState, CheckInStep, CustomerInfo};
use crate::application::guard::{AllowedRoles, RoleGuard};
use crate::domain::swap::validate_battery_pair;
use crate::domain::{
    AuthUser, BookingStatus, GatewayProvider, NewPayment, NewSwapTransaction, Payment,
    PaymentMethod, Role,
};
use crate::notifications::SharedNotifier;
use crate::session::SharedSession;
use crate::shared::{AppError, AppResult, ErrorKind};

pub struct CheckInController {
    session: SharedSession,
    gateways: Arc<dyn GatewayProvider>,
    notifier: SharedNotifier,
    operator: AuthUser,
    state: CheckInState,
    /// Payment created on the backend whose checkout link is still missing
    unlinked_payment: Option<Payment>,
}

impl CheckInController {
    /// Open the workflow for the signed-in operator. Only staff and admins
    /// get a controller.
    pub fn open(
        session: SharedSession,
        gateways: Arc<dyn GatewayProvider>,
        notifier: SharedNotifier,
    ) -> AppResult<Self> {
        let operator = RoleGuard::new(AllowedRoles::staff()).require(&session)?;
        info!(operator = %operator.id, station = ?operator.station_id, "Check-in opened");

        Ok(Self {
            session,
            gateways,
            notifier,
            operator,
            state: CheckInState::default(),
            unlinked_payment: None,
        })
    }

    pub fn state(&self) -> &CheckInState {
        &self.state
    }

    pub fn step(&self) -> CheckInStep {
        self.state.step
    }

    pub fn operator(&self) -> &AuthUser {
        &self.operator
    }

    /// Publish backend failures as toasts; validation errors stay inline.
    fn report(&self, err: AppError) -> AppError {
        if err.kind() != ErrorKind::Validation {
            warn!(step = %self.state.step, error = %err, "Check-in action failed");
            self.notifier.error(&err);
        }
        err
    }

    fn ensure_step(&self, allowed: &[CheckInStep]) -> AppResult<()> {
        if allowed.contains(&self.state.step) {
            return Ok(());
        }
        Err(AppError::validation(
            "step",
            format!("Not available in the {} step", self.state.step),
        ))
    }

    fn ensure_session(&self) -> AppResult<()> {
        if self.session.is_expired() && self.session.refresh_token().is_none() {
            return Err(AppError::SessionExpired);
        }
        Ok(())
    }

    /// Look up the scanned reservation code.
    pub async fn scan(&mut self, code: &str) -> AppResult<CheckInStep> {
        self.ensure_step(&[CheckInStep::Scan, CheckInStep::Verify])?;
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::validation("bookingCode", "Reservation code is required"));
        }
        self.ensure_session().map_err(|e| self.report(e))?;

        let booking = self
            .gateways
            .bookings()
            .get_by_id(code)
            .await
            .map_err(|e| self.report(e))?;

        if !booking.can_check_in() {
            return Err(AppError::validation(
                "bookingCode",
                format!("Booking {} is already {}", booking.id, booking.status),
            ));
        }
        if let Some(station) = self.operator.station_id.as_deref() {
            if self.operator.role != Role::Admin
                && !booking.station_id.is_empty()
                && booking.station_id != station
            {
                return Err(self.report(AppError::Forbidden(format!(
                    "booking {} belongs to station {}",
                    booking.id, booking.station_id
                ))));
            }
        }

        info!(booking_id = %booking.id, station = %booking.station_id, "Booking scanned");
        self.unlinked_payment = None;
        self.state = CheckInState {
            step: CheckInStep::Verify,
            customer: CustomerInfo::from_booking(&booking),
            booking: Some(booking),
            ..CheckInState::default()
        };
        Ok(self.state.step)
    }

    /// Capture the battery ids. In verify this checks the booking in and
    /// moves on to payment; later it only corrects the ids.
    pub async fn record_batteries(
        &mut self,
        old_battery_id: &str,
        new_battery_id: &str,
    ) -> AppResult<CheckInStep> {
        self.ensure_step(&[CheckInStep::Verify, CheckInStep::Payment])?;
        let old_battery_id = old_battery_id.trim();
        let new_battery_id = new_battery_id.trim();
        if old_battery_id.is_empty() {
            return Err(AppError::validation("oldBatteryId", "Old battery id is required"));
        }
        if new_battery_id.is_empty() {
            return Err(AppError::validation("newBatteryId", "New battery id is required"));
        }

        if self.state.step == CheckInStep::Verify {
            let booking_id = self.require_booking_id()?;
            self.ensure_session().map_err(|e| self.report(e))?;
            let checked = self
                .gateways
                .bookings()
                .update_status(&booking_id, BookingStatus::Checked)
                .await
                .map_err(|e| self.report(e))?;

            info!(booking_id = %booking_id, "Customer checked in");
            self.notifier.success("Customer checked in");
            self.state.booking = Some(checked);
            self.state.step = CheckInStep::Payment;
        }

        self.state.old_battery_id = old_battery_id.to_string();
        self.state.new_battery_id = new_battery_id.to_string();
        Ok(self.state.step)
    }

    /// Record the payment. A zero amount (subscription) is settled at once
    /// and the workflow tries to move into the swap step; otherwise a
    /// checkout link is requested and the workflow waits in payment.
    pub async fn submit_payment(
        &mut self,
        amount: f64,
        method: PaymentMethod,
    ) -> AppResult<CheckInStep> {
        self.ensure_step(&[CheckInStep::Payment])?;
        if self.state.payment_completed {
            return self.proceed_to_swap().await;
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::validation("amount", "Amount cannot be negative"));
        }
        let booking = self
            .state
            .booking
            .clone()
            .ok_or_else(|| AppError::validation("bookingCode", "Scan a booking first"))?;
        self.ensure_session().map_err(|e| self.report(e))?;

        // A pending payment for the same booking and amount only needs a new link.
        let reusable = self
            .state
            .payment
            .as_ref()
            .or(self.unlinked_payment.as_ref())
            .filter(|p| {
                !p.is_completed()
                    && p.amount == amount
                    && p.booking_id.as_deref() == Some(booking.id.as_str())
            })
            .cloned();

        let mut payment = match reusable {
            Some(payment) => {
                debug!(payment_id = %payment.id, "Reusing pending payment");
                payment
            }
            None => {
                let customer = Some(booking.customer_id.clone()).filter(|id| !id.is_empty());
                let request = NewPayment::new(amount, method)
                    .for_booking(booking.id.clone())
                    .for_user(customer);
                self.gateways
                    .payments()
                    .create(request)
                    .await
                    .map_err(|e| self.report(e))?
            }
        };

        if payment.is_completed() {
            info!(payment_id = %payment.id, amount, "Payment settled");
            self.notifier.success("Payment completed");
            self.unlinked_payment = None;
            self.state.payment = Some(payment);
            self.state.payment_completed = true;
            return self.proceed_to_swap().await;
        }

        let url = match self.gateways.payments().create_payment_link(&payment.id).await {
            Ok(url) => url,
            Err(e) => {
                self.unlinked_payment = Some(payment);
                return Err(self.report(e));
            }
        };

        info!(payment_id = %payment.id, amount, "Waiting for online payment");
        self.notifier.info("Waiting for the customer to pay");
        payment.checkout_url = Some(url.clone());
        self.unlinked_payment = None;
        self.state.payment = Some(payment);
        self.state.checkout_url = Some(url);
        Ok(self.state.step)
    }

    /// Re-read the pending payment; once it is completed, move to swap.
    pub async fn confirm_payment(&mut self) -> AppResult<CheckInStep> {
        self.ensure_step(&[CheckInStep::Payment])?;
        if self.state.payment_completed {
            return self.proceed_to_swap().await;
        }
        let payment_id = self
            .state
            .payment
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or_else(|| AppError::validation("payment", "No payment to confirm"))?;
        self.ensure_session().map_err(|e| self.report(e))?;

        let mut payment = self
            .gateways
            .payments()
            .get_by_id(&payment_id)
            .await
            .map_err(|e| self.report(e))?;
        if payment.checkout_url.is_none() {
            payment.checkout_url = self.state.checkout_url.clone();
        }
        let completed = payment.is_completed();
        let status = payment.status;
        self.state.payment = Some(payment);

        if !completed {
            self.notifier
                .info(format!("Payment is still {}", status.as_str().to_lowercase()));
            return Ok(self.state.step);
        }

        self.notifier.success("Payment completed");
        self.state.payment_completed = true;
        self.proceed_to_swap().await
    }

    /// Enter the swap step: payment settled, both ids present and different.
    pub async fn proceed_to_swap(&mut self) -> AppResult<CheckInStep> {
        self.ensure_step(&[CheckInStep::Payment])?;
        if !self.state.payment_completed {
            return Err(AppError::validation(
                "payment",
                "Payment must be completed before the swap",
            ));
        }
        validate_battery_pair(&self.state.old_battery_id, &self.state.new_battery_id)?;

        let booking = self
            .state
            .booking
            .as_ref()
            .ok_or_else(|| AppError::validation("bookingCode", "Scan a booking first"))?;
        let station_id = Some(booking.station_id.clone())
            .filter(|s| !s.is_empty())
            .or_else(|| self.operator.station_id.clone())
            .ok_or_else(|| AppError::validation("stationId", "Booking has no station"))?;
        let amount = self.state.payment.as_ref().map_or(0.0, |p| p.amount);
        let request = NewSwapTransaction::new(
            Some(booking.id.clone()),
            self.state.old_battery_id.clone(),
            self.state.new_battery_id.clone(),
            station_id,
            amount,
        )?;
        self.ensure_session().map_err(|e| self.report(e))?;

        let swap = self
            .gateways
            .swaps()
            .create(request)
            .await
            .map_err(|e| self.report(e))?;

        info!(swap_id = %swap.id, "Swap started");
        self.state.swap_transaction_id = Some(swap.id);
        self.state.step = CheckInStep::Swap;
        Ok(self.state.step)
    }

    /// Finish the swap. `soh` is the returned battery's state of health.
    pub async fn complete_swap(&mut self, soh: Option<f64>) -> AppResult<CheckInStep> {
        self.ensure_step(&[CheckInStep::Swap])?;
        if let Some(soh) = soh {
            if !(0.0..=100.0).contains(&soh) {
                return Err(AppError::validation(
                    "soh",
                    "State of health must be between 0 and 100",
                ));
            }
        }
        let swap_id = self
            .state
            .swap_transaction_id
            .clone()
            .ok_or_else(|| AppError::validation("swap", "No swap transaction in progress"))?;
        self.ensure_session().map_err(|e| self.report(e))?;

        self.gateways
            .swaps()
            .complete(&swap_id, soh)
            .await
            .map_err(|e| self.report(e))?;

        info!(swap_id = %swap_id, ?soh, "Swap completed");
        self.notifier.success("Battery swap completed");
        self.state.step = CheckInStep::Completed;
        Ok(self.state.step)
    }

    /// Drop everything captured so far and go back to scanning.
    pub fn reset_flow(&mut self) {
        if !self.state.is_initial() {
            info!(booking_id = ?self.state.booking_id(), step = %self.state.step, "Check-in reset");
        }
        self.state = CheckInState::default();
        self.unlinked_payment = None;
    }

    fn require_booking_id(&self) -> AppResult<String> {
        self.state
            .booking_id()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("bookingCode", "Scan a booking first"))
    }
}
