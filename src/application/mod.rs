pub mod checkin;
pub mod guard;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types for convenience
pub use checkin::{CheckInController, CheckInState, CheckInStep};
pub use guard::{AllowedRoles, GuardOutcome, Redirect, RoleGuard};
