//! Backend payload → domain entity mappers
//!
//! Pure functions. Every known backend spelling of a field is listed once in
//! the resource's field table; status strings go through the domain
//! `from_wire` parsers and their documented fallbacks.

pub mod battery;
pub mod booking;
pub mod payment;
pub mod swap;
pub mod transfer;
pub mod user;
pub mod wire;

pub use battery::{batteries_from_wire, battery_from_wire, slot_from_wire, slots_from_wire};
pub use booking::{booking_from_wire, bookings_from_wire};
pub use payment::{checkout_url_from_wire, payment_from_wire};
pub use swap::{swap_from_wire, swaps_from_wire};
pub use transfer::{transfer_from_wire, transfers_from_wire};
pub use user::{embedded_user, tokens_from_wire, user_from_wire};
pub use wire::{list_items, map_list, FieldTable, WireRecord};
