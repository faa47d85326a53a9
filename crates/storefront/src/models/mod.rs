//! Data models for local database entities.

pub mod appointment;
pub mod customer;
pub mod inventory;
pub mod order;
pub mod scan;

pub use appointment::{Appointment, NewAppointment};
pub use customer::Customer;
pub use inventory::{InventoryItem, InventoryLogEntry, SyncedProduct};
pub use order::Order;
pub use scan::HistoricScan;
