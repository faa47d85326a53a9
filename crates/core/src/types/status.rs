//! Status enums for various entities.
//!
//! The backing tables store statuses as plain text, so each enum carries
//! `Display`/`FromStr` for the database round-trip rather than a custom
//! Postgres enum type.

use serde::{Deserialize, Serialize};

/// Lifecycle of a facial-scan appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked but not yet confirmed by the studio.
    #[default]
    Pending,
    /// Confirmed by the studio.
    Confirmed,
    /// The appointment took place.
    Completed,
    /// Cancelled by either party.
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid appointment status: {s}")),
        }
    }
}

/// Lifecycle of a local order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Kind of stock movement recorded in the inventory log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryAction {
    /// Stock decreased by a sale.
    Sale,
    /// Stock increased by a restock.
    Restock,
    /// Stock corrected by hand.
    ManualAdjustment,
    /// Stock overwritten by a catalog sync.
    SyncUpdate,
}

impl std::fmt::Display for InventoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => write!(f, "sale"),
            Self::Restock => write!(f, "restock"),
            Self::ManualAdjustment => write!(f, "manual_adjustment"),
            Self::SyncUpdate => write!(f, "sync_update"),
        }
    }
}

impl std::str::FromStr for InventoryAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(Self::Sale),
            "restock" => Ok(Self::Restock),
            "manual_adjustment" => Ok(Self::ManualAdjustment),
            "sync_update" => Ok(Self::SyncUpdate),
            _ => Err(format!("invalid inventory action: {s}")),
        }
    }
}

// SQLx support: statuses live in TEXT columns (with postgres feature).
#[cfg(feature = "postgres")]
macro_rules! impl_text_status {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                s.parse().map_err(Into::into)
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.to_string(), buf)
            }
        }
    };
}

#[cfg(feature = "postgres")]
impl_text_status!(AppointmentStatus);
#[cfg(feature = "postgres")]
impl_text_status!(OrderStatus);
#[cfg(feature = "postgres")]
impl_text_status!(InventoryAction);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_appointment_status_roundtrip() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            let parsed = AppointmentStatus::from_str(&status.to_string());
            assert_eq!(parsed, Ok(status));
        }
    }

    #[test]
    fn test_appointment_status_default_is_pending() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Pending);
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        assert!(OrderStatus::from_str("returned").is_err());
    }

    #[test]
    fn test_inventory_action_roundtrip() {
        let parsed = InventoryAction::from_str("manual_adjustment");
        assert_eq!(parsed, Ok(InventoryAction::ManualAdjustment));
    }
}
