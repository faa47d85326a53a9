//! Facial-scanner appointment model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use solara_core::{AppointmentId, AppointmentStatus, CustomerId};

/// A booked facial-scanner appointment.
///
/// Date and time are stored as the customer picked them (Bogotá local
/// time); the UTC instant is derived when building calendar invites.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    /// Service booked (currently always "Scanner Facial").
    pub service: String,
    pub skin_problems: Option<String>,
    pub current_routine: Option<String>,
    pub desired_results: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub customer_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub service: String,
    pub skin_problems: Option<String>,
    pub current_routine: Option<String>,
    pub desired_results: Option<String>,
}
