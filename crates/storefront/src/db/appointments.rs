//! Appointment repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;

use solara_core::{AppointmentId, AppointmentStatus, CustomerId};

use super::RepositoryError;
use crate::models::{Appointment, NewAppointment};

const APPOINTMENT_COLUMNS: &str = "id, customer_id, customer_name, appointment_date, \
     appointment_time, service, skin_problems, current_routine, desired_results, \
     status, notes, customer_photo_url, created_at, updated_at";

/// Repository for appointment database operations.
pub struct AppointmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AppointmentRepository<'a> {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new appointment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewAppointment) -> Result<Appointment, RepositoryError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "INSERT INTO appointment
                 (customer_id, customer_name, appointment_date, appointment_time,
                  service, skin_problems, current_routine, desired_results)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(new.customer_id)
        .bind(&new.customer_name)
        .bind(new.appointment_date)
        .bind(new.appointment_time)
        .bind(&new.service)
        .bind(new.skin_problems.as_deref())
        .bind(new.current_routine.as_deref())
        .bind(new.desired_results.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(appointment)
    }

    /// Get an appointment by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointment WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(appointment)
    }

    /// List a customer's appointments, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointment
             WHERE customer_id = $1
             ORDER BY appointment_date ASC, appointment_time ASC"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(appointments)
    }

    /// Whether a slot on a date is already taken by a non-cancelled booking.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_slot_taken(
        &self,
        date: NaiveDate,
        time: chrono::NaiveTime,
    ) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1::bigint FROM appointment
             WHERE appointment_date = $1 AND appointment_time = $2 AND status <> 'cancelled'
             LIMIT 1",
        )
        .bind(date)
        .bind(time)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Update the status of an appointment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the appointment doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE appointment SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(status)
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
