//! Booking route handlers for facial-scanner appointments.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use solara_core::Email;

use crate::db::{AppointmentRepository, CustomerRepository};
use crate::error::{AppError, Result};
use crate::models::{Appointment, NewAppointment};
use crate::services::booking::{
    BookingError, CalendarInvite, TIME_SLOTS, available_dates, today_in_bogota, validate_slot,
};
use crate::state::AppState;

/// The only service currently bookable.
const SCANNER_SERVICE: &str = "Scanner Facial";

/// Available dates and time slots.
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub dates: Vec<NaiveDate>,
    pub times: &'static [&'static str],
}

/// Bookable dates (next 20 weekdays, Bogotá time) and the slot grid.
#[instrument]
pub async fn slots() -> Json<SlotsResponse> {
    Json(SlotsResponse {
        dates: available_dates(today_in_bogota()),
        times: TIME_SLOTS,
    })
}

/// Booking request body.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub skin_problems: Option<String>,
    pub current_routine: Option<String>,
    pub desired_results: Option<String>,
}

/// Book an appointment.
///
/// Validates the slot, upserts the customer profile by email, inserts the
/// appointment, and returns the calendar invite.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<Value>> {
    let email =
        Email::parse(&body.email).map_err(|e| AppError::BadRequest(format!("Email: {e}")))?;

    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("El nombre es obligatorio".to_string()));
    }

    validate_slot(today_in_bogota(), body.date, body.time)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let appointments = AppointmentRepository::new(state.pool());
    if appointments.is_slot_taken(body.date, body.time).await? {
        return Err(AppError::BadRequest(BookingError::SlotTaken.to_string()));
    }

    let customer = CustomerRepository::new(state.pool())
        .get_or_create(body.name.trim(), &email)
        .await?;

    let appointment = appointments
        .create(&NewAppointment {
            customer_id: Some(customer.id),
            customer_name: customer.name.clone(),
            appointment_date: body.date,
            appointment_time: body.time,
            service: SCANNER_SERVICE.to_string(),
            skin_problems: body.skin_problems,
            current_routine: body.current_routine,
            desired_results: body.desired_results,
        })
        .await?;

    let invite = CalendarInvite {
        customer_name: customer.name,
        customer_email: email.into_inner(),
        date: body.date,
        time: body.time,
        studio_attendees: state.config().booking.attendee_emails.clone(),
    };

    Ok(Json(json!({
        "message": "¡Cita agendada! Revisa tu correo para la invitación.",
        "appointment": appointment,
        "ics": invite.to_ics(),
    })))
}

/// Query parameters for listing bookings.
#[derive(Debug, Deserialize)]
pub struct BookingsParams {
    pub email: String,
}

/// A customer's appointments, soonest first.
///
/// An unknown email yields an empty list rather than an error.
#[instrument(skip(state), fields(email = %params.email))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<BookingsParams>,
) -> Result<Json<Vec<Appointment>>> {
    let email =
        Email::parse(&params.email).map_err(|e| AppError::BadRequest(format!("Email: {e}")))?;

    let Some(customer) = CustomerRepository::new(state.pool())
        .get_by_email(&email)
        .await?
    else {
        return Ok(Json(Vec::new()));
    };

    let appointments = AppointmentRepository::new(state.pool())
        .list_for_customer(customer.id)
        .await?;

    Ok(Json(appointments))
}
