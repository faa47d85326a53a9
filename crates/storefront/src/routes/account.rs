//! Account route handlers.
//!
//! Identity is external; the account view is keyed by the customer email
//! and joins the profile with bookings, orders, and scan history.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use solara_core::Email;

use crate::db::{AppointmentRepository, CustomerRepository, OrderRepository, ScanRepository};
use crate::error::{AppError, Result};
use crate::models::{Appointment, Customer, HistoricScan, Order};
use crate::state::AppState;

/// The full account view.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub customer: Customer,
    pub appointments: Vec<Appointment>,
    pub orders: Vec<Order>,
    pub scans: Vec<HistoricScan>,
}

/// Profile, appointments, orders, and scans for a customer email.
#[instrument(skip(state), fields(email = %email))]
pub async fn show(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AccountResponse>> {
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(format!("Email: {e}")))?;

    let customer = CustomerRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer: {email}")))?;

    let appointments = AppointmentRepository::new(state.pool())
        .list_for_customer(customer.id)
        .await?;
    let orders = OrderRepository::new(state.pool())
        .list_for_customer(customer.id)
        .await?;
    // Older scans predate the profile and are linked by email only
    let scans = ScanRepository::new(state.pool())
        .list_for_email(&email)
        .await?;

    Ok(Json(AccountResponse {
        customer,
        appointments,
        orders,
        scans,
    }))
}
