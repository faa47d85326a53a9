//! Appointment slot rules and calendar invites.
//!
//! Bookings are taken in Bogotá local time. Colombia does not observe
//! daylight saving, so a fixed UTC-5 offset stands in for the timezone
//! database.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc, Weekday};
use uuid::Uuid;

/// Bogotá is UTC-5 year-round.
const BOGOTA_OFFSET_HOURS: i32 = -5;

/// Days ahead considered for booking.
const BOOKING_WINDOW_DAYS: i64 = 20;

/// Appointment length in minutes.
const APPOINTMENT_MINUTES: i64 = 30;

/// Half-hour appointment slots in Bogotá local time. The midday gap is
/// the studio's lunch break.
pub const TIME_SLOTS: &[&str] = &[
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
];

/// Errors validating a booking request.
///
/// Messages are customer-facing (Spanish).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookingError {
    /// The requested time is not one of the offered slots.
    #[error("La hora seleccionada no está disponible")]
    InvalidSlot,
    /// The requested date is a weekend.
    #[error("Solo agendamos de lunes a viernes")]
    Weekend,
    /// The requested date is outside the booking window.
    #[error("La fecha debe estar dentro de los próximos {BOOKING_WINDOW_DAYS} días")]
    OutsideWindow,
    /// The slot is already booked.
    #[error("Ese horario ya está reservado")]
    SlotTaken,
}

/// The Bogotá UTC offset.
#[must_use]
pub fn bogota_offset() -> FixedOffset {
    // -5h is always within chrono's valid offset range
    FixedOffset::east_opt(BOGOTA_OFFSET_HOURS * 3600).expect("valid UTC offset")
}

/// Today's date in Bogotá.
#[must_use]
pub fn today_in_bogota() -> NaiveDate {
    Utc::now().with_timezone(&bogota_offset()).date_naive()
}

/// The offered slot times, parsed.
#[must_use]
pub fn slot_times() -> Vec<NaiveTime> {
    TIME_SLOTS
        .iter()
        .filter_map(|s| NaiveTime::parse_from_str(s, "%H:%M").ok())
        .collect()
}

/// Bookable dates: the next [`BOOKING_WINDOW_DAYS`] days after `today`,
/// weekends excluded.
#[must_use]
pub fn available_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=BOOKING_WINDOW_DAYS)
        .map(|i| today + Duration::days(i))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Validate a requested date and time against the booking rules.
///
/// # Errors
///
/// Returns `BookingError` when the slot is not offered, the date falls on
/// a weekend, or the date is outside the booking window.
pub fn validate_slot(today: NaiveDate, date: NaiveDate, time: NaiveTime) -> Result<(), BookingError> {
    if !slot_times().contains(&time) {
        return Err(BookingError::InvalidSlot);
    }

    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(BookingError::Weekend);
    }

    let days_ahead = (date - today).num_days();
    if days_ahead < 1 || days_ahead > BOOKING_WINDOW_DAYS {
        return Err(BookingError::OutsideWindow);
    }

    Ok(())
}

/// Convert a Bogotá-local date and time to the UTC instant.
#[must_use]
pub fn to_utc(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let local = date.and_time(time);
    match local.and_local_timezone(bogota_offset()) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        // Unreachable with a fixed offset, but chrono's API requires a branch
        chrono::LocalResult::None => Utc::now(),
    }
}

/// A calendar invite for a confirmed booking.
#[derive(Debug, Clone)]
pub struct CalendarInvite {
    pub customer_name: String,
    pub customer_email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Studio addresses copied on the invite.
    pub studio_attendees: Vec<String>,
}

impl CalendarInvite {
    /// Render the invite as an ICS document.
    ///
    /// A 30-minute `VEVENT` with the customer and the studio addresses as
    /// attendees, timestamps in UTC basic format.
    #[must_use]
    pub fn to_ics(&self) -> String {
        let start = to_utc(self.date, self.time);
        let end = start + Duration::minutes(APPOINTMENT_MINUTES);

        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//Solara//Scanner Facial//ES".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}@solara.com.co", Uuid::new_v4()),
            format!("DTSTART:{}", format_ics_datetime(start)),
            format!("DTEND:{}", format_ics_datetime(end)),
            format!("SUMMARY:Scanner Facial - {}", self.customer_name),
            format!(
                "DESCRIPTION:Cita de 30 minutos para análisis facial con scanner AI.\\n\\nCliente: {}\\nEmail: {}",
                self.customer_name, self.customer_email
            ),
            format!("ATTENDEE:MAILTO:{}", self.customer_email),
        ];

        for attendee in &self.studio_attendees {
            lines.push(format!("ATTENDEE:MAILTO:{attendee}"));
        }

        lines.push("STATUS:CONFIRMED".to_string());
        lines.push("SEQUENCE:0".to_string());
        lines.push("END:VEVENT".to_string());
        lines.push("END:VCALENDAR".to_string());

        lines.join("\r\n")
    }
}

/// UTC basic format for ICS: `YYYYMMDDTHHMMSSZ`.
fn format_ics_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_slot_times_parse_completely() {
        assert_eq!(slot_times().len(), TIME_SLOTS.len());
    }

    #[test]
    fn test_available_dates_exclude_weekends() {
        // 2026-08-07 is a Friday
        let dates = available_dates(date(2026, 8, 7));

        assert!(!dates.is_empty());
        assert!(
            dates
                .iter()
                .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        );
        // Saturday the 8th and Sunday the 9th are skipped
        assert_eq!(dates.first().copied(), Some(date(2026, 8, 10)));
    }

    #[test]
    fn test_validate_slot_accepts_weekday_slot() {
        let today = date(2026, 8, 7);
        assert_eq!(validate_slot(today, date(2026, 8, 10), time(9, 0)), Ok(()));
    }

    #[test]
    fn test_validate_slot_rejects_lunch_hour() {
        let today = date(2026, 8, 7);
        assert_eq!(
            validate_slot(today, date(2026, 8, 10), time(13, 0)),
            Err(BookingError::InvalidSlot)
        );
    }

    #[test]
    fn test_validate_slot_rejects_weekend() {
        let today = date(2026, 8, 7);
        assert_eq!(
            validate_slot(today, date(2026, 8, 8), time(9, 0)),
            Err(BookingError::Weekend)
        );
    }

    #[test]
    fn test_validate_slot_rejects_today_and_past() {
        let today = date(2026, 8, 7);
        assert_eq!(
            validate_slot(today, today, time(9, 0)),
            Err(BookingError::OutsideWindow)
        );
        assert_eq!(
            validate_slot(today, date(2026, 8, 6), time(9, 0)),
            Err(BookingError::OutsideWindow)
        );
    }

    #[test]
    fn test_validate_slot_rejects_beyond_window() {
        let today = date(2026, 8, 7);
        assert_eq!(
            validate_slot(today, date(2026, 9, 7), time(9, 0)),
            Err(BookingError::OutsideWindow)
        );
    }

    #[test]
    fn test_to_utc_applies_bogota_offset() {
        // 09:00 in Bogotá is 14:00 UTC
        let utc = to_utc(date(2026, 8, 10), time(9, 0));
        assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2026-08-10 14:00");
    }

    #[test]
    fn test_ics_contains_event_fields() {
        let invite = CalendarInvite {
            customer_name: "Ana María".to_string(),
            customer_email: "ana@example.com".to_string(),
            date: date(2026, 8, 10),
            time: time(10, 30),
            studio_attendees: vec!["hola@solara.com.co".to_string()],
        };

        let ics = invite.to_ics();

        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.ends_with("END:VCALENDAR"));
        assert!(ics.contains("SUMMARY:Scanner Facial - Ana María"));
        // 10:30 Bogotá -> 15:30 UTC, 30-minute event
        assert!(ics.contains("DTSTART:20260810T153000Z"));
        assert!(ics.contains("DTEND:20260810T160000Z"));
        assert!(ics.contains("ATTENDEE:MAILTO:ana@example.com"));
        assert!(ics.contains("ATTENDEE:MAILTO:hola@solara.com.co"));
        assert!(ics.contains("STATUS:CONFIRMED"));
    }

    #[test]
    fn test_ics_lines_are_crlf_separated() {
        let invite = CalendarInvite {
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            date: date(2026, 8, 10),
            time: time(9, 0),
            studio_attendees: vec![],
        };

        assert!(invite.to_ics().contains("\r\n"));
    }
}
