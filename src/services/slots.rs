//! Slot generation and availability resolution
//!
//! Turns a location's weekly working hours into the list of bookable hourly
//! slots for one calendar date, marks the ones taken by confirmed bookings
//! and drops slots that have already passed.
//!
//! All calendar math is UTC end-to-end: weekday derivation, candidate
//! construction, the day-span booking query and the past-slot cutoff.
//! Working hours are therefore interpreted as UTC hours.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::{booking::Slot, location::WorkingHours},
    repository::{bookings::BookingsRepository, locations::LocationsRepository},
};

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Read access to a location's weekly schedule
#[async_trait]
pub trait LocationHours: Send + Sync {
    /// Working hours in precedence order, or `None` when the location
    /// does not exist
    async fn working_hours(&self, location_id: i32) -> AppResult<Option<Vec<WorkingHours>>>;
}

/// Read access to confirmed reservations
#[async_trait]
pub trait BookedSlots: Send + Sync {
    /// Slot instants of confirmed bookings for a location within
    /// `[from, to]` (both bounds inclusive)
    async fn confirmed_slots(
        &self,
        location_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<DateTime<Utc>>>;
}

#[async_trait]
impl LocationHours for LocationsRepository {
    async fn working_hours(&self, location_id: i32) -> AppResult<Option<Vec<WorkingHours>>> {
        self.get_working_hours(location_id).await
    }
}

#[async_trait]
impl BookedSlots for BookingsRepository {
    async fn confirmed_slots(
        &self,
        location_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<DateTime<Utc>>> {
        BookingsRepository::confirmed_slots(self, location_id, from, to).await
    }
}

/// Parse and validate a `YYYY-MM-DD` query parameter
pub fn parse_slot_date(date: &str) -> AppResult<NaiveDate> {
    if !DATE_FORMAT.is_match(date) {
        return Err(AppError::Validation(
            "Invalid date format. Use YYYY-MM-DD".to_string(),
        ));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid calendar date: {}", date)))
}

/// Weekday index of a date, 0=Sunday .. 6=Saturday
fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// The full calendar-day span of a date, both bounds inclusive
pub fn day_span(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

/// Generate the candidate slots for `date`: one per whole hour in the
/// matching working-hours range `[from, to)`, skipping instants that are
/// not strictly in the future relative to `now`.
///
/// `now` is captured once by the caller so the cutoff is consistent for
/// the whole sequence. The first entry matching the weekday wins; a
/// weekday with no entry (or an inverted range) yields no slots.
pub fn generate_slots(
    working_hours: &[WorkingHours],
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let weekday = weekday_index(date);
    let Some(hours) = working_hours.iter().find(|wh| wh.day == weekday) else {
        return Vec::new();
    };

    let day_start = date.and_time(NaiveTime::MIN).and_utc();
    let mut slots = Vec::new();
    for hour in hours.from..hours.to {
        let time = day_start + Duration::hours(hour as i64);
        if time <= now {
            continue;
        }
        slots.push(Slot { time, available: true });
    }

    slots
}

/// Flip candidates to unavailable when a confirmed booking occupies the
/// exact same instant. Matching is by timestamp equality, never by
/// hour-of-day, so bookings outside the date can not shadow a slot.
pub fn mark_booked(slots: &mut [Slot], booked: &[DateTime<Utc>]) {
    for slot in slots.iter_mut() {
        if booked.contains(&slot.time) {
            slot.available = false;
        }
    }
}

/// Computes slot availability from injected read-only stores.
///
/// Stateless between calls; every invocation reads fresh schedule and
/// booking data and the result is never cached.
#[derive(Clone)]
pub struct SlotsService {
    locations: Arc<dyn LocationHours>,
    bookings: Arc<dyn BookedSlots>,
}

impl SlotsService {
    pub fn new(locations: Arc<dyn LocationHours>, bookings: Arc<dyn BookedSlots>) -> Self {
        Self { locations, bookings }
    }

    /// Bookable slots for a location on a date, in ascending time order.
    ///
    /// An empty result means the location is closed that day (or every
    /// remaining slot lies in the past); it is not an error.
    pub async fn get_available_slots(&self, location_id: i32, date: &str) -> AppResult<Vec<Slot>> {
        let date = parse_slot_date(date)?;

        let working_hours = self
            .locations
            .working_hours(location_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", location_id)))?;

        let now = Utc::now();
        let mut slots = generate_slots(&working_hours, date, now);
        if slots.is_empty() {
            return Ok(slots);
        }

        let (day_start, day_end) = day_span(date);
        let booked = self
            .bookings
            .confirmed_slots(location_id, day_start, day_end)
            .await?;

        mark_booked(&mut slots, &booked);

        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::BookingStatus;
    use chrono::Days;

    fn wh(day: i16, from: i16, to: i16) -> WorkingHours {
        WorkingHours { day, from, to }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn at(date: NaiveDate, hour: i64) -> DateTime<Utc> {
        date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(hour)
    }

    /// A `now` long before any test date, so no candidate is filtered
    fn distant_past() -> DateTime<Utc> {
        at(date("2000-01-01"), 0)
    }

    // 2025-06-01 is a Sunday (weekday index 0), 2025-06-02 a Monday.
    const SUNDAY: &str = "2025-06-01";
    const MONDAY: &str = "2025-06-02";

    #[test]
    fn generates_one_slot_per_hour_in_range() {
        let hours = [wh(0, 10, 14)];
        let slots = generate_slots(&hours, date(SUNDAY), distant_past());

        assert_eq!(slots.len(), 4);
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.time, at(date(SUNDAY), 10 + i as i64));
            assert!(slot.available);
        }
    }

    #[test]
    fn closing_hour_is_excluded() {
        let hours = [wh(0, 10, 11)];
        let slots = generate_slots(&hours, date(SUNDAY), distant_past());

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].time, at(date(SUNDAY), 10));
    }

    #[test]
    fn no_entry_for_weekday_means_closed() {
        // Entry for Monday only; queried date is a Sunday
        let hours = [wh(1, 10, 22)];
        assert!(generate_slots(&hours, date(SUNDAY), distant_past()).is_empty());
    }

    #[test]
    fn empty_schedule_means_closed_every_day() {
        for day in ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-04"] {
            assert!(generate_slots(&[], date(day), distant_past()).is_empty());
        }
    }

    #[test]
    fn inverted_range_yields_no_slots() {
        let hours = [wh(0, 18, 10)];
        assert!(generate_slots(&hours, date(SUNDAY), distant_past()).is_empty());
    }

    #[test]
    fn first_entry_wins_on_duplicate_weekday() {
        let hours = [wh(0, 10, 12), wh(0, 8, 20)];
        let slots = generate_slots(&hours, date(SUNDAY), distant_past());

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].time, at(date(SUNDAY), 10));
        assert_eq!(slots[1].time, at(date(SUNDAY), 11));
    }

    #[test]
    fn past_and_current_slots_are_dropped() {
        let hours = [wh(0, 10, 14)];

        // Now is exactly the 12:00 candidate: 10, 11 and 12 are all gone
        let now = at(date(SUNDAY), 12);
        let slots = generate_slots(&hours, date(SUNDAY), now);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].time, at(date(SUNDAY), 13));

        for slot in &slots {
            assert!(slot.time > now);
        }
    }

    #[test]
    fn whole_day_in_the_past_yields_no_slots() {
        let hours = [wh(0, 10, 14)];
        let now = at(date(MONDAY), 9);
        assert!(generate_slots(&hours, date(SUNDAY), now).is_empty());
    }

    #[test]
    fn slots_are_ascending() {
        let hours = [wh(0, 8, 22)];
        let slots = generate_slots(&hours, date(SUNDAY), distant_past());

        assert!(slots.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn weekday_index_uses_sunday_zero() {
        assert_eq!(weekday_index(date(SUNDAY)), 0);
        assert_eq!(weekday_index(date(MONDAY)), 1);
        assert_eq!(weekday_index(date("2025-06-07")), 6);
    }

    #[test]
    fn day_span_covers_the_whole_day() {
        let (start, end) = day_span(date(SUNDAY));
        assert_eq!(start, at(date(SUNDAY), 0));
        assert_eq!(end, at(date(MONDAY), 0) - Duration::milliseconds(1));
    }

    #[test]
    fn marking_is_by_exact_instant() {
        let mut slots = vec![
            Slot { time: at(date(SUNDAY), 10), available: true },
            Slot { time: at(date(SUNDAY), 11), available: true },
        ];

        // Same hour-of-day on another date, and a mid-hour instant:
        // neither may shadow a candidate
        let booked = vec![
            at(date(MONDAY), 10),
            at(date(SUNDAY), 10) + Duration::minutes(30),
        ];
        mark_booked(&mut slots, &booked);
        assert!(slots.iter().all(|s| s.available));

        mark_booked(&mut slots, &[at(date(SUNDAY), 10)]);
        assert!(!slots[0].available);
        assert!(slots[1].available);
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["not-a-date", "2025/06/01", "20250601", "2025-6-1", ""] {
            assert!(matches!(parse_slot_date(bad), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert!(matches!(parse_slot_date("2025-02-30"), Err(AppError::Validation(_))));
        assert!(matches!(parse_slot_date("2025-13-01"), Err(AppError::Validation(_))));
    }

    #[test]
    fn accepts_valid_dates() {
        assert_eq!(parse_slot_date("2025-06-01").unwrap(), date(SUNDAY));
    }

    // -- Service-level tests against in-memory stores ----------------------

    struct FakeLocations {
        hours: Option<Vec<WorkingHours>>,
    }

    #[async_trait]
    impl LocationHours for FakeLocations {
        async fn working_hours(&self, _location_id: i32) -> AppResult<Option<Vec<WorkingHours>>> {
            Ok(self.hours.clone())
        }
    }

    struct FakeBookings {
        bookings: Vec<(DateTime<Utc>, BookingStatus)>,
    }

    #[async_trait]
    impl BookedSlots for FakeBookings {
        async fn confirmed_slots(
            &self,
            _location_id: i32,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> AppResult<Vec<DateTime<Utc>>> {
            Ok(self
                .bookings
                .iter()
                .filter(|(slot, status)| {
                    *status == BookingStatus::Confirmed && *slot >= from && *slot <= to
                })
                .map(|(slot, _)| *slot)
                .collect())
        }
    }

    fn service(
        hours: Option<Vec<WorkingHours>>,
        bookings: Vec<(DateTime<Utc>, BookingStatus)>,
    ) -> SlotsService {
        SlotsService::new(
            Arc::new(FakeLocations { hours }),
            Arc::new(FakeBookings { bookings }),
        )
    }

    /// A date far enough ahead that no generated slot is in the past,
    /// with its weekday index
    fn future_date() -> (String, i16) {
        let date = Utc::now().date_naive() + Days::new(14);
        (date.format("%Y-%m-%d").to_string(), weekday_index(date))
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let svc = service(None, vec![]);
        let err = svc.get_available_slots(99, "2025-06-01").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_date_is_rejected_by_the_service() {
        let svc = service(Some(vec![wh(0, 10, 22)]), vec![]);
        let err = svc.get_available_slots(1, "not-a-date").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn closed_day_returns_empty_not_error() {
        let (date_str, weekday) = future_date();
        // Schedule exists only for some other weekday
        let svc = service(Some(vec![wh((weekday + 1) % 7, 10, 22)]), vec![]);

        let slots = svc.get_available_slots(1, &date_str).await.unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn confirmed_booking_marks_slot_unavailable() {
        let (date_str, weekday) = future_date();
        let day = date(&date_str);

        let svc = service(
            Some(vec![wh(weekday, 10, 12)]),
            vec![(at(day, 10), BookingStatus::Confirmed)],
        );

        let slots = svc.get_available_slots(1, &date_str).await.unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].time, at(day, 10));
        assert!(!slots[0].available);
        assert_eq!(slots[1].time, at(day, 11));
        assert!(slots[1].available);
    }

    #[tokio::test]
    async fn cancelled_and_pending_bookings_do_not_occupy_slots() {
        let (date_str, weekday) = future_date();
        let day = date(&date_str);

        let svc = service(
            Some(vec![wh(weekday, 10, 12)]),
            vec![
                (at(day, 10), BookingStatus::Cancelled),
                (at(day, 11), BookingStatus::Pending),
            ],
        );

        let slots = svc.get_available_slots(1, &date_str).await.unwrap();
        assert!(slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn repeated_calls_yield_identical_sequences() {
        let (date_str, weekday) = future_date();
        let day = date(&date_str);

        let svc = service(
            Some(vec![wh(weekday, 9, 18)]),
            vec![(at(day, 12), BookingStatus::Confirmed)],
        );

        let first = svc.get_available_slots(1, &date_str).await.unwrap();
        let second = svc.get_available_slots(1, &date_str).await.unwrap();
        assert_eq!(first, second);
    }
}
