use crate::clock::{Clock, SystemClock};
use crate::errors::ScheduleError;
use crate::schedule::Schedule;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, warn};

/// The window in which the next occurrence falls, together with the value each window looks
/// up for the unit it advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    /// Same date and hour, a later minute.
    Hour { minute: u32 },
    /// Same date, a later hour.
    Day { hour: u32 },
    /// Day of month and month are both `*`, the day of week alone picks the date.
    WeekdayOnly(NaiveDate),
    /// Same month, a later day.
    Month { day: u32 },
    /// Same year, a later month.
    Year { month: u32 },
    /// Nothing left this year.
    Rollover,
}

type Predicate<C> = fn(&Resolver<C>) -> Option<Window>;

/// Resolves the next occurrence of a [`Schedule`] relative to a fixed reference time.
///
/// The reference time is captured when the resolver is built and never advances, so repeated
/// calls to [`Resolver::next_occurrence`] return the same result for as long as the clock
/// reports the same date.
///
/// ```rust
/// use chrono::NaiveDate;
/// use cron_next::{FixedClock, Resolver, Schedule};
///
/// let now = NaiveDate::from_ymd_opt(2014, 2, 15).unwrap().and_hms_opt(12, 15, 0).unwrap();
/// let schedule: Schedule = "30 16 1 3 *".parse().unwrap();
/// let next = Resolver::with_clock(schedule, FixedClock(now)).next_occurrence().unwrap();
/// assert_eq!(NaiveDate::from_ymd_opt(2014, 3, 1).unwrap().and_hms_opt(16, 30, 0).unwrap(), next);
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<C = SystemClock> {
    schedule: Schedule,
    reference: NaiveDateTime,
    clock: C,
}

impl Resolver<SystemClock> {
    /// A resolver referenced to the current system time.
    pub fn new(schedule: Schedule) -> Self {
        Self::with_clock(schedule, SystemClock)
    }
}

impl<C> Resolver<C>
where
    C: Clock,
{
    /// A resolver referenced to `clock.now()`, reading `clock` for the current date.
    pub fn with_clock(schedule: Schedule, clock: C) -> Self {
        let reference = clock.now();
        Resolver {
            schedule,
            reference,
            clock,
        }
    }

    /// Replaces the reference time.
    pub fn with_reference(mut self, reference: NaiveDateTime) -> Self {
        self.reference = reference;
        self
    }

    pub fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The next timestamp, at minute resolution, matching the schedule.
    ///
    /// Fails with [`ScheduleError::InvalidDate`] when the resolved year, month and day do not
    /// name a real date, e.g. the 30th of February. The date is never adjusted.
    pub fn next_occurrence(&self) -> Result<NaiveDateTime, ScheduleError> {
        let window = self.window();
        debug!(?window, reference = %self.reference, "selected resolution window");

        let reference = &self.reference;
        let schedule = &self.schedule;

        let minute = match window {
            Window::Hour { minute } => minute,
            _ => schedule.minutes().min(),
        };

        let hour = match window {
            Window::Hour { .. } => reference.hour(),
            Window::Day { hour } => hour,
            _ => schedule.hours().min(),
        };

        let day = match window {
            Window::Hour { .. } | Window::Day { .. } => reference.day(),
            Window::WeekdayOnly(date) => date.day(),
            Window::Month { day } => day,
            Window::Year { .. } | Window::Rollover => schedule.days_of_month().min(),
        };

        let month = match window {
            Window::Hour { .. } | Window::Day { .. } | Window::Month { .. } => reference.month(),
            Window::WeekdayOnly(date) => date.month(),
            Window::Year { month } => month,
            Window::Rollover => schedule.months().min(),
        };

        let year = match window {
            Window::Hour { .. }
            | Window::Day { .. }
            | Window::Month { .. }
            | Window::Year { .. } => reference.year(),
            Window::WeekdayOnly(date) => date.year(),
            Window::Rollover => reference.year() + 1,
        };

        let invalid = || ScheduleError::InvalidDate { year, month, day };
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            warn!(year, month, day, schedule = %schedule, "resolved date does not exist");
            invalid()
        })?;
        // hour and minute always come from validated field sets
        let occurrence = date.and_hms_opt(hour, minute, 0).ok_or_else(invalid)?;

        debug!(%occurrence, "resolved next occurrence");
        Ok(occurrence)
    }

    fn window(&self) -> Window {
        // evaluated in order, the first window found wins
        let predicates: [Predicate<C>; 5] = [
            Self::within_hour_window,
            Self::within_day_window,
            Self::weekday_only_window,
            Self::within_month_window,
            Self::within_year_window,
        ];
        predicates
            .iter()
            .find_map(|predicate| predicate(self))
            .unwrap_or(Window::Rollover)
    }

    /// Month, day of month and day of week of the reference time all match.
    fn date_matches(&self) -> bool {
        let reference = &self.reference;
        self.schedule.months().contains(reference.month())
            && self.schedule.days_of_month().contains(reference.day())
            && self
                .schedule
                .days_of_week()
                .contains(reference.weekday().num_days_from_monday())
    }

    /// Only open when resolving for today's date, as reported by the clock.
    fn within_hour_window(&self) -> Option<Window> {
        let reference = &self.reference;
        let minutes = self.schedule.minutes();
        if self.date_matches()
            && reference.date() == self.clock.now().date()
            && self.schedule.hours().contains(reference.hour())
            && reference.minute() < minutes.max()
        {
            minutes
                .next_greater(reference.minute())
                .map(|minute| Window::Hour { minute })
        } else {
            None
        }
    }

    fn within_day_window(&self) -> Option<Window> {
        let hours = self.schedule.hours();
        if self.date_matches() && self.reference.hour() < hours.max() {
            hours
                .next_greater(self.reference.hour())
                .map(|hour| Window::Day { hour })
        } else {
            None
        }
    }

    fn all_dates_wildcard(&self) -> bool {
        self.schedule.days_of_month().is_wildcard() && self.schedule.months().is_wildcard()
    }

    fn weekday_only_window(&self) -> Option<Window> {
        if self.all_dates_wildcard() {
            Some(Window::WeekdayOnly(self.next_weekday_date()))
        } else {
            None
        }
    }

    /// The next listed day of month is past the end of the reference month.
    fn day_out_of_range(&self) -> bool {
        let reference = &self.reference;
        self.schedule
            .days_of_month()
            .next_greater(reference.day())
            .map_or(false, |day| {
                day > days_in_month(reference.month(), reference.year())
            })
    }

    fn within_month_window(&self) -> Option<Window> {
        let reference = &self.reference;
        let days = self.schedule.days_of_month();
        if self.schedule.months().contains(reference.month())
            && reference.day() < days.max()
            && !self.day_out_of_range()
        {
            days.next_greater(reference.day())
                .map(|day| Window::Month { day })
        } else {
            None
        }
    }

    fn within_year_window(&self) -> Option<Window> {
        self.schedule
            .months()
            .next_greater(self.reference.month())
            .map(|month| Window::Year { month })
    }

    /// Date of the next listed day of week after the reference day of week, placed in the
    /// clock's current week (Monday first) or the week after when it wraps around.
    fn next_weekday_date(&self) -> NaiveDate {
        let days_of_week = self.schedule.days_of_week();
        let current = self.reference.weekday().num_days_from_monday();
        // none exactly when current is at or past the largest listed day
        let target = days_of_week
            .next_greater(current)
            .unwrap_or_else(|| days_of_week.min());
        let offset = if target <= current { 7 } else { 0 };

        let today = self.clock.now().date();
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        week_start + Duration::days(i64::from(target) + offset)
    }
}

/// Leap-year aware length of `month`, taken from the day before the first of the next month.
fn days_in_month(month: u32, year: i32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}
