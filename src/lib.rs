//! # Cron Next
//!
//! Computes the single next occurrence of a five field cron-like schedule relative to a
//! reference time.
//!
//! ```text
//! min   hour   day of month   month   day of week
//! *     *      *              *       *
//! ```
//!
//! Each field is either `*` or a comma separated list of integers:
//! - minute 0-59
//! - hour 0-23
//! - day of month 1-31
//! - month 1-12
//! - day of week 0-6, 0 being Monday
//!
//! When both day of month and month are `*` the day of week alone decides the date.
//! A schedule whose next date does not exist, such as the 30th of February, is an error
//! rather than being moved to a nearby date.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cron_next::{FixedClock, Resolver, Schedule};
//!
//! let now = NaiveDate::from_ymd_opt(2014, 2, 15)
//!     .unwrap()
//!     .and_hms_opt(12, 15, 0)
//!     .unwrap();
//!
//! let schedule: Schedule = "0 * * * *".parse().unwrap();
//! let next = Resolver::with_clock(schedule, FixedClock(now))
//!     .next_occurrence()
//!     .unwrap();
//! assert_eq!("2014-02-15 13:00:00", next.to_string());
//!
//! let schedule: Schedule = "* * 30 2 *".parse().unwrap();
//! assert!(schedule.next_occurrence_at(&now).is_err());
//! ```
mod clock;
mod errors;
mod field;
mod resolver;
mod schedule;

#[doc(inline)]
pub use clock::{Clock, FixedClock, SystemClock};

#[doc(inline)]
pub use errors::{ParseScheduleError, ScheduleError};

#[doc(inline)]
pub use field::{Field, FieldSet};

#[doc(inline)]
pub use resolver::Resolver;

#[doc(inline)]
pub use schedule::Schedule;
