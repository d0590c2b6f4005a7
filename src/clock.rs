use chrono::{Local, NaiveDateTime};

/// Source of the current wall-clock time.
///
/// Resolution reads the clock as well as the reference time: the same-hour window only
/// applies when the reference date is the clock's date, and weekday-only schedules are
/// placed relative to the clock's current week.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The local system clock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
