use crate::clock::{FixedClock, SystemClock};
use crate::errors::{ParseScheduleError, ScheduleError};
use crate::field::{Field, FieldSet};
use crate::resolver::Resolver;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// A validated five field schedule: minute, hour, day of month, month and day of week.
///
/// Each field is either `*` or a comma separated list of integers within the field's range.
/// Day of week runs from 0 (Monday) to 6 (Sunday).
///
/// ```rust
/// use cron_next::Schedule;
///
/// let schedule: Schedule = "30 16 1 3 *".parse().unwrap();
/// assert_eq!("30 16 1 3 *", schedule.to_string());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Schedule {
    minutes: FieldSet,
    hours: FieldSet,
    days_of_month: FieldSet,
    months: FieldSet,
    days_of_week: FieldSet,
}

impl Schedule {
    /// Builds a schedule from already expanded field sets, checking each one is in its place.
    pub fn new(
        minutes: FieldSet,
        hours: FieldSet,
        days_of_month: FieldSet,
        months: FieldSet,
        days_of_week: FieldSet,
    ) -> Result<Self, ParseScheduleError> {
        check_field(&minutes, Field::Minute)?;
        check_field(&hours, Field::Hour)?;
        check_field(&days_of_month, Field::DayOfMonth)?;
        check_field(&months, Field::Month)?;
        check_field(&days_of_week, Field::DayOfWeek)?;
        Ok(Schedule {
            minutes,
            hours,
            days_of_month,
            months,
            days_of_week,
        })
    }

    pub fn minutes(&self) -> &FieldSet {
        &self.minutes
    }

    pub fn hours(&self) -> &FieldSet {
        &self.hours
    }

    pub fn days_of_month(&self) -> &FieldSet {
        &self.days_of_month
    }

    pub fn months(&self) -> &FieldSet {
        &self.months
    }

    pub fn days_of_week(&self) -> &FieldSet {
        &self.days_of_week
    }

    /// Next occurrence relative to the current system time.
    pub fn next_occurrence(&self) -> Result<NaiveDateTime, ScheduleError> {
        Resolver::new(self.clone()).next_occurrence()
    }

    /// Next occurrence relative to `reference`, reading the system clock for the
    /// windows that depend on the current date.
    pub fn next_occurrence_from(
        &self,
        reference: &NaiveDateTime,
    ) -> Result<NaiveDateTime, ScheduleError> {
        Resolver::with_clock(self.clone(), SystemClock)
            .with_reference(*reference)
            .next_occurrence()
    }

    /// Next occurrence relative to `reference` as if the current time were `reference`.
    pub fn next_occurrence_at(
        &self,
        reference: &NaiveDateTime,
    ) -> Result<NaiveDateTime, ScheduleError> {
        Resolver::with_clock(self.clone(), FixedClock(*reference)).next_occurrence()
    }
}

fn check_field(set: &FieldSet, expected: Field) -> Result<(), ParseScheduleError> {
    if set.field() == expected {
        Ok(())
    } else {
        Err(ParseScheduleError::FieldMismatch {
            expected,
            found: set.field(),
        })
    }
}

impl FromStr for Schedule {
    type Err = ParseScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        match fields.as_slice() {
            [minutes, hours, days_of_month, months, days_of_week] => Ok(Schedule {
                minutes: FieldSet::expand(Field::Minute, minutes)?,
                hours: FieldSet::expand(Field::Hour, hours)?,
                days_of_month: FieldSet::expand(Field::DayOfMonth, days_of_month)?,
                months: FieldSet::expand(Field::Month, months)?,
                days_of_week: FieldSet::expand(Field::DayOfWeek, days_of_week)?,
            }),
            _ => Err(ParseScheduleError::ArgumentCount),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minutes, self.hours, self.days_of_month, self.months, self.days_of_week
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn parse_all_wildcards() {
        let schedule = Schedule::from_str("* * * * *").unwrap();
        assert!(schedule.minutes().is_wildcard());
        assert!(schedule.hours().is_wildcard());
        assert!(schedule.days_of_month().is_wildcard());
        assert!(schedule.months().is_wildcard());
        assert!(schedule.days_of_week().is_wildcard());
    }

    #[test]
    fn parse_lists() {
        let schedule: Schedule = "0,30 9,17 1,15 6 0,2,4".parse().unwrap();
        assert_eq!(vec![0, 30], schedule.minutes().iter().collect::<Vec<_>>());
        assert_eq!(vec![9, 17], schedule.hours().iter().collect::<Vec<_>>());
        assert_eq!(vec![1, 15], schedule.days_of_month().iter().collect::<Vec<_>>());
        assert_eq!(vec![6], schedule.months().iter().collect::<Vec<_>>());
        assert_eq!(vec![0, 2, 4], schedule.days_of_week().iter().collect::<Vec<_>>());
        assert_eq!("0,30 9,17 1,15 6 0,2,4", schedule.to_string());
    }

    #[test]
    fn parse_invalid() {
        assert_eq!(
            Err(ParseScheduleError::ArgumentCount),
            Schedule::from_str("* * * *")
        );
        assert_eq!(
            Err(ParseScheduleError::ArgumentCount),
            Schedule::from_str("0 * * * * *")
        );
        assert_eq!(
            Err(ParseScheduleError::OutOfRange {
                field: Field::Hour,
                value: 24,
                min: 0,
                max: 23
            }),
            Schedule::from_str("0 24 * * *")
        );
        assert_eq!(
            Err(ParseScheduleError::InvalidValue {
                field: Field::Month,
                value: "Jan".into()
            }),
            Schedule::from_str("0 0 1 Jan *")
        );
        assert_eq!(
            Err(ParseScheduleError::InvalidValue {
                field: Field::Minute,
                value: "*/5".into()
            }),
            Schedule::from_str("*/5 * * * *")
        );
    }

    #[test]
    fn new_checks_positions() {
        let err = Schedule::new(
            FieldSet::all(Field::Hour),
            FieldSet::all(Field::Hour),
            FieldSet::all(Field::DayOfMonth),
            FieldSet::all(Field::Month),
            FieldSet::all(Field::DayOfWeek),
        )
        .unwrap_err();
        assert_eq!(
            ParseScheduleError::FieldMismatch {
                expected: Field::Minute,
                found: Field::Hour
            },
            err
        );

        let schedule = Schedule::new(
            FieldSet::new(Field::Minute, vec![30]).unwrap(),
            FieldSet::all(Field::Hour),
            FieldSet::all(Field::DayOfMonth),
            FieldSet::all(Field::Month),
            FieldSet::all(Field::DayOfWeek),
        )
        .unwrap();
        assert_eq!(Ok(schedule), "30 * * * *".parse());
    }

    #[test]
    fn next_occurrence_at() {
        let schedule: Schedule = "30 * * * *".parse().unwrap();
        assert_eq!(
            Ok(at(2014, 2, 15, 12, 30)),
            schedule.next_occurrence_at(&at(2014, 2, 15, 12, 15))
        );
    }
}
