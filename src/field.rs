use crate::errors::ParseScheduleError;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};
use std::ops::RangeInclusive;

static MINUTES: Lazy<BTreeSet<u32>> = Lazy::new(|| Field::Minute.domain().collect());
static HOURS: Lazy<BTreeSet<u32>> = Lazy::new(|| Field::Hour.domain().collect());
static DAYS: Lazy<BTreeSet<u32>> = Lazy::new(|| Field::DayOfMonth.domain().collect());
static MONTHS: Lazy<BTreeSet<u32>> = Lazy::new(|| Field::Month.domain().collect());
static DAYS_OF_WEEK: Lazy<BTreeSet<u32>> = Lazy::new(|| Field::DayOfWeek.domain().collect());

/// One of the five time units of a schedule.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Field {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    /// 0 = Monday through 6 = Sunday.
    DayOfWeek,
}

impl Field {
    pub const fn min(self) -> u32 {
        match self {
            Field::Minute | Field::Hour | Field::DayOfWeek => 0,
            Field::DayOfMonth | Field::Month => 1,
        }
    }

    pub const fn max(self) -> u32 {
        match self {
            Field::Minute => 59,
            Field::Hour => 23,
            Field::DayOfMonth => 31,
            Field::Month => 12,
            Field::DayOfWeek => 6,
        }
    }

    /// Every valid value of this unit, ascending.
    pub fn domain(self) -> RangeInclusive<u32> {
        self.min()..=self.max()
    }

    fn all(self) -> &'static BTreeSet<u32> {
        match self {
            Field::Minute => &MINUTES,
            Field::Hour => &HOURS,
            Field::DayOfMonth => &DAYS,
            Field::Month => &MONTHS,
            Field::DayOfWeek => &DAYS_OF_WEEK,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day-of-month",
            Field::Month => "month",
            Field::DayOfWeek => "day-of-week",
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
enum TimeRange {
    All,
    Constrained(BTreeSet<u32>),
}

/// The accepted values of a single [`Field`]: either the wildcard or an explicit, non-empty
/// ascending set of in-range integers.
///
/// A `FieldSet` is immutable once built. An explicit list covering the whole domain is still
/// not a wildcard; only `*` (or [`FieldSet::all`]) produces one.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FieldSet {
    field: Field,
    range: TimeRange,
}

impl FieldSet {
    /// The wildcard set for `field`.
    pub fn all(field: Field) -> Self {
        Self {
            field,
            range: TimeRange::All,
        }
    }

    /// An explicit set of values. Duplicates collapse; order does not matter.
    pub fn new<I>(field: Field, values: I) -> Result<Self, ParseScheduleError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut set = BTreeSet::new();
        for value in values {
            if !field.domain().contains(&value) {
                return Err(ParseScheduleError::OutOfRange {
                    field,
                    value,
                    min: field.min(),
                    max: field.max(),
                });
            }
            set.insert(value);
        }
        if set.is_empty() {
            return Err(ParseScheduleError::EmptyField(field));
        }
        Ok(Self {
            field,
            range: TimeRange::Constrained(set),
        })
    }

    /// Expands a raw field string, either `*` or a comma separated list of integers.
    pub fn expand(field: Field, raw: &str) -> Result<Self, ParseScheduleError> {
        let raw = raw.trim();
        if raw == "*" {
            return Ok(Self::all(field));
        }

        let mut values = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            let value = token
                .parse::<u32>()
                .map_err(|_| ParseScheduleError::InvalidValue {
                    field,
                    value: token.into(),
                })?;
            values.push(value);
        }
        Self::new(field, values)
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.range, TimeRange::All)
    }

    fn values(&self) -> &BTreeSet<u32> {
        match &self.range {
            TimeRange::All => self.field.all(),
            TimeRange::Constrained(set) => set,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.values().iter().copied()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values().contains(&value)
    }

    pub fn min(&self) -> u32 {
        // sets are never empty, the fallback is unreachable
        self.iter().next().unwrap_or_else(|| self.field.min())
    }

    pub fn max(&self) -> u32 {
        self.iter().next_back().unwrap_or_else(|| self.field.max())
    }

    /// Smallest value strictly greater than `value`, if any.
    pub fn next_greater(&self, value: u32) -> Option<u32> {
        self.values()
            .range((Excluded(value), Unbounded))
            .next()
            .copied()
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            TimeRange::All => f.write_str("*"),
            TimeRange::Constrained(set) => {
                for (i, value) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}
