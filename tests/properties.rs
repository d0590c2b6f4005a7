use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use cron_next::{Field, FieldSet, FixedClock, Resolver, Schedule, ScheduleError};
use proptest::collection::btree_set;
use proptest::prelude::*;

fn arb_field() -> impl Strategy<Value = Field> {
    prop_oneof![
        Just(Field::Minute),
        Just(Field::Hour),
        Just(Field::DayOfMonth),
        Just(Field::Month),
        Just(Field::DayOfWeek),
    ]
}

/// Any minute between 2000 and 2099, days capped at 28 so every month is valid.
fn arb_reference() -> impl Strategy<Value = NaiveDateTime> {
    (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(
        |(year, month, day, hour, minute)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap()
        },
    )
}

fn arb_expression() -> impl Strategy<Value = String> {
    fn list(field: Field) -> impl Strategy<Value = String> {
        prop_oneof![
            Just("*".to_string()),
            btree_set(field.domain(), 1..4).prop_map(|values| {
                values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            }),
        ]
    }
    (
        list(Field::Minute),
        list(Field::Hour),
        list(Field::DayOfMonth),
        list(Field::Month),
        list(Field::DayOfWeek),
    )
        .prop_map(|(m, h, d, mo, w)| format!("{m} {h} {d} {mo} {w}"))
}

fn resolve(schedule: Schedule, now: NaiveDateTime) -> Result<NaiveDateTime, ScheduleError> {
    Resolver::with_clock(schedule, FixedClock(now)).next_occurrence()
}

proptest! {
    #[test]
    fn wildcard_expands_to_whole_domain(field in arb_field()) {
        let set = FieldSet::expand(field, "*").unwrap();
        prop_assert!(set.is_wildcard());
        prop_assert_eq!(field.domain().collect::<Vec<_>>(), set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn next_greater_matches_linear_scan(
        values in btree_set(0u32..60, 1..20),
        probe in 0u32..60,
    ) {
        let set = FieldSet::new(Field::Minute, values.iter().copied()).unwrap();
        let expected = values.iter().copied().find(|v| *v > probe);
        prop_assert_eq!(expected, set.next_greater(probe));
        prop_assert_eq!(values.iter().next().copied(), Some(set.min()));
        prop_assert_eq!(values.iter().next_back().copied(), Some(set.max()));
    }

    #[test]
    fn all_wildcards_is_the_following_minute(reference in arb_reference()) {
        let schedule: Schedule = "* * * * *".parse().unwrap();
        prop_assert_eq!(Ok(reference + Duration::minutes(1)), resolve(schedule, reference));
    }

    #[test]
    fn february_thirtieth_always_fails(reference in arb_reference()) {
        let schedule: Schedule = "* * 30 2 *".parse().unwrap();
        match resolve(schedule, reference) {
            Err(ScheduleError::InvalidDate { year, month, day }) => {
                prop_assert!(year == reference.year() || year == reference.year() + 1);
                prop_assert_eq!((2, 30), (month, day));
            }
            other => prop_assert!(false, "expected an invalid date, got {:?}", other),
        }
    }

    #[test]
    fn resolution_is_idempotent(expression in arb_expression(), reference in arb_reference()) {
        let schedule: Schedule = expression.parse().unwrap();
        let resolver = Resolver::with_clock(schedule, FixedClock(reference));
        prop_assert_eq!(resolver.next_occurrence(), resolver.next_occurrence());
    }
}
