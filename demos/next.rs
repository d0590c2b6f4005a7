use chrono::NaiveDate;
use cron_next::{FixedClock, Resolver, Schedule};
use std::str::FromStr;

fn main() {
    let now = NaiveDate::from_ymd_opt(2014, 2, 15)
        .unwrap()
        .and_hms_opt(12, 15, 0)
        .unwrap();

    //            min   hour   day of month   month   day of week
    let expressions = [
        "30   *      *              *       *",
        "0    *      *              *       *",
        "*    *      31             *       *",
        "30   16     1              3       *",
        "0    9      *              *       0,4",
        "*    *      30             2       *",
    ];

    println!("Reference time: {}", now);
    for expression in expressions.iter() {
        let schedule = Schedule::from_str(expression).unwrap();
        let canonical = schedule.to_string();
        match Resolver::with_clock(schedule, FixedClock(now)).next_occurrence() {
            Ok(next) => println!("{:<16} next -> {}", canonical, next),
            Err(e) => println!("{:<16} error -> {}", canonical, e),
        }
    }
}

/*
Reference time: 2014-02-15 12:15:00
30 * * * *       next -> 2014-02-15 12:30:00
0 * * * *        next -> 2014-02-15 13:00:00
* * 31 * *       next -> 2014-03-31 00:00:00
30 16 1 3 *      next -> 2014-03-01 16:30:00
0 9 * * 0,4      next -> 2014-02-17 09:00:00
* * 30 2 *       error -> Invalid calendar date 2015-02-30
*/
