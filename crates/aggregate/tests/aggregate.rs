//! Aggregation driven through string-parsed step and method, as the command
//! line does it.

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use hydrots_aggregate::{AggregateError, Method, aggregate};
use hydrots_calendar::{CalendarError, Step};
use hydrots_series::Series;

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn leap_february_daily_to_monthly() {
    let mut s = Series::new("precip");
    let mut ts = dt(2020, 1, 1);
    while ts < dt(2020, 4, 1) {
        s.add_node(ts, 1.0).unwrap();
        ts += TimeDelta::days(1);
    }
    let step: Step = "M".parse().unwrap();
    let method: Method = "Sum".parse().unwrap();
    let out = aggregate(&s, step, dt(2020, 1, 1), method, false).unwrap();
    assert_eq!(out.dates(), vec![dt(2020, 1, 1), dt(2020, 2, 1), dt(2020, 3, 1)]);
    assert_relative_eq!(out.values()[0], 31.0);
    assert_relative_eq!(out.values()[1], 29.0);
    assert_relative_eq!(out.values()[2], 31.0);
    assert_eq!(out.title, "precip (M)");
}

#[test]
fn hourly_mean_with_gaps_and_nan() {
    let mut s = Series::new("stage");
    s.add_node(dt(2020, 1, 1) + TimeDelta::minutes(10), 1.0).unwrap();
    s.add_node(dt(2020, 1, 1) + TimeDelta::minutes(50), f64::NAN).unwrap();
    s.add_node(dt(2020, 1, 1) + TimeDelta::minutes(55), 3.0).unwrap();
    s.add_node(dt(2020, 1, 1) + TimeDelta::hours(5), 7.0).unwrap();
    let out = aggregate(&s, Step::Hour, dt(2020, 1, 1), Method::LinearInterpolation, true).unwrap();
    assert_eq!(out.len(), 2);
    assert_relative_eq!(out.get(&dt(2020, 1, 1)).unwrap(), 2.0);
    assert_relative_eq!(out.get(&(dt(2020, 1, 1) + TimeDelta::hours(5))).unwrap(), 7.0);
}

#[test]
fn unknown_names_are_rejected() {
    assert!(matches!(
        "weekly".parse::<Step>(),
        Err(CalendarError::UnknownStep { .. })
    ));
    assert!(matches!(
        "Max".parse::<Method>(),
        Err(AggregateError::UnknownMethod { .. })
    ));
}
