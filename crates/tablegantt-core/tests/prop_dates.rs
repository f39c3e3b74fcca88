//! Property-based tests for day-granularity date arithmetic.

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use tablegantt_core::date::{add_days, days_between, format_date, monday_of, parse_date};
use tablegantt_core::DateRange;

/// Any date between 1900 and 2199.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..109_572).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

proptest! {
    #[test]
    fn parse_inverts_format(d in arb_date()) {
        prop_assert_eq!(parse_date(&format_date(d)).unwrap(), d);
    }

    #[test]
    fn days_between_same_day_is_one(d in arb_date()) {
        prop_assert_eq!(days_between(d, d), 1);
    }

    #[test]
    fn add_days_matches_days_between(d in arb_date(), n in 0i64..2000) {
        prop_assert_eq!(days_between(d, add_days(d, n)), n + 1);
        prop_assert_eq!(add_days(add_days(d, n), -n), d);
    }

    #[test]
    fn monday_of_is_a_monday_within_the_week(d in arb_date()) {
        let monday = monday_of(d);
        prop_assert_eq!(monday.weekday(), Weekday::Mon);
        prop_assert!(monday <= d);
        prop_assert!(days_between(monday, d) <= 7);
    }

    #[test]
    fn range_iteration_length_matches_days(d in arb_date(), n in 0i64..400) {
        let range = DateRange::new(d, add_days(d, n)).unwrap();
        prop_assert_eq!(range.iter_days().count() as i64, range.days());
    }
}
