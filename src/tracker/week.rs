use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Monday that starts ISO week `week_of_year` of `year`.
///
/// Week 1 is the week holding the year's first Thursday. The week number is
/// not range checked: 0, negative or large values walk into neighbouring
/// years. Returns `None` only when the date leaves chrono's calendar range.
pub fn first_date_of_week(year: i32, week_of_year: i32) -> Option<NaiveDate> {
    let jan_one = NaiveDate::from_ymd_opt(year, 1, 1)?;

    // Sunday-based ordinals put the offset in -2..=4
    let days_offset = i64::from(Weekday::Thu.num_days_from_sunday())
        - i64::from(jan_one.weekday().num_days_from_sunday());
    let first_thursday = jan_one.checked_add_signed(Duration::days(days_offset))?;

    let mut week = i64::from(week_of_year);
    // first_thursday already sits inside week 1
    if first_thursday.iso_week().week() == 1 {
        week -= 1;
    }

    first_thursday
        .checked_add_signed(Duration::try_days(week * 7)?)?
        .checked_sub_signed(Duration::days(3))
}

/// Inclusive Monday..=Sunday range of the week.
pub fn week_range(year: i32, week_of_year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let monday = first_date_of_week(year, week_of_year)?;
    let sunday = monday.checked_add_signed(Duration::days(6))?;
    Some((monday, sunday))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_week_of_2020_starts_in_december() {
        assert_eq!(first_date_of_week(2020, 1), Some(date(2019, 12, 30)));
    }

    #[test]
    fn every_week_of_2020_starts_on_monday() {
        for week in 1..=52 {
            let monday = first_date_of_week(2020, week).unwrap();
            assert_eq!(monday.weekday(), Weekday::Mon, "week {}", week);
        }
    }

    #[test]
    fn consecutive_weeks_are_seven_days_apart() {
        for year in [2015, 2020, 2021, 2022, 2026] {
            for week in 1..53 {
                let this = first_date_of_week(year, week).unwrap();
                let next = first_date_of_week(year, week + 1).unwrap();
                assert_eq!(next - this, Duration::days(7), "{} week {}", year, week);
            }
        }
    }

    #[test]
    fn matches_chrono_iso_calendar() {
        // covers every weekday Jan 1 can fall on
        for year in 2015..=2028 {
            for week in 1..=52 {
                let expected = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).unwrap();
                assert_eq!(
                    first_date_of_week(year, week as i32),
                    Some(expected),
                    "{} week {}",
                    year,
                    week
                );
            }
        }
    }

    #[test]
    fn jan_one_on_friday_moves_week_one_forward() {
        // 2021-01-01 is a Friday, so week 1 begins on the 4th
        assert_eq!(first_date_of_week(2021, 1), Some(date(2021, 1, 4)));
        // 2022-01-01 is a Saturday
        assert_eq!(first_date_of_week(2022, 1), Some(date(2022, 1, 3)));
    }

    #[test]
    fn out_of_range_weeks_are_not_rejected() {
        assert_eq!(first_date_of_week(2020, 0), Some(date(2019, 12, 23)));
        assert_eq!(first_date_of_week(2020, -1), Some(date(2019, 12, 16)));
        assert_eq!(first_date_of_week(2020, 60), Some(date(2021, 2, 15)));
    }

    #[test]
    fn unrepresentable_dates_yield_none() {
        assert_eq!(first_date_of_week(i32::MAX, 1), None);
        assert_eq!(first_date_of_week(2020, i32::MAX), None);
    }

    #[test]
    fn week_range_spans_monday_to_sunday() {
        let (monday, sunday) = week_range(2020, 32).unwrap();
        assert_eq!(monday, date(2020, 8, 3));
        assert_eq!(sunday, date(2020, 8, 9));
        assert_eq!(sunday.weekday(), Weekday::Sun);
    }
}
