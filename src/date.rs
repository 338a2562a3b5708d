use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The next day the canteens serve on, starting from (and including) the
/// given day: weekdays that are not public holidays in North
/// Rhine-Westphalia. Closures for operational reasons are not knowable
/// here.
pub fn next_serving_day(from: NaiveDate) -> NaiveDate {
    let mut day = from;
    while is_weekend(day) || is_nrw_holiday(day) {
        day += Duration::days(1);
    }
    day
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Public holidays observed in North Rhine-Westphalia, where all of the
/// canteens are located.
fn is_nrw_holiday(day: NaiveDate) -> bool {
    if matches!(
        (day.month(), day.day()),
        (1, 1) | (5, 1) | (10, 3) | (11, 1) | (12, 25) | (12, 26)
    ) {
        return true;
    }
    let easter = easter_sunday(day.year());
    // Good Friday, Easter Monday, Ascension, Whit Monday, Corpus Christi
    matches!(
        day.signed_duration_since(easter).num_days(),
        -2 | 1 | 39 | 50 | 60
    )
}

/// Easter Sunday in the Gregorian calendar (anonymous Gregorian
/// algorithm).
fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .expect("the computus always yields a date in March or April")
}
