//! # Derived Analytics
//!
//! Pure functions over store contents. Nothing here is cached; callers
//! recompute from the current state whenever they need a value.
//!
//! Dates are calendar dates in the device's local timezone. Use
//! [`local_date`] to turn a stored timestamp into one.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use shared::{ActiveProtocol, DailyItch, ProtocolProgress, WeeklySummary};
use std::collections::BTreeSet;

/// Calendar date of `timestamp` on the device clock
pub fn local_date(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Number of consecutive days with at least one check-in, anchored at
/// `today` or, if nothing was logged today yet, at yesterday.
///
/// Several check-ins on one date count once. Dates after `today` are ignored.
pub fn calculate_streak<I>(check_in_dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let distinct: BTreeSet<NaiveDate> = check_in_dates
        .into_iter()
        .filter(|date| *date <= today)
        .collect();
    let mut descending = distinct.into_iter().rev();

    let Some(most_recent) = descending.next() else {
        return 0;
    };
    let yesterday = today.checked_sub_days(Days::new(1));
    if most_recent != today && Some(most_recent) != yesterday {
        return 0;
    }

    let mut streak = 1;
    for (offset, date) in (1u64..).zip(descending) {
        match most_recent.checked_sub_days(Days::new(offset)) {
            Some(expected) if expected == date => streak += 1,
            _ => break,
        }
    }
    streak
}

/// Completion ratio of a protocol, clamped to 0.0..=1.0 for ring and bar rendering
pub fn protocol_progress(protocol: &ActiveProtocol) -> ProtocolProgress {
    let ratio = if protocol.total_days > 0 {
        (protocol.current_day as f32 / protocol.total_days as f32).clamp(0.0, 1.0)
    } else {
        0.0
    };

    ProtocolProgress {
        name: protocol.name.clone(),
        current_day: protocol.current_day,
        total_days: protocol.total_days,
        ratio,
    }
}

/// Per-day and overall itch aggregates for the `window_days` ending at `today`.
///
/// `check_ins` are (local date, itch level) pairs; `flare_dates` are local dates.
pub fn weekly_summary(
    check_ins: &[(NaiveDate, u8)],
    flare_dates: &[NaiveDate],
    today: NaiveDate,
    window_days: u32,
) -> WeeklySummary {
    let window_days = window_days.max(1);
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days - 1)))
        .unwrap_or(NaiveDate::MIN);

    let days: Vec<DailyItch> = start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| {
            let levels: Vec<u8> = check_ins
                .iter()
                .filter(|(check_in_date, _)| *check_in_date == date)
                .map(|(_, itch_level)| *itch_level)
                .collect();
            DailyItch {
                date,
                check_in_count: levels.len(),
                average_itch: average(&levels),
            }
        })
        .collect();

    let in_window: Vec<u8> = check_ins
        .iter()
        .filter(|(date, _)| (start..=today).contains(date))
        .map(|(_, itch_level)| *itch_level)
        .collect();
    let flare_count = flare_dates
        .iter()
        .filter(|date| (start..=today).contains(*date))
        .count();

    WeeklySummary {
        days,
        average_itch: average(&in_window),
        check_in_count: in_window.len(),
        flare_count,
    }
}

fn average(levels: &[u8]) -> Option<f32> {
    if levels.is_empty() {
        return None;
    }
    let total: u32 = levels.iter().map(|level| u32::from(*level)).sum();
    Some(total as f32 / levels.len() as f32)
}
