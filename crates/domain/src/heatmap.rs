use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::{WorkoutRecord, date::start_of_week};

pub const WEEKS: usize = 12;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
    pub is_today: bool,
    pub is_future: bool,
}

/// Workouts per day of the last twelve weeks.
///
/// Weeks start on Sunday. The last week is the current week, so that cells following today
/// are marked as future and never counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    pub weeks: Vec<[HeatmapCell; DAYS_PER_WEEK]>,
}

impl Heatmap {
    pub fn cells(&self) -> impl Iterator<Item = &HeatmapCell> {
        self.weeks.iter().flat_map(|w| w.iter())
    }

    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.cells().map(|c| c.count).max().unwrap_or(0)
    }
}

#[must_use]
pub fn activity_heatmap(records: &[WorkoutRecord], today: NaiveDate) -> Heatmap {
    let counts = workouts_per_day(records);
    let first = start_of_week(today)
        .checked_sub_days(Days::new(((WEEKS - 1) * DAYS_PER_WEEK) as u64))
        .unwrap_or(today);

    let weeks = (0..WEEKS)
        .map(|week| {
            std::array::from_fn(|day| {
                let date = first
                    .checked_add_days(Days::new((week * DAYS_PER_WEEK + day) as u64))
                    .unwrap_or(first);
                let is_future = date > today;
                HeatmapCell {
                    date,
                    count: if is_future {
                        0
                    } else {
                        counts.get(&date).copied().unwrap_or(0)
                    },
                    is_today: date == today,
                    is_future,
                }
            })
        })
        .collect();

    Heatmap { weeks }
}

/// Number of consecutive days with at least one workout, ending today.
///
/// A day without workout ends the streak. Today is an exception: if no workout has been
/// logged yet today, the streak ending yesterday is still current.
#[must_use]
pub fn current_streak(records: &[WorkoutRecord], today: NaiveDate) -> u32 {
    let counts = workouts_per_day(records);
    let mut streak = 0;
    let mut day = today;

    if !counts.contains_key(&day) {
        let Some(yesterday) = day.pred_opt() else {
            return 0;
        };
        day = yesterday;
    }

    while counts.contains_key(&day) {
        streak += 1;
        let Some(previous) = day.pred_opt() else {
            break;
        };
        day = previous;
    }

    streak
}

fn workouts_per_day(records: &[WorkoutRecord]) -> BTreeMap<NaiveDate, u32> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.workout_date.date()).or_insert(0) += 1;
    }
    counts
}
