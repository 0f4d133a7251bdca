use crate::errors::AppError;
use crate::models::{ChartSelection, HOURS, HourlyUsage};
use chrono::{DateTime, FixedOffset, Local};

pub const HOUR_LABELS: [&str; HOURS] = [
    "Midnight", "1am", "2am", "3am", "4am", "5am", "6am", "7am", "8am", "9am", "10am", "11am",
    "noon", "1pm", "2pm", "3pm", "4pm", "5pm", "6pm", "7pm", "8pm", "9pm", "10pm", "11pm",
];

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// The viewer's distance from UTC in minutes, positive west of Greenwich
/// (the sign convention of `Date.getTimezoneOffset()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerOffset {
    minutes_west: i32,
}

impl ViewerOffset {
    pub const UTC: ViewerOffset = ViewerOffset { minutes_west: 0 };

    pub fn from_minutes_west(minutes_west: i32) -> Result<Self, AppError> {
        if !(-MAX_OFFSET_MINUTES + 1..MAX_OFFSET_MINUTES).contains(&minutes_west) {
            return Err(AppError::bad_request(format!(
                "tz_offset must be within ±{MAX_OFFSET_MINUTES} minutes"
            )));
        }
        Ok(Self { minutes_west })
    }

    pub fn from_fixed(offset: FixedOffset) -> Self {
        Self {
            minutes_west: (-offset.local_minus_utc()).div_euclid(60),
        }
    }

    /// Offset of the machine serving the page, used when the browser did
    /// not report one.
    pub fn server_local() -> Self {
        Self::from_fixed(*Local::now().offset())
    }

    pub fn minutes_west(self) -> i32 {
        self.minutes_west
    }

    /// Whole hours to add to a local hour to reach its UTC bucket. Half-hour
    /// zones floor, so each local hour reads the UTC bucket holding its start.
    pub fn hour_shift(self) -> i32 {
        self.minutes_west.div_euclid(60)
    }

    pub fn fixed(self) -> Option<FixedOffset> {
        FixedOffset::west_opt(self.minutes_west * 60)
    }
}

pub fn rotate<T: Copy>(source: &[T; HOURS], shift: i32) -> [T; HOURS] {
    std::array::from_fn(|i| source[(i as i32 + shift).rem_euclid(HOURS as i32) as usize])
}

/// Percentages per local hour for a day of UTC-indexed usage fractions.
pub fn display_values(usage: &HourlyUsage, offset: ViewerOffset) -> [f64; HOURS] {
    rotate(usage, offset.hour_shift()).map(|fraction| fraction * 100.0)
}

pub fn chart_title(selection: &ChartSelection) -> String {
    format!("{} usage history on {}s", selection.tool, selection.day)
}

pub fn last_updated_label(updated: i64, offset: ViewerOffset) -> Option<String> {
    let fixed = offset.fixed()?;
    let at = DateTime::from_timestamp(updated, 0)?.with_timezone(&fixed);
    Some(format!("Last updated {}", at.format("%A %-d %B %Y, %H:%M")))
}
