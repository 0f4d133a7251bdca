use crate::errors::AppError;
use crate::models::{ChartSelection, Day, StatsDocument};
use crate::series::ViewerOffset;
use serde::Deserialize;

pub const DEFAULT_DAY: Day = Day::Monday;

/// Raw selection as the page sends it.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub tool: Option<String>,
    pub day: Option<String>,
    pub tz_offset: Option<i32>,
}

impl SelectionQuery {
    /// Falls back to the first tool and to Monday, the same defaults the
    /// page's controls start on. Returns `None` when the document has no
    /// tools to pick from.
    pub fn selection(&self, stats: &StatsDocument) -> Result<Option<ChartSelection>, AppError> {
        let day = match self.day.as_deref().filter(|day| !day.trim().is_empty()) {
            Some(day) => day
                .parse::<Day>()
                .map_err(|err| AppError::bad_request(err.to_string()))?,
            None => DEFAULT_DAY,
        };

        let tool = match self.tool.as_deref().filter(|tool| !tool.is_empty()) {
            Some(tool) => tool.to_string(),
            None => match stats.tool_names().next() {
                Some(first) => first.to_string(),
                None => return Ok(None),
            },
        };

        Ok(Some(ChartSelection { tool, day }))
    }

    pub fn offset(&self) -> Result<ViewerOffset, AppError> {
        match self.tz_offset {
            Some(minutes) => ViewerOffset::from_minutes_west(minutes),
            None => Ok(ViewerOffset::server_local()),
        }
    }
}
