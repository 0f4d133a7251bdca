use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

pub const HOURS: usize = 24;

/// Fraction of each UTC hour (0-23) a tool was in use.
pub type HourlyUsage = [f64; HOURS];

pub type ToolStats = BTreeMap<Day, HourlyUsage>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDay(pub String);

impl fmt::Display for UnknownDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day '{}'", self.0)
    }
}

impl FromStr for Day {
    type Err = UnknownDay;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Day::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownDay(value.to_string()))
    }
}

/// The published stats file: one entry per tool plus the reserved
/// `updated` timestamp. The named field claims `updated` before the
/// flattened map sees the remaining keys, so it can never become a tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(flatten)]
    pub tools: BTreeMap<String, ToolStats>,
}

impl StatsDocument {
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn usage(&self, tool: &str, day: Day) -> Option<&HourlyUsage> {
        self.tools.get(tool)?.get(&day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSelection {
    pub tool: String,
    pub day: Day,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySeries {
    pub tool: String,
    pub day: Day,
    pub title: String,
    pub labels: [&'static str; HOURS],
    pub values: [f64; HOURS],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub tools: Vec<String>,
    pub days: Vec<Day>,
    pub updated: Option<i64>,
    pub last_updated: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(value: f64) -> String {
        let cells = vec![value.to_string(); HOURS];
        format!("[{}]", cells.join(","))
    }

    #[test]
    fn parse_keeps_updated_out_of_tools() {
        let json = format!(
            r#"{{"Laser": {{"Monday": {}}}, "Lathe": {{"Friday": {}}}, "updated": 1700000000}}"#,
            hours(0.25),
            hours(0.0)
        );
        let doc: StatsDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(doc.updated, Some(1_700_000_000));
        assert_eq!(doc.tool_names().collect::<Vec<_>>(), vec!["Laser", "Lathe"]);
        assert_eq!(doc.usage("Laser", Day::Monday).unwrap()[3], 0.25);
        assert!(doc.usage("Laser", Day::Tuesday).is_none());
        assert!(doc.usage("updated", Day::Monday).is_none());
    }

    #[test]
    fn parse_without_updated() {
        let json = format!(r#"{{"Laser": {{"Sunday": {}}}}}"#, hours(1.0));
        let doc: StatsDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.updated, None);
        assert_eq!(doc.tools.len(), 1);
    }

    #[test]
    fn parse_rejects_short_day() {
        let json = r#"{"Laser": {"Monday": [0.1, 0.2]}}"#;
        assert!(serde_json::from_str::<StatsDocument>(json).is_err());
    }

    #[test]
    fn parse_rejects_unknown_day() {
        let json = format!(r#"{{"Laser": {{"Funday": {}}}}}"#, hours(0.0));
        assert!(serde_json::from_str::<StatsDocument>(&json).is_err());
    }

    #[test]
    fn day_from_str_is_case_insensitive() {
        assert_eq!("monday".parse::<Day>(), Ok(Day::Monday));
        assert_eq!(" SUNDAY ".parse::<Day>(), Ok(Day::Sunday));
        assert_eq!("Mon".parse::<Day>(), Err(UnknownDay("Mon".to_string())));
    }
}
