use crate::errors::LoadError;
use crate::models::StatsDocument;
use reqwest::Client;
use std::{env, fmt, path::PathBuf};
use tokio::fs;
use tracing::info;

pub const DEFAULT_STATS_URL: &str =
    "http://tinker-access.s3-website-us-east-1.amazonaws.com/tinker-access-stats.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for StatsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsSource::Url(url) => f.write_str(url),
            StatsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn resolve_stats_source() -> StatsSource {
    if let Ok(path) = env::var("STATS_PATH") {
        return StatsSource::File(PathBuf::from(path));
    }
    if let Ok(url) = env::var("STATS_URL") {
        return StatsSource::Url(url);
    }

    StatsSource::Url(DEFAULT_STATS_URL.to_string())
}

pub async fn fetch_stats(source: &StatsSource) -> Result<StatsDocument, LoadError> {
    let bytes = match source {
        StatsSource::Url(url) => {
            let client = Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()?;
            let response = client.get(url).send().await?.error_for_status()?;
            response.bytes().await?.to_vec()
        }
        StatsSource::File(path) => fs::read(path).await.map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?,
    };

    let stats = parse_stats(&bytes)?;
    info!(source = %source, tools = stats.tools.len(), "loaded usage stats");
    Ok(stats)
}

/// Parses a stats body, served as JSON or as plain text.
pub fn parse_stats(bytes: &[u8]) -> Result<StatsDocument, LoadError> {
    let stats: StatsDocument = serde_json::from_slice(bytes)?;
    validate(&stats)?;
    Ok(stats)
}

fn validate(stats: &StatsDocument) -> Result<(), LoadError> {
    for (tool, days) in &stats.tools {
        for (day, usage) in days {
            if let Some((hour, value)) = usage
                .iter()
                .enumerate()
                .find(|(_, value)| !(0.0..=1.0).contains(*value))
            {
                return Err(LoadError::OutOfRange {
                    tool: tool.clone(),
                    day: *day,
                    hour,
                    value: *value,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    fn body(monday: &str) -> String {
        format!(r#"{{"Laser": {{"Monday": {monday}}}, "updated": 1700000000}}"#)
    }

    fn day_of(value: &str) -> String {
        format!("[{}]", vec![value; 24].join(","))
    }

    #[test]
    fn parse_accepts_fractions() {
        let stats = parse_stats(body(&day_of("0.5")).as_bytes()).unwrap();
        assert_eq!(stats.usage("Laser", Day::Monday), Some(&[0.5; 24]));
    }

    #[test]
    fn parse_rejects_out_of_range_values() {
        let mut cells = vec!["0.1"; 24];
        cells[7] = "1.5";
        let day = format!("[{}]", cells.join(","));

        match parse_stats(body(&day).as_bytes()) {
            Err(LoadError::OutOfRange { tool, day, hour, value }) => {
                assert_eq!(tool, "Laser");
                assert_eq!(day, Day::Monday);
                assert_eq!(hour, 7);
                assert_eq!(value, 1.5);
            }
            other => panic!("expected out of range, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            parse_stats(b"<html>not json</html>"),
            Err(LoadError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn fetch_reports_missing_file() {
        let source = StatsSource::File(PathBuf::from("/nonexistent/tool_usage/stats.json"));
        assert!(matches!(
            fetch_stats(&source).await,
            Err(LoadError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn fetch_reads_file_source() {
        let mut path = std::env::temp_dir();
        path.push(format!("tool_usage_loader_{}.json", std::process::id()));
        tokio::fs::write(&path, body(&day_of("0"))).await.unwrap();

        let stats = fetch_stats(&StatsSource::File(path.clone())).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(stats.updated, Some(1_700_000_000));
        assert_eq!(stats.tool_names().collect::<Vec<_>>(), vec!["Laser"]);
    }

    #[test]
    fn source_displays_location() {
        assert_eq!(
            StatsSource::Url("http://x/stats.json".to_string()).to_string(),
            "http://x/stats.json"
        );
        assert_eq!(StatsSource::File(PathBuf::from("data/s.json")).to_string(), "data/s.json");
    }
}
