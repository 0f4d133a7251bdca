use crate::chart::{ChartData, ChartKind, ChartOptions, ChartSurface, Dataset};
use crate::errors::RenderError;
use crate::models::{ChartSelection, DisplaySeries, StatsDocument};
use crate::series::{HOUR_LABELS, ViewerOffset, chart_title, display_values};

pub const DATASET_LABEL: &str = "% In Use";
pub const Y_AXIS_MAX: f64 = 100.0;

pub fn display_series(
    stats: &StatsDocument,
    selection: &ChartSelection,
    offset: ViewerOffset,
) -> Result<DisplaySeries, RenderError> {
    let tool = stats
        .tools
        .get(&selection.tool)
        .ok_or_else(|| RenderError::UnknownTool(selection.tool.clone()))?;
    let usage = tool.get(&selection.day).ok_or_else(|| RenderError::MissingDay {
        tool: selection.tool.clone(),
        day: selection.day,
    })?;

    Ok(DisplaySeries {
        tool: selection.tool.clone(),
        day: selection.day,
        title: chart_title(selection),
        labels: HOUR_LABELS,
        values: display_values(usage, offset),
    })
}

/// Draws `selection` onto `chart`, building the chart on first use and
/// replacing its dataset and title in place afterwards.
pub fn render<C: ChartSurface>(
    chart: &mut Option<C>,
    stats: &StatsDocument,
    selection: &ChartSelection,
    offset: ViewerOffset,
) -> Result<DisplaySeries, RenderError> {
    let series = display_series(stats, selection, offset)?;

    match chart {
        Some(existing) => {
            existing.data_mut().dataset.data = series.values.to_vec();
            existing.options_mut().title = series.title.clone();
            existing.update();
        }
        None => {
            let data = ChartData {
                labels: HOUR_LABELS.iter().map(|label| label.to_string()).collect(),
                dataset: Dataset {
                    label: DATASET_LABEL.to_string(),
                    border_width: 1,
                    data: series.values.to_vec(),
                },
            };
            let options = ChartOptions {
                title: series.title.clone(),
                y_max: Y_AXIS_MAX,
            };
            *chart = Some(C::construct(ChartKind::Bar, data, options));
        }
    }

    Ok(series)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Day, HOURS, HourlyUsage, ToolStats};

    /// Records every call the renderer makes.
    #[derive(Debug)]
    pub(crate) struct RecordingChart {
        pub data: ChartData,
        pub options: ChartOptions,
        pub constructs: usize,
        pub updates: usize,
    }

    impl ChartSurface for RecordingChart {
        fn construct(_kind: ChartKind, data: ChartData, options: ChartOptions) -> Self {
            Self {
                data,
                options,
                constructs: 1,
                updates: 0,
            }
        }

        fn data_mut(&mut self) -> &mut ChartData {
            &mut self.data
        }

        fn options_mut(&mut self) -> &mut ChartOptions {
            &mut self.options
        }

        fn update(&mut self) {
            self.updates += 1;
        }
    }

    pub(crate) fn sample_stats() -> StatsDocument {
        let ramp: HourlyUsage = std::array::from_fn(|i| i as f64 / 100.0);
        let mut laser = ToolStats::new();
        laser.insert(Day::Monday, [0.0; HOURS]);
        laser.insert(Day::Tuesday, ramp);
        let mut lathe = ToolStats::new();
        lathe.insert(Day::Monday, [1.0; HOURS]);

        let mut stats = StatsDocument {
            updated: Some(1_700_000_000),
            ..StatsDocument::default()
        };
        stats.tools.insert("Laser".to_string(), laser);
        stats.tools.insert("Lathe".to_string(), lathe);
        stats
    }

    fn select(tool: &str, day: Day) -> ChartSelection {
        ChartSelection {
            tool: tool.to_string(),
            day,
        }
    }

    #[test]
    fn every_series_has_24_percentages() {
        let stats = sample_stats();
        for (tool, days) in &stats.tools {
            for day in days.keys() {
                for minutes in [-720, -330, 0, 300, 600] {
                    let offset = ViewerOffset::from_minutes_west(minutes).unwrap();
                    let series = display_series(&stats, &select(tool, *day), offset).unwrap();
                    assert_eq!(series.values.len(), HOURS);
                    assert!(series.values.iter().all(|v| (0.0..=100.0).contains(v)));
                }
            }
        }
    }

    #[test]
    fn zero_day_renders_zeros() {
        let stats = sample_stats();
        let series =
            display_series(&stats, &select("Laser", Day::Monday), ViewerOffset::UTC).unwrap();
        assert_eq!(series.values, [0.0; HOURS]);
        assert_eq!(series.labels[0], "Midnight");
        assert_eq!(series.labels[12], "noon");
    }

    #[test]
    fn unknown_tool_and_missing_day_are_errors() {
        let stats = sample_stats();
        assert_eq!(
            display_series(&stats, &select("Kiln", Day::Monday), ViewerOffset::UTC),
            Err(RenderError::UnknownTool("Kiln".to_string()))
        );
        assert_eq!(
            display_series(&stats, &select("Lathe", Day::Friday), ViewerOffset::UTC),
            Err(RenderError::MissingDay {
                tool: "Lathe".to_string(),
                day: Day::Friday,
            })
        );
        assert_eq!(
            display_series(&stats, &select("updated", Day::Monday), ViewerOffset::UTC),
            Err(RenderError::UnknownTool("updated".to_string()))
        );
    }

    #[test]
    fn chart_is_built_once_then_updated() {
        let stats = sample_stats();
        let mut chart: Option<RecordingChart> = None;

        render(&mut chart, &stats, &select("Laser", Day::Monday), ViewerOffset::UTC).unwrap();
        let built = chart.as_ref().unwrap();
        assert_eq!(built.constructs, 1);
        assert_eq!(built.updates, 0);
        assert_eq!(built.data.labels.len(), HOURS);
        assert_eq!(built.data.dataset.label, DATASET_LABEL);
        assert_eq!(built.options.title, "Laser usage history on Mondays");

        let offset = ViewerOffset::from_minutes_west(60).unwrap();
        let series = render(&mut chart, &stats, &select("Laser", Day::Tuesday), offset).unwrap();
        let updated = chart.as_ref().unwrap();
        assert_eq!(updated.constructs, 1);
        assert_eq!(updated.updates, 1);
        assert_eq!(updated.options.title, "Laser usage history on Tuesdays");
        assert_eq!(updated.data.dataset.data, series.values.to_vec());
        assert!((updated.data.dataset.data[0] - 1.0).abs() < 1e-9);

        render(&mut chart, &stats, &select("Lathe", Day::Monday), offset).unwrap();
        let updated = chart.as_ref().unwrap();
        assert_eq!(updated.updates, 2);
        assert_eq!(updated.options.title, "Lathe usage history on Mondays");
        assert_eq!(updated.data.dataset.data, vec![100.0; HOURS]);
    }

    #[test]
    fn failed_render_leaves_chart_untouched() {
        let stats = sample_stats();
        let mut chart: Option<RecordingChart> = None;
        render(&mut chart, &stats, &select("Laser", Day::Monday), ViewerOffset::UTC).unwrap();

        assert!(render(&mut chart, &stats, &select("Kiln", Day::Monday), ViewerOffset::UTC).is_err());
        let chart = chart.unwrap();
        assert_eq!(chart.updates, 0);
        assert_eq!(chart.options.title, "Laser usage history on Mondays");
    }
}
