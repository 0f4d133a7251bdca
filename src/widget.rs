use crate::chart::ChartSurface;
use crate::errors::RenderError;
use crate::models::{ChartSelection, DisplaySeries, StatsDocument};
use crate::renderer::render;
use crate::series::{ViewerOffset, last_updated_label};
use std::sync::Arc;

/// Owns everything one page view needs: the loaded document, the current
/// selection and the chart drawn for it.
pub struct UsageChartWidget<C> {
    stats: Option<Arc<StatsDocument>>,
    offset: ViewerOffset,
    selection: Option<ChartSelection>,
    series: Option<DisplaySeries>,
    chart: Option<C>,
}

impl<C: ChartSurface> UsageChartWidget<C> {
    pub fn new(stats: Option<Arc<StatsDocument>>, offset: ViewerOffset) -> Self {
        Self {
            stats,
            offset,
            selection: None,
            series: None,
            chart: None,
        }
    }

    /// Tool choices in display order; empty until a document has loaded.
    pub fn tool_options(&self) -> Vec<&str> {
        match &self.stats {
            Some(stats) => stats.tool_names().collect(),
            None => Vec::new(),
        }
    }

    pub fn last_updated(&self) -> Option<String> {
        let updated = self.stats.as_ref()?.updated?;
        last_updated_label(updated, self.offset)
    }

    pub fn select(&mut self, selection: ChartSelection) -> Result<Option<&DisplaySeries>, RenderError> {
        let Some(stats) = &self.stats else {
            return Ok(None);
        };

        let series = render(&mut self.chart, stats, &selection, self.offset)?;
        self.selection = Some(selection);
        self.series = Some(series);
        Ok(self.series.as_ref())
    }

    pub fn selection(&self) -> Option<&ChartSelection> {
        self.selection.as_ref()
    }

    pub fn chart(&self) -> Option<&C> {
        self.chart.as_ref()
    }

    pub fn into_chart(self) -> Option<C> {
        self.chart
    }
}
