use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub border_width: u32,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub dataset: Dataset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub y_max: f64,
}

/// A chart that is constructed once, then has its dataset and options
/// swapped before each redraw.
pub trait ChartSurface {
    fn construct(kind: ChartKind, data: ChartData, options: ChartOptions) -> Self
    where
        Self: Sized;

    fn data_mut(&mut self) -> &mut ChartData;

    fn options_mut(&mut self) -> &mut ChartOptions;

    fn update(&mut self);
}

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 300.0;
const PADDING_X: f64 = 44.0;
const PADDING_BOTTOM: f64 = 34.0;
const TOP: f64 = 40.0;
const TICKS: usize = 4;
const BAR_GAP: f64 = 0.2;

/// Bar chart drawn as inline SVG. Bars carry `data-hour` and the plot
/// bounds are published as `data-*` attributes on the root element so the
/// page script can resize bars without redrawing the chart.
#[derive(Debug, Clone)]
pub struct SvgBarChart {
    kind: ChartKind,
    data: ChartData,
    options: ChartOptions,
    markup: String,
    draws: u64,
}

impl SvgBarChart {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn into_markup(self) -> String {
        self.markup
    }

    fn draw(&mut self) {
        let bottom = HEIGHT - PADDING_BOTTOM;
        let plot_height = bottom - TOP;
        let y_max = if self.options.y_max > 0.0 { self.options.y_max } else { 1.0 };
        let count = self.data.dataset.data.len().max(1);
        let slot = (WIDTH - PADDING_X * 2.0) / count as f64;
        let bar_width = slot * (1.0 - BAR_GAP);
        let y = |value: f64| bottom - value.clamp(0.0, y_max) / y_max * plot_height;

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg id="chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{title}" data-top="{TOP}" data-bottom="{bottom}" data-max="{y_max}">"#,
            title = escape(&self.options.title),
        );
        let _ = write!(
            svg,
            r#"<text id="chart-heading" class="chart-title" x="{x}" y="22" text-anchor="middle">{title}</text>"#,
            x = WIDTH / 2.0,
            title = escape(&self.options.title),
        );

        for tick in 0..=TICKS {
            let value = y_max * tick as f64 / TICKS as f64;
            let y_pos = y(value);
            let _ = write!(
                svg,
                r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y_pos:.2}" x2="{x2}" y2="{y_pos:.2}" /><text class="chart-label" x="{lx}" y="{ly:.2}" text-anchor="end">{value}</text>"#,
                x2 = WIDTH - PADDING_X,
                lx = PADDING_X - 8.0,
                ly = y_pos + 4.0,
            );
        }

        let _ = write!(
            svg,
            r#"<g class="chart-bars" stroke-width="{}">"#,
            self.data.dataset.border_width
        );
        for (hour, value) in self.data.dataset.data.iter().enumerate() {
            let x = PADDING_X + hour as f64 * slot + (slot - bar_width) / 2.0;
            let top = y(*value);
            let _ = write!(
                svg,
                r#"<rect class="chart-bar" data-hour="{hour}" x="{x:.2}" y="{top:.2}" width="{bar_width:.2}" height="{height:.2}"><title>{value:.0}%</title></rect>"#,
                height = bottom - top,
            );
        }
        svg.push_str("</g>");

        let label_every = if self.data.labels.len() > 12 { 3 } else { 1 };
        for (index, label) in self.data.labels.iter().enumerate() {
            if index % label_every != 0 {
                continue;
            }
            let _ = write!(
                svg,
                r#"<text class="chart-label" x="{x:.2}" y="{y}" text-anchor="middle">{label}</text>"#,
                x = PADDING_X + (index as f64 + 0.5) * slot,
                y = bottom + 18.0,
                label = escape(label),
            );
        }

        let _ = write!(
            svg,
            r#"<text class="chart-legend" x="{x}" y="{y}">{label}</text></svg>"#,
            x = WIDTH - PADDING_X,
            y = HEIGHT - 4.0,
            label = escape(&self.data.dataset.label),
        );

        self.markup = svg;
        self.draws += 1;
    }
}

impl ChartSurface for SvgBarChart {
    fn construct(kind: ChartKind, data: ChartData, options: ChartOptions) -> Self {
        let mut chart = Self {
            kind,
            data,
            options,
            markup: String::new(),
            draws: 0,
        };
        chart.draw();
        chart
    }

    fn data_mut(&mut self) -> &mut ChartData {
        &mut self.data
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn update(&mut self) {
        self.draw();
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
