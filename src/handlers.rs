use crate::chart::SvgBarChart;
use crate::errors::AppError;
use crate::models::{Day, DisplaySeries, ToolsResponse};
use crate::selection::{DEFAULT_DAY, SelectionQuery};
use crate::state::AppState;
use crate::ui::{IndexView, render_index};
use crate::widget::UsageChartWidget;
use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Html<String>, AppError> {
    let mut widget = UsageChartWidget::<SvgBarChart>::new(state.stats.clone(), query.offset()?);

    let mut selected_day = DEFAULT_DAY;
    if let Some(stats) = &state.stats {
        if let Some(selection) = query.selection(stats)? {
            selected_day = selection.day;
            widget.select(selection)?;
        }
    }

    let view = IndexView {
        tools: widget.tool_options(),
        selected_tool: widget.selection().map(|selection| selection.tool.as_str()),
        selected_day,
        last_updated: widget.last_updated(),
        error: state.load_error.as_deref(),
        chart_svg: widget.chart().map(|chart| chart.markup().to_string()),
    };
    Ok(Html(render_index(&view)))
}

pub async fn get_tools(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ToolsResponse>, AppError> {
    let widget = UsageChartWidget::<SvgBarChart>::new(state.stats.clone(), query.offset()?);

    Ok(Json(ToolsResponse {
        tools: widget.tool_options().into_iter().map(str::to_string).collect(),
        days: Day::ALL.to_vec(),
        updated: state.stats.as_ref().and_then(|stats| stats.updated),
        last_updated: widget.last_updated(),
        error: state.load_error.as_deref().map(str::to_string),
    }))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<DisplaySeries>, AppError> {
    let (_, series) = draw(&state, &query)?;
    Ok(Json(series))
}

pub async fn chart_svg(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (widget, _) = draw(&state, &query)?;
    let markup = widget
        .into_chart()
        .map(SvgBarChart::into_markup)
        .unwrap_or_default();
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], markup))
}

fn draw(
    state: &AppState,
    query: &SelectionQuery,
) -> Result<(UsageChartWidget<SvgBarChart>, DisplaySeries), AppError> {
    let stats = state.require_stats()?;
    let selection = query
        .selection(stats)?
        .ok_or_else(|| AppError::not_found("no tools in usage stats"))?;

    let mut widget = UsageChartWidget::new(state.stats.clone(), query.offset()?);
    let series = widget
        .select(selection)?
        .cloned()
        .ok_or_else(|| AppError::unavailable("usage stats are not available"))?;
    Ok((widget, series))
}
