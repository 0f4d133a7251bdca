use crate::chart::escape;
use crate::models::Day;

pub struct IndexView<'a> {
    pub tools: Vec<&'a str>,
    pub selected_tool: Option<&'a str>,
    pub selected_day: Day,
    pub last_updated: Option<String>,
    pub error: Option<&'a str>,
    pub chart_svg: Option<String>,
}

pub fn render_index(view: &IndexView<'_>) -> String {
    let tool_options: String = view
        .tools
        .iter()
        .map(|tool| option(tool, view.selected_tool == Some(*tool)))
        .collect();
    let day_options: String = Day::ALL
        .iter()
        .map(|day| option(day.name(), *day == view.selected_day))
        .collect();
    let banner = match view.error {
        Some(message) => format!(
            r#"<div class="banner" role="alert">Usage stats could not be loaded: {}</div>"#,
            escape(message)
        ),
        None => String::new(),
    };
    let chart = view
        .chart_svg
        .clone()
        .unwrap_or_else(|| r#"<p class="empty">No usage data to show.</p>"#.to_string());

    let updated = escape(view.last_updated.as_deref().unwrap_or_default());
    fill(
        INDEX_HTML,
        &[
            ("BANNER", &banner),
            ("TOOL_OPTIONS", &tool_options),
            ("DAY_OPTIONS", &day_options),
            ("UPDATED", &updated),
            ("CHART", &chart),
        ],
    )
}

/// Substitutes `{{NAME}}` slots in one pass over the template, so inserted
/// text is never scanned for further slots.
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let slot = after.find("}}").and_then(|end| {
            slots
                .iter()
                .find(|(name, _)| *name == &after[..end])
                .map(|(_, value)| (end, *value))
        });
        match slot {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn option(value: &str, selected: bool) -> String {
    let value = escape(value);
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{value}</option>"#)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tool Usage</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    select {
      font: inherit;
      text-transform: none;
      letter-spacing: normal;
      color: var(--ink);
      padding: 10px 14px;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
      min-width: 200px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    #chart {
      width: 100%;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-title {
      fill: var(--accent-2);
      font-size: 15px;
      font-weight: 600;
    }

    .chart-bar {
      fill: rgba(255, 107, 74, 0.55);
      stroke: var(--accent);
      transition: y 200ms ease, height 200ms ease;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label,
    .chart-legend {
      fill: #7a746d;
      font-size: 11px;
    }

    .chart-legend {
      text-anchor: end;
    }

    .banner {
      background: #fbe3df;
      color: #c63b2b;
      border-radius: 14px;
      padding: 12px 16px;
    }

    .status {
      font-size: 0.95rem;
      color: #c63b2b;
      min-height: 1.2em;
    }

    .hint,
    .empty {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Tool Usage</h1>
      <p class="subtitle" id="updated">{{UPDATED}}</p>
    </header>

    {{BANNER}}

    <form class="controls" method="get" action="/">
      <label>Tool
        <select id="tool-select" name="tool">{{TOOL_OPTIONS}}</select>
      </label>
      <label>Day
        <select id="day-select" name="day">{{DAY_OPTIONS}}</select>
      </label>
      <noscript><button type="submit">Show</button></noscript>
    </form>

    <div class="chart-card" id="chart-card">{{CHART}}</div>

    <div class="status" id="status"></div>
    <p class="hint">Each bar is the share of that hour the tool was in use, shown in your local time.</p>
  </main>

  <script>
    const toolSelect = document.getElementById('tool-select');
    const daySelect = document.getElementById('day-select');
    const updatedEl = document.getElementById('updated');
    const statusEl = document.getElementById('status');
    const tzOffset = new Date().getTimezoneOffset();

    const query = () => new URLSearchParams({
      tool: toolSelect.value,
      day: daySelect.value,
      tz_offset: tzOffset
    });

    const applySeries = (series) => {
      const chartEl = document.getElementById('chart');
      if (!chartEl) {
        return;
      }
      const top = Number(chartEl.dataset.top);
      const bottom = Number(chartEl.dataset.bottom);
      const max = Number(chartEl.dataset.max);
      chartEl.querySelectorAll('.chart-bar').forEach((bar) => {
        const value = series.values[Number(bar.dataset.hour)];
        const clamped = Math.min(Math.max(value, 0), max);
        const y = bottom - (clamped / max) * (bottom - top);
        bar.setAttribute('y', y.toFixed(2));
        bar.setAttribute('height', (bottom - y).toFixed(2));
        bar.querySelector('title').textContent = `${Math.round(value)}%`;
      });
      document.getElementById('chart-heading').textContent = series.title;
      chartEl.setAttribute('aria-label', series.title);
    };

    const loadSeries = async () => {
      const res = await fetch(`/api/chart?${query()}`);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Unable to load chart');
      }
      applySeries(await res.json());
      statusEl.textContent = '';
    };

    const loadUpdated = async () => {
      const res = await fetch(`/api/tools?tz_offset=${tzOffset}`);
      if (!res.ok) {
        return;
      }
      const tools = await res.json();
      if (tools.last_updated) {
        updatedEl.textContent = tools.last_updated;
      }
    };

    const refresh = () => {
      loadSeries().catch((err) => {
        statusEl.textContent = err.message;
      });
    };

    toolSelect.addEventListener('change', refresh);
    daySelect.addEventListener('change', refresh);

    if (toolSelect.options.length) {
      refresh();
      loadUpdated().catch(() => {});
    }
  </script>
</body>
</html>
"#;
