use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::history::{load_history, HistoryPoint};

/// Default location of the generated dashboard
pub const DEFAULT_DASHBOARD_PATH: &str = "index.html";

const DATA_MARKER: &str = "{{ DATA }}";

const DASHBOARD_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Music Project Quality Dashboard</title>
    <script src="https://cdn.jsdelivr.net/npm/echarts@5.4.3/dist/echarts.min.js"></script>
    <style>
        body { font-family: sans-serif; padding: 20px; background: #f4f4f9; }
        .container { max-width: 800px; margin: auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #333; }
        .chart-container { height: 400px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Quality Trend (Code Coverage) - Music Project</h1>
        <div id="coverage-chart" class="chart-container"></div>
    </div>
    <script>
        const data = {{ DATA }};
        const labels = data.map(d => d.date);
        const percentages = data.map(d => d.percentage);

        const chart = echarts.init(document.getElementById('coverage-chart'));
        chart.setOption({
            tooltip: { trigger: 'axis' },
            xAxis: { type: 'category', data: labels },
            yAxis: { type: 'value', min: 0, max: 100 },
            series: [{
                name: 'Code Coverage %',
                type: 'line',
                data: percentages,
                lineStyle: { color: 'rgb(75, 192, 192)' },
                itemStyle: { color: 'rgb(75, 192, 192)' }
            }]
        });
        window.addEventListener('resize', () => chart.resize());
    </script>
</body>
</html>
"##;

/// Generate the coverage dashboard and return the number of charted entries
///
/// The history is read tolerantly; a failed write is an error.
pub fn generate_dashboard(history_path: &Path, output_path: &Path) -> Result<usize> {
    let points = load_history(history_path);
    let html = build_html(&points)?;

    fs::write(output_path, html)
        .with_context(|| format!("Failed to write dashboard: {}", output_path.display()))?;

    Ok(points.len())
}

/// Render the dashboard page for the given points
pub fn build_html(points: &[HistoryPoint]) -> Result<String> {
    let data = embed_json(points)?;
    Ok(DASHBOARD_TEMPLATE.replace(DATA_MARKER, &data))
}

// Compact JSON that is safe inside a <script> element.
fn embed_json(points: &[HistoryPoint]) -> Result<String> {
    let json = serde_json::to_string(points)?;
    Ok(json.replace('<', "\\u003c"))
}
