use runtime::ChartSpec;
use serde_json::{Value, json};

/// Chart.js configuration for a time-series spec.
///
/// Non-finite samples serialize as `null`, which Chart.js draws as gaps.
pub fn chart_config(spec: &ChartSpec) -> Value {
    let datasets: Vec<Value> = spec
        .series
        .iter()
        .map(|s| {
            json!({
                "label": s.label,
                "data": s.values,
                "borderColor": s.color,
                "borderWidth": 1,
                "fill": false,
                "pointRadius": 0,
                "pointStyle": "line",
            })
        })
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": spec.labels,
            "datasets": datasets,
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": {
                    "display": true,
                    "text": spec.title,
                    "font": { "size": 12, "weight": "normal" },
                    "padding": { "bottom": 10 },
                },
                "legend": {
                    "position": "bottom",
                    "labels": { "usePointStyle": true, "boxWidth": 40, "font": { "size": 11 } },
                },
            },
            "scales": {
                "x": {
                    "type": "time",
                    "time": { "unit": "year", "tooltipFormat": "YYYY" },
                    "title": { "display": false },
                },
                "y": {
                    "title": { "display": true, "text": spec.y_axis_title },
                },
            },
        },
    })
}
