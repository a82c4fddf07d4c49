//! Plotly figure specifications (`{ "data": [...], "layout": {...} }`)

use crate::models::{Dataset, MacroRegion};
use crate::utils::{format_chart_date, linear_fit, RegionMeans};
use serde_json::{json, Value};

const UNEMPLOYMENT_LABEL: &str = "Unemployment rate (%)";
const INFLATION_LABEL: &str = "Inflation (quarterly IPCA %)";
const MAP_MAX_MARKER: f64 = 40.0;
const MAP_MIN_MARKER: f64 = 8.0;

/// Stable per-region colour shared by every chart
pub fn region_color(region: MacroRegion) -> &'static str {
    match region {
        MacroRegion::Norte => "#636efa",
        MacroRegion::Nordeste => "#EF553B",
        MacroRegion::Sudeste => "#00cc96",
        MacroRegion::Sul => "#ab63fa",
        MacroRegion::CentroOeste => "#FFA15A",
    }
}

fn title(text: &str) -> Value {
    json!({ "text": text })
}

/// Bubble map: one marker per region at its centroid, sized and coloured by
/// mean unemployment
pub fn map_figure(means: &[RegionMeans]) -> Value {
    let max_unemployment = means
        .iter()
        .map(|m| m.unemployment)
        .fold(0.0_f64, f64::max);
    let size = |value: f64| {
        if max_unemployment > 0.0 {
            (MAP_MAX_MARKER * value / max_unemployment).max(MAP_MIN_MARKER)
        } else {
            MAP_MIN_MARKER
        }
    };

    let trace = json!({
        "type": "scattergeo",
        "mode": "markers",
        "lat": means.iter().map(|m| m.region.centroid().0).collect::<Vec<_>>(),
        "lon": means.iter().map(|m| m.region.centroid().1).collect::<Vec<_>>(),
        "text": means.iter().map(|m| m.region.name()).collect::<Vec<_>>(),
        "customdata": means.iter().map(|m| [m.unemployment, m.inflation]).collect::<Vec<_>>(),
        "hovertemplate": "<b>%{text}</b><br>Unemployment: %{customdata[0]:.2f}%<br>Quarterly IPCA: %{customdata[1]:.2f}%<extra></extra>",
        "marker": {
            "size": means.iter().map(|m| size(m.unemployment)).collect::<Vec<_>>(),
            "sizemode": "diameter",
            "color": means.iter().map(|m| m.unemployment).collect::<Vec<_>>(),
            "colorscale": "Reds",
            "showscale": true,
            "colorbar": { "title": { "text": UNEMPLOYMENT_LABEL } },
            "line": { "width": 1, "color": "#444" }
        }
    });

    json!({
        "data": [trace],
        "layout": {
            "title": title("Analytical Map: Unemployment and Inflation Intensity"),
            "height": 600,
            "geo": {
                "scope": "south america",
                "projection": { "type": "mercator" },
                "lataxis": { "range": [-35.0, 6.0] },
                "lonaxis": { "range": [-75.0, -33.0] },
                "showcountries": true,
                "showland": true,
                "landcolor": "#f2f2f2"
            }
        }
    })
}

/// Grouped bars comparing period means per region
pub fn bar_figure(means: &[RegionMeans], span: &str) -> Value {
    let names: Vec<&str> = means.iter().map(|m| m.region.name()).collect();
    json!({
        "data": [
            {
                "type": "bar",
                "name": "Mean unemployment rate (%)",
                "x": names,
                "y": means.iter().map(|m| m.unemployment).collect::<Vec<_>>(),
                "marker": { "color": "indianred" }
            },
            {
                "type": "bar",
                "name": "Mean quarterly IPCA (%)",
                "x": names,
                "y": means.iter().map(|m| m.inflation).collect::<Vec<_>>(),
                "marker": { "color": "lightsalmon" }
            }
        ],
        "layout": {
            "title": title(&format!("Period Means ({}) by Region", span)),
            "barmode": "group"
        }
    })
}

/// Unemployment over time, one line per region
pub fn line_figure(dataset: &Dataset) -> Value {
    let traces: Vec<Value> = dataset
        .regions()
        .into_iter()
        .map(|region| {
            let (x, y): (Vec<String>, Vec<f64>) = dataset
                .for_region(region)
                .map(|r| (format_chart_date(r.date), r.unemployment))
                .unzip();
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": region.name(),
                "x": x,
                "y": y,
                "line": { "color": region_color(region) }
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": title("Unemployment over Time by Macro-Region"),
            "xaxis": { "title": title("Quarter") },
            "yaxis": { "title": title(UNEMPLOYMENT_LABEL) },
            "legend": { "title": title("Region") }
        }
    })
}

/// Share of each region in the sum of mean unemployment rates
pub fn pie_figure(means: &[RegionMeans]) -> Value {
    json!({
        "data": [{
            "type": "pie",
            "labels": means.iter().map(|m| m.region.name()).collect::<Vec<_>>(),
            "values": means.iter().map(|m| m.unemployment).collect::<Vec<_>>(),
            "marker": { "colors": means.iter().map(|m| region_color(m.region)).collect::<Vec<_>>() }
        }],
        "layout": {
            "title": title("Relative Share of Mean Unemployment Rates")
        }
    })
}

/// Inflation vs unemployment per observation, with an OLS trend line per region
pub fn scatter_figure(dataset: &Dataset) -> Value {
    let mut traces = Vec::new();
    for region in dataset.regions() {
        let (x, y): (Vec<f64>, Vec<f64>) = dataset
            .for_region(region)
            .map(|r| (r.inflation, r.unemployment))
            .unzip();
        let quarters: Vec<String> = dataset.for_region(region).map(|r| r.quarter.to_string()).collect();

        traces.push(json!({
            "type": "scatter",
            "mode": "markers",
            "name": region.name(),
            "legendgroup": region.name(),
            "x": x,
            "y": y,
            "text": quarters,
            "marker": { "color": region_color(region) }
        }));

        if let Some(fit) = linear_fit(&x, &y) {
            let lo = x.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            traces.push(json!({
                "type": "scatter",
                "mode": "lines",
                "name": format!("{} (OLS)", region.name()),
                "legendgroup": region.name(),
                "showlegend": false,
                "x": [lo, hi],
                "y": [fit.predict(lo), fit.predict(hi)],
                "hovertemplate": format!("slope = {:.3}<extra></extra>", fit.slope),
                "line": { "color": region_color(region) }
            }));
        }
    }

    json!({
        "data": traces,
        "layout": {
            "title": title("Inflation vs Unemployment (Regional Phillips Curve)"),
            "xaxis": { "title": title(INFLATION_LABEL) },
            "yaxis": { "title": title(UNEMPLOYMENT_LABEL) },
            "legend": { "title": title("Region") }
        }
    })
}
