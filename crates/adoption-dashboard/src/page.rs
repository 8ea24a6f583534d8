//! Server-rendered HTML for the dashboard page

use adoption_analytics::{CategoryFilter, DashboardViews};
use adoption_common::AdoptionError;
use adoption_config::DashboardConfig;
use adoption_graphs::{DashboardCharts, RenderedChart};
use std::fmt::Write;

const STYLE: &str = "\
body{font-family:sans-serif;margin:0 auto;max-width:1080px;padding:24px;color:#222}\
h1{margin-bottom:4px}.subtitle{color:#666;font-style:italic;margin-top:0}\
form{display:flex;gap:24px;margin:16px 0}label{display:flex;flex-direction:column;font-size:14px}\
select{margin-top:4px;padding:4px;min-width:240px}\
.chart svg{max-width:100%;height:auto}.no-data{padding:48px;text-align:center;color:#888;border:1px dashed #ccc}\
.row{display:flex;gap:24px}.row .chart{flex:2}.insight{flex:1;background:#eef4fb;padding:16px;border-radius:6px}\
.error{background:#fdecea;color:#8a1c1c;padding:16px;border-radius:6px}\
.notice{color:#8a6d3b;font-size:13px}";

/// User-facing text for a failed dataset load.
pub fn load_error_message(err: &AdoptionError) -> String {
    match err {
        AdoptionError::DataNotFound { path } => format!(
            "Error: Data file not found at {}. Please check the path.",
            path.display()
        ),
        AdoptionError::DataLoad { message, .. } => {
            format!("An error occurred during data loading: {message}")
        }
        other => format!("An error occurred during data loading: {other}"),
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Full dashboard page for computed views and rendered charts.
pub fn render_dashboard(
    text: &DashboardConfig,
    views: &DashboardViews,
    charts: &DashboardCharts,
    dropped_rows: usize,
) -> String {
    let mut body = String::new();

    body.push_str("<form method=\"get\" action=\"/\">");
    push_select(
        &mut body,
        "region",
        "Filter by Geographic Region (for Charts 1 &amp; 3)",
        &text.all_regions_label,
        &views.available_regions,
        &views.filters.region,
    );
    push_select(
        &mut body,
        "specialty",
        "Filter by Primary Specialty (for Chart 3 Analysis)",
        &text.all_specialties_label,
        &views.available_specialties,
        &views.filters.specialty,
    );
    body.push_str("<noscript><button type=\"submit\">Apply</button></noscript></form>");

    if dropped_rows > 0 {
        let _ = write!(
            body,
            "<p class=\"notice\">{dropped_rows} row(s) with an unreadable procedure date were excluded.</p>"
        );
    }

    body.push_str("<h2>1. New Physician Adoption Velocity</h2>");
    body.push_str("<p>Shows the monthly volume of <em>new</em> unique physicians adopting the device.</p>");
    push_chart(&mut body, "adoption-chart", &charts.adoption);

    body.push_str("<h2>2. Geographic Market Penetration</h2>");
    body.push_str("<p>Total procedure volume by geographic region, regardless of adoption date.</p>");
    push_chart(&mut body, "region-chart", &charts.regions);

    body.push_str("<h2>3. Specialty Segmentation and Commercial Insights</h2><div class=\"row\">");
    body.push_str("<div class=\"chart-column\"><h3>Procedures by Specialty</h3>");
    push_chart(&mut body, "specialty-chart", &charts.specialties);
    body.push_str("</div><div class=\"insight\" id=\"insight\"><h3>Actionable Insight</h3>");
    for section in &views.insight.sections {
        let _ = write!(
            body,
            "<p><strong>{}:</strong> {}</p>",
            escape_html(&section.heading),
            escape_html(&section.body)
        );
    }
    body.push_str("</div></div>");

    layout(text, &body)
}

/// Page showing only a load failure message.
pub fn render_error(text: &DashboardConfig, message: &str) -> String {
    layout(
        text,
        &format!("<div class=\"error\" role=\"alert\">{}</div>", escape_html(message)),
    )
}

fn layout(text: &DashboardConfig, body: &str) -> String {
    let title = escape_html(&text.title);
    let subtitle = if text.subtitle.is_empty() {
        String::new()
    } else {
        format!("<p class=\"subtitle\">{}</p>", escape_html(&text.subtitle))
    };

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body><h1>{title}</h1>{subtitle}{body}</body></html>"
    )
}

fn push_select(
    out: &mut String,
    name: &str,
    label: &str,
    all_label: &str,
    options: &[String],
    selected: &CategoryFilter,
) {
    let _ = write!(
        out,
        "<label>{label}<select name=\"{name}\" onchange=\"this.form.submit()\">"
    );
    push_option(out, all_label, selected.is_all());
    for option in options {
        push_option(out, option, selected.selected() == Some(option.as_str()));
    }
    out.push_str("</select></label>");
}

fn push_option(out: &mut String, value: &str, selected: bool) {
    let value = escape_html(value);
    let marker = if selected { " selected" } else { "" };
    let _ = write!(out, "<option value=\"{value}\"{marker}>{value}</option>");
}

fn push_chart(out: &mut String, id: &str, chart: &RenderedChart) {
    match chart {
        RenderedChart::Svg { svg } => {
            let _ = write!(out, "<div class=\"chart\" id=\"{id}\">{svg}</div>");
        }
        RenderedChart::Unavailable { reason } => {
            let _ = write!(
                out,
                "<div class=\"chart no-data\" id=\"{id}\">{}</div>",
                escape_html(reason)
            );
        }
    }
}
