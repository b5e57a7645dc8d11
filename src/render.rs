//! Static HTML and JSON views of a [`Snapshot`].
//!
//! Rendering is a pure function of the snapshot and the options; nothing here reads
//! shared state.

use std::{fmt, fmt::Write as _};

use crate::{
    dashboard::Snapshot,
    noise::{AggregatedReading, Thresholds},
};

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 300.0;
const CHART_PADDING: f64 = 40.0;
const CHART_Y_MIN: f64 = 20.0;
const CHART_MAX_X_LABELS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Time,
    Level,
}

impl SortKey {
    const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Time, SortKey::Level];

    pub fn heading(&self) -> &'static str {
        match self {
            SortKey::Date => "Datum",
            SortKey::Time => "Systemzeit",
            SortKey::Level => "LAS Mittelwert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,

    /// Seconds before the browser reloads the page. Zero disables the reload.
    pub refresh_secs: u64,

    pub thresholds: Thresholds,

    /// Table order. `None` keeps the snapshot order (most recent first).
    pub sort: Option<(SortKey, SortOrder)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Messwerte".to_string(),
            refresh_secs: 180,
            thresholds: Thresholds::default(),
            sort: None,
        }
    }
}

/// Stable sort. Date and time compare as text, levels numerically.
pub fn sort_readings(readings: &mut [AggregatedReading], key: SortKey, order: SortOrder) {
    readings.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Time => a.time_label.cmp(&b.time_label),
            SortKey::Level => a.mean_level.value().total_cmp(&b.mean_level.value()),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

pub fn render_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

pub fn render_html(snapshot: Option<&Snapshot>, options: &RenderOptions) -> String {
    Page { snapshot, options }.to_string()
}

struct Page<'a> {
    snapshot: Option<&'a Snapshot>,
    options: &'a RenderOptions,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_page(f, self.snapshot, self.options)
    }
}

fn write_page(
    out: &mut impl fmt::Write,
    snapshot: Option<&Snapshot>,
    options: &RenderOptions,
) -> fmt::Result {
    let title = escape(&options.title);

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">")?;
    if options.refresh_secs > 0 {
        writeln!(out, "<meta http-equiv=\"refresh\" content=\"{}\">", options.refresh_secs)?;
    }
    writeln!(out, "<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>")?;
    writeln!(out, "<h1>{title}</h1>")?;

    let Some(snapshot) = snapshot else {
        writeln!(out, "<p class=\"empty\">Noch keine Messwerte vorhanden.</p>")?;
        return writeln!(out, "</body>\n</html>");
    };

    if let Some(latest) = snapshot.latest() {
        write_banner(out, latest, &options.thresholds)?;
    }
    write_chart(out, snapshot)?;
    write_table(out, snapshot, options)?;

    writeln!(
        out,
        "<footer>{} &middot; aktualisiert {}</footer>",
        escape(&snapshot.source_file),
        snapshot.refreshed_at.format("%d.%m.%Y %H:%M:%S"),
    )?;
    writeln!(out, "</body>\n</html>")
}

fn write_banner(
    out: &mut impl fmt::Write,
    latest: &AggregatedReading,
    thresholds: &Thresholds,
) -> fmt::Result {
    let severity = thresholds.classify_reading(latest);

    writeln!(out, "<section class=\"latest {}\">", severity.css_class())?;
    writeln!(out, "<p>Datum: {}</p>", escape(&latest.date))?;
    writeln!(out, "<p>Systemzeit: {}</p>", escape(&latest.time_label))?;
    writeln!(
        out,
        "<p>LAS Mittelwert: {} dB (A) {}</p>",
        latest.mean_level,
        severity.emoji()
    )?;
    writeln!(out, "</section>")
}

fn write_chart(out: &mut impl fmt::Write, snapshot: &Snapshot) -> fmt::Result {
    let points: Vec<&AggregatedReading> = snapshot.chronological().collect();
    if points.is_empty() {
        return Ok(());
    }

    let peak = points
        .iter()
        .map(|r| r.mean_level.value())
        .fold(CHART_Y_MIN, f64::max);
    let y_max = ((peak / 10.0).ceil() * 10.0).max(CHART_Y_MIN + 10.0);

    let plot_width = CHART_WIDTH - 2.0 * CHART_PADDING;
    let plot_height = CHART_HEIGHT - 2.0 * CHART_PADDING;
    let step = if points.len() > 1 {
        plot_width / (points.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| CHART_PADDING + step * i as f64;
    let y_at = |level: f64| {
        let clamped = level.clamp(CHART_Y_MIN, y_max);
        CHART_HEIGHT - CHART_PADDING - (clamped - CHART_Y_MIN) / (y_max - CHART_Y_MIN) * plot_height
    };

    writeln!(out, "<section class=\"chart\">\n<h2>LAS Mittelwert Graph</h2>")?;
    writeln!(
        out,
        "<svg viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" role=\"img\" aria-label=\"LAS Mittelwert (dB)\">"
    )?;

    let baseline = CHART_HEIGHT - CHART_PADDING;
    let mut line = String::new();
    for (i, reading) in points.iter().enumerate() {
        write!(line, "{:.1},{:.1} ", x_at(i), y_at(reading.mean_level.value()))?;
    }
    let line = line.trim_end();

    writeln!(
        out,
        "<polygon class=\"area\" points=\"{:.1},{baseline:.1} {line} {:.1},{baseline:.1}\"/>",
        x_at(0),
        x_at(points.len() - 1),
    )?;
    writeln!(out, "<polyline class=\"line\" points=\"{line}\"/>")?;

    for tick in [CHART_Y_MIN, (CHART_Y_MIN + y_max) / 2.0, y_max] {
        writeln!(
            out,
            "<text class=\"y\" x=\"{:.1}\" y=\"{:.1}\">{tick:.0}</text>",
            CHART_PADDING - 6.0,
            y_at(tick)
        )?;
    }

    let every = points.len().div_ceil(CHART_MAX_X_LABELS);
    for (i, reading) in points.iter().enumerate().step_by(every) {
        writeln!(
            out,
            "<text class=\"x\" x=\"{:.1}\" y=\"{:.1}\">{}</text>",
            x_at(i),
            baseline + 16.0,
            escape(&reading.time_label)
        )?;
    }

    writeln!(out, "</svg>\n</section>")
}

fn write_table(
    out: &mut impl fmt::Write,
    snapshot: &Snapshot,
    options: &RenderOptions,
) -> fmt::Result {
    let mut rows = snapshot.readings.clone();
    if let Some((key, order)) = options.sort {
        sort_readings(&mut rows, key, order);
    }

    writeln!(out, "<table>\n<thead>\n<tr>")?;
    for key in SortKey::ALL {
        let icon = match options.sort {
            Some((active, SortOrder::Ascending)) if active == key => "▲",
            Some((active, SortOrder::Descending)) if active == key => "▼",
            _ => "◇",
        };
        writeln!(out, "<th>{} <span>{icon}</span></th>", key.heading())?;
    }
    writeln!(out, "</tr>\n</thead>\n<tbody>")?;

    for row in &rows {
        let severity = options.thresholds.classify_reading(row);
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>",
            escape(&row.date),
            escape(&row.time_label),
            severity.css_class(),
            row.mean_level,
        )?;
    }

    writeln!(out, "</tbody>\n</table>")
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = "\
body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem;background:#1f2937;color:#111}\
h1{color:#fff;text-align:center;letter-spacing:.05em}\
.latest{padding:1rem 1rem 1.5rem;margin-bottom:2rem;font-size:1.25rem;font-weight:bold;border-radius:.375rem}\
.chart{background:#fff;padding:1rem;margin-bottom:2rem;border-radius:.375rem}\
.chart svg{width:100%;height:auto}\
.line{fill:none;stroke:rgba(151,0,255,1);stroke-width:1.5}\
.area{fill:rgba(151,0,192,.2);stroke:none}\
text{font-size:10px;fill:#374151}text.y{text-anchor:end}text.x{text-anchor:middle}\
table{width:100%;border-collapse:collapse;background:#fff}\
th,td{padding:.5rem 1rem;border-bottom:1px solid #d1d5db;text-align:left;font-size:.875rem}\
thead tr{background:#e5e7eb}tbody tr:nth-child(odd){background:#f9fafb}\
.ok{background:#22c55e;color:#fff}.elevated{background:#eab308;color:#000}.exceeded{background:#ef4444;color:#fff}\
.empty{color:#fff;text-align:center}\
footer{color:#9ca3af;font-size:.75rem;margin-top:1rem;text-align:center}";

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use chrono::DateTime;

    use super::*;
    use crate::{
        averager::aggregate,
        noise::{Level, RawReading},
    };

    fn snapshot() -> Snapshot {
        let rows = vec![
            RawReading::new("01.08.2024", "21:50", "61,0"),
            RawReading::new("01.08.2024", "22:05", "44,0"),
            RawReading::new("01.08.2024", "22:20", "40,0"),
        ];
        let at = DateTime::parse_from_rfc3339("2024-08-01T22:30:00+02:00").unwrap();
        Snapshot::new("<export>.csv", aggregate(&rows), at)
    }

    fn reading(date: &str, time: &str, level: f64) -> AggregatedReading {
        AggregatedReading {
            date: date.to_string(),
            time_label: time.to_string(),
            mean_level: Level::from_mean(level),
        }
    }

    #[test]
    fn sorts_levels_numerically() {
        let mut rows = vec![
            reading("a", "10:00", 9.5),
            reading("b", "10:15", 45.0),
            reading("c", "10:30", 100.0),
        ];
        sort_readings(&mut rows, SortKey::Level, SortOrder::Descending);
        let levels: Vec<_> = rows.iter().map(|r| r.mean_level.to_string()).collect();
        assert_eq!(levels, ["100.00", "45.00", "9.50"]);
    }

    #[test]
    fn sorts_text_columns_stably() {
        let mut rows = vec![
            reading("02.08.2024", "10:00", 1.0),
            reading("01.08.2024", "11:00", 2.0),
            reading("01.08.2024", "09:00", 3.0),
        ];
        sort_readings(&mut rows, SortKey::Date, SortOrder::Ascending);
        let times: Vec<_> = rows.iter().map(|r| r.time_label.as_str()).collect();
        assert_eq!(times, ["11:00", "09:00", "10:00"]);

        sort_readings(&mut rows, SortKey::Time, SortOrder::Ascending);
        let times: Vec<_> = rows.iter().map(|r| r.time_label.as_str()).collect();
        assert_eq!(times, ["09:00", "10:00", "11:00"]);
    }

    #[test]
    fn page_shows_latest_entry_and_escapes() {
        let html = render_html(Some(&snapshot()), &RenderOptions::default());

        assert!(html.contains("<section class=\"latest ok\">"));
        assert!(html.contains("Systemzeit: 22:20"));
        assert!(html.contains("LAS Mittelwert: 40.00 dB (A) 😊"));
        assert!(html.contains("&lt;export&gt;.csv"));
        assert!(!html.contains("<export>"));
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"180\">"));
    }

    #[test]
    fn table_cells_use_day_and_night_limits() {
        let html = render_html(Some(&snapshot()), &RenderOptions::default());

        assert!(html.contains("<td>21:50</td><td class=\"exceeded\">61.00</td>"));
        assert!(html.contains("<td>22:05</td><td class=\"elevated\">44.00</td>"));
        assert!(html.contains("<td>22:20</td><td class=\"ok\">40.00</td>"));
    }

    #[test]
    fn marks_active_sort_column() {
        let options = RenderOptions {
            sort: Some((SortKey::Level, SortOrder::Ascending)),
            ..RenderOptions::default()
        };
        let html = render_html(Some(&snapshot()), &options);

        assert!(html.contains("<th>LAS Mittelwert <span>▲</span></th>"));
        assert!(html.contains("<th>Datum <span>◇</span></th>"));
        let first_row = html.find("<td class=\"ok\">40.00</td>").unwrap();
        let last_row = html.find("<td class=\"exceeded\">61.00</td>").unwrap();
        assert!(first_row < last_row);
    }

    #[test]
    fn page_streams_into_any_writer() {
        let snapshot = snapshot();
        let options = RenderOptions::default();
        let page = Page {
            snapshot: Some(&snapshot),
            options: &options,
        };

        let mut streamed = String::new();
        write!(streamed, "{page}").unwrap();

        assert_eq!(streamed, render_html(Some(&snapshot), &options));
        assert!(streamed.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn placeholder_without_snapshot() {
        let html = render_html(None, &RenderOptions::default());
        assert!(html.contains("Noch keine Messwerte vorhanden."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn chart_plots_every_bucket() {
        let html = render_html(Some(&snapshot()), &RenderOptions::default());
        let line = html
            .lines()
            .find(|l| l.starts_with("<polyline"))
            .unwrap();
        assert_eq!(line.matches(',').count(), 3);
    }

    #[test]
    fn json_carries_string_levels() {
        let json = render_json(&snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["readings"][0]["mean_level"], "40.00");
        assert_eq!(value["source_file"], "<export>.csv");
        assert_eq!(value["skipped_rows"], 0);
    }
}
