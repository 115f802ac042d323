use chrono::{DateTime, NaiveDate};
use ratatui::{prelude::*, widgets::*};

use crate::app::{PageMarker, Pagination, Severity};
use crate::network::error::{NETWORK_ERROR, TIMEOUT};
use crate::network::ApiError;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Price label; a zero price reads as "Free"
pub fn format_price(price: &str) -> String {
    if price == "0.00" {
        String::from("Free")
    } else {
        format!("${}", price)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

fn format_date(value: Option<&str>, pattern: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => String::from("TBA"),
        Some(raw) => match parse_date(raw) {
            Some(date) => date.format(pattern).to_string(),
            // Free-form dates from the store are shown as-is
            None => raw.to_string(),
        },
    }
}

/// "Jul 9, 2013"
pub fn format_date_short(value: Option<&str>) -> String {
    format_date(value, "%b %-d, %Y")
}

/// "July 9, 2013"
pub fn format_date_long(value: Option<&str>) -> String {
    format_date(value, "%B %-d, %Y")
}

/// Glyph, heading and colour for an error panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPresentation {
    pub glyph: &'static str,
    pub title: &'static str,
    pub color: Color,
}

pub fn error_presentation(error: &ApiError, fallback_title: &'static str) -> ErrorPresentation {
    match error.code() {
        NETWORK_ERROR => ErrorPresentation {
            glyph: "((·))",
            title: "Network Error",
            color: Color::Yellow,
        },
        TIMEOUT => ErrorPresentation {
            glyph: "⏱",
            title: "Request Timeout",
            color: Color::LightRed,
        },
        _ => ErrorPresentation {
            glyph: "⚠",
            title: fallback_title,
            color: Color::Red,
        },
    }
}

/// Glyph and colour per notification severity
pub fn severity_style(severity: Severity) -> (&'static str, Color) {
    match severity {
        Severity::Success => ("✔", Color::Green),
        Severity::Error => ("✖", Color::Red),
        Severity::Warning => ("!", Color::Yellow),
        Severity::Info => ("i", Color::Blue),
    }
}

/// Metacritic score colour
pub fn score_color(score: u8) -> Color {
    match score {
        75..=100 => Color::Green,
        50..=74 => Color::Yellow,
        _ => Color::Red,
    }
}

/// "‹ 1 … 8 9 [10] 11 12 … 20 ›"
pub fn pagination_line(pagination: &Pagination) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled(
        "‹ ",
        if pagination.has_prev() { Style::default() } else { dim },
    )];

    for marker in pagination.page_window() {
        match marker {
            PageMarker::Page(n) if n == pagination.current_page => {
                spans.push(Span::styled(
                    format!("[{}]", n),
                    Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
                ));
            }
            PageMarker::Page(n) => spans.push(Span::raw(format!(" {} ", n))),
            PageMarker::Ellipsis => spans.push(Span::styled(" … ", dim)),
        }
    }

    spans.push(Span::styled(
        " ›",
        if pagination.has_next() { Style::default() } else { dim },
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("0.00"), "Free");
        assert_eq!(format_price("19.99"), "$19.99");
    }

    #[test]
    fn test_format_dates() {
        assert_eq!(format_date_short(None), "TBA");
        assert_eq!(format_date_short(Some("2013-07-09")), "Jul 9, 2013");
        assert_eq!(format_date_long(Some("2013-07-09T00:00:00Z")), "July 9, 2013");
        assert_eq!(format_date_short(Some("Coming soon")), "Coming soon");
    }

    #[test]
    fn test_error_presentation() {
        assert_eq!(error_presentation(&ApiError::Network, "x").title, "Network Error");
        assert_eq!(error_presentation(&ApiError::Timeout, "x").title, "Request Timeout");
        let http = ApiError::Http { status: 503, status_text: String::from("Service Unavailable") };
        assert_eq!(
            error_presentation(&http, "Unable to Load Games").title,
            "Unable to Load Games"
        );
    }

    #[test]
    fn test_pagination_line_marks_current() {
        let pagination = Pagination { current_page: 2, items_per_page: 20, total_items: 60 };
        let text: String = pagination_line(&pagination)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "‹  1 [2] 3  ›");
    }
}
