//! Presentation of search and reservation results.
//!
//! The parsing core hands over clean structured values; rounding and
//! layout happen only here. Table output mimics psql-style framing, JSON
//! output keeps the field names stable for scripting.

use serde::Serialize;

use crate::domain::{CarAvailability, Reservation};

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct SearchDocument<'a> {
    cars: &'a [CarAvailability],
    date_range: &'a str,
    link: &'a str,
}

#[derive(Serialize)]
struct ReservationDocument<'a> {
    reservations: &'a [Reservation],
}

/// Render search results, with the requested range and query link as
/// context.
pub fn render_search(
    cars: &[CarAvailability],
    date_range: &str,
    link: &str,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<[String; 4]> = cars
                .iter()
                .map(|car| {
                    [
                        car.station_name.clone(),
                        format!("{:.1}", car.distance_km),
                        car.car_name.clone(),
                        car.features.clone(),
                    ]
                })
                .collect();
            Ok(format!(
                "Date range: {date_range}\n{}\nLink: {link}",
                render_table(["Station Name", "Distance", "Car", "Features"], &rows)
            ))
        }
        OutputFormat::Json => serde_json::to_string(&SearchDocument {
            cars,
            date_range,
            link,
        }),
    }
}

/// Render the reservation list.
pub fn render_reservations(
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<[String; 8]> = reservations
                .iter()
                .map(|r| {
                    [
                        r.id.clone(),
                        r.car_name.clone(),
                        r.from.clone(),
                        r.to.clone(),
                        r.status.clone(),
                        r.rate.clone(),
                        r.price.clone(),
                        r.station.clone(),
                    ]
                })
                .collect();
            Ok(render_table(
                ["id", "Car", "From", "To", "Status", "Rate", "Price", "Station"],
                &rows,
            ))
        }
        OutputFormat::Json => serde_json::to_string(&ReservationDocument { reservations }),
    }
}

/// psql-style framed table, all columns left-aligned.
fn render_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = frame_line(&widths, '+');
    let separator = frame_line(&widths, '|');

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border.clone());
    lines.push(content_line(&widths, &headers.map(str::to_string)));
    lines.push(separator);
    for row in rows {
        lines.push(content_line(&widths, row));
    }
    lines.push(border);
    lines.join("\n")
}

fn frame_line(widths: &[usize], edge: char) -> String {
    let mut line = String::new();
    line.push(edge);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push('+');
        }
        for _ in 0..width + 2 {
            line.push('-');
        }
    }
    line.push(edge);
    line
}

fn content_line<const N: usize>(widths: &[usize], cells: &[String; N]) -> String {
    let mut line = String::new();
    for (width, cell) in widths.iter().zip(cells) {
        let pad = width - cell.chars().count();
        line.push_str("| ");
        line.push_str(cell);
        for _ in 0..pad {
            line.push(' ');
        }
        line.push(' ');
    }
    line.push('|');
    line
}
