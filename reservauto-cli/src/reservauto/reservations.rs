//! Reservation list page extraction.
//!
//! The list is a table with the `tblReservations` marker class. After the
//! header row, each row carries nine-plus fixed-position cells; only the
//! positions below are read, the rest are site chrome.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::Reservation;

use super::error::ParseError;

/// Status cells beginning with this code mean the car came back early.
const EARLY_RETURN_PREFIX: &str = "VRE";

/// Placeholder the site shows instead of a hidden price.
const SHOW_PRICE_PLACEHOLDER: &str = "show price";

/// Cell positions in a reservation row.
const ID_CELL: usize = 0;
const CAR_LINK_CELL: usize = 2;
const FROM_CELL: usize = 3;
const TO_CELL: usize = 4;
const STATUS_CELL: usize = 5;
const RATE_PRICE_CELL: usize = 6;
const STATION_CELL: usize = 9;

/// Minimum cells a row must have for the fixed positions to exist.
const MIN_CELLS: usize = STATION_CELL + 1;

/// One parsed reservation row, before the car id is resolved to a name.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRow {
    pub id: String,
    pub car_id: String,
    pub from: String,
    pub to: String,
    pub status: String,
    pub rate: String,
    pub price: String,
    pub station: String,
}

impl ReservationRow {
    /// Finish the row with the resolved car display name.
    pub fn into_reservation(self, car_name: String) -> Reservation {
        Reservation {
            id: self.id,
            car_name,
            from: self.from,
            to: self.to,
            status: self.status,
            rate: self.rate,
            price: self.price,
            station: self.station,
        }
    }
}

/// Parse the reservation list page into rows.
///
/// A malformed row anywhere aborts the whole parse; a short row means the
/// positional layout no longer holds, so the surviving cells can't be
/// trusted either.
pub fn parse_reservation_rows(body: &str) -> Result<Vec<ReservationRow>, ParseError> {
    let html = Html::parse_document(body);
    let table_sel = Selector::parse("table.tblReservations").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let table = html
        .select(&table_sel)
        .next()
        .ok_or(ParseError::MissingReservationTable)?;

    let mut rows = Vec::new();
    for row in table.select(&row_sel).skip(1) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        if cells.len() < MIN_CELLS {
            return Err(ParseError::MalformedRow {
                cells: cells.len(),
                expected: MIN_CELLS,
                fragment: excerpt(&row.html()),
            });
        }

        let car_href = cells[CAR_LINK_CELL]
            .select(&link_sel)
            .next()
            .and_then(|a| a.attr("href"))
            .ok_or_else(|| ParseError::MissingCarId {
                fragment: excerpt(&cells[CAR_LINK_CELL].html()),
            })?;
        let car_id = match car_href.split_once("CarID=") {
            Some((_, after)) => after.split('&').next().unwrap_or(after).to_string(),
            None => {
                return Err(ParseError::MissingCarId {
                    fragment: excerpt(car_href),
                });
            }
        };

        let (rate, price) = split_rate_price(&cell_text(&cells[RATE_PRICE_CELL]))?;

        rows.push(ReservationRow {
            id: cell_text(&cells[ID_CELL]),
            car_id,
            from: cell_text(&cells[FROM_CELL]),
            to: cell_text(&cells[TO_CELL]),
            status: normalize_status(&cell_text(&cells[STATUS_CELL])),
            rate,
            price,
            station: cell_text(&cells[STATION_CELL]),
        });
    }

    debug!(count = rows.len(), "parsed reservation rows");
    Ok(rows)
}

/// Normalize a reservation status string.
///
/// The site renders early returns as a code beginning with `VRE`; everything
/// else passes through trimmed, case and inner whitespace preserved.
pub fn normalize_status(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with(EARLY_RETURN_PREFIX) {
        "Early return".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize and split the combined rate/price cell.
///
/// The cell mixes the rate name and the price across tab/newline runs, and
/// shows a "show price" placeholder when the price is hidden. After
/// collapsing the embedded whitespace and replacing the placeholder with a
/// dash, the last whitespace token is the price and everything before it is
/// the rate.
pub fn split_rate_price(raw: &str) -> Result<(String, String), ParseError> {
    let collapsed = raw
        .replace(['\t', '\r', '\n'], " ")
        .replace(SHOW_PRICE_PLACEHOLDER, "-");
    let tokens: Vec<&str> = collapsed.split_whitespace().collect();
    match tokens.split_last() {
        Some((price, rate)) => Ok((rate.join(" "), price.to_string())),
        None => Err(ParseError::EmptyRatePrice),
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Cap raw markup carried inside errors to a diagnosable excerpt.
fn excerpt(fragment: &str) -> String {
    fragment.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, car_id: &str, status: &str, rate_price: &str) -> String {
        format!(
            r#"<tr>
                 <td>{id}</td>
                 <td>chrome</td>
                 <td><a href="ReservationModif.asp?CarID={car_id}&ReservationID={id}">car</a></td>
                 <td>Mon 01/01/2024 10:00</td>
                 <td>Mon 01/01/2024 12:00</td>
                 <td>{status}</td>
                 <td>{rate_price}</td>
                 <td>chrome</td>
                 <td>chrome</td>
                 <td>Parc Laurier</td>
               </tr>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body>
                 <table class="tblReservations">
                   <tr><th>No</th><th></th><th>Car</th><th>From</th><th>To</th>
                       <th>Status</th><th>Rate</th><th></th><th></th><th>Station</th></tr>
                   {}
                 </table>
               </body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn rows_read_the_fixed_cell_positions() {
        let body = page(&[
            row("12345", "340", "Confirmed", "Free Plan\t42.50$\n"),
            row("12346", "341", "Confirmed", "Long distance 10.00$"),
        ]);

        let rows = parse_reservation_rows(&body).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].id, "12345");
        assert_eq!(rows[0].car_id, "340");
        assert_eq!(rows[0].from, "Mon 01/01/2024 10:00");
        assert_eq!(rows[0].to, "Mon 01/01/2024 12:00");
        assert_eq!(rows[0].status, "Confirmed");
        assert_eq!(rows[0].rate, "Free Plan");
        assert_eq!(rows[0].price, "42.50$");
        assert_eq!(rows[0].station, "Parc Laurier");

        assert_eq!(rows[1].rate, "Long distance");
        assert_eq!(rows[1].price, "10.00$");
    }

    #[test]
    fn early_return_status_is_normalized() {
        let body = page(&[row("1", "2", "VRE 01/01/2024", "Plan 5 $")]);
        let rows = parse_reservation_rows(&body).unwrap();
        assert_eq!(rows[0].status, "Early return");
    }

    #[test]
    fn missing_table_is_a_parse_error() {
        let err = parse_reservation_rows("<html><body><table></table></body></html>").unwrap_err();
        assert!(matches!(err, ParseError::MissingReservationTable));
    }

    #[test]
    fn short_row_aborts_the_parse() {
        let bad = "<tr><td>1</td><td>2</td></tr>".to_string();
        let body = page(&[row("1", "2", "Confirmed", "Plan 5 $"), bad]);
        let err = parse_reservation_rows(&body).unwrap_err();
        match err {
            ParseError::MalformedRow { cells, expected, .. } => {
                assert_eq!(cells, 2);
                assert_eq!(expected, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn car_cell_without_link_is_a_parse_error() {
        let bad = r#"<tr>
              <td>1</td><td></td><td>no link</td><td>f</td><td>t</td>
              <td>s</td><td>r 1 $</td><td></td><td></td><td>st</td>
            </tr>"#
            .to_string();
        let body = page(&[bad]);
        let err = parse_reservation_rows(&body).unwrap_err();
        assert!(matches!(err, ParseError::MissingCarId { .. }));
    }

    #[test]
    fn normalize_status_passes_other_text_through() {
        assert_eq!(normalize_status("  Confirmed  "), "Confirmed");
        assert_eq!(normalize_status("Annulée"), "Annulée");
        assert_eq!(normalize_status("VREanything"), "Early return");
    }

    #[test]
    fn rate_price_splits_on_the_last_token() {
        assert_eq!(
            split_rate_price("Free Plan\tshow price\n").unwrap(),
            ("Free Plan".to_string(), "-".to_string())
        );
        assert_eq!(
            split_rate_price("Plan A 12.34 $").unwrap(),
            ("Plan A 12.34".to_string(), "$".to_string())
        );
        assert_eq!(
            split_rate_price("42").unwrap(),
            ("".to_string(), "42".to_string())
        );
    }

    #[test]
    fn rate_price_collapses_embedded_whitespace_before_the_placeholder() {
        // The placeholder can itself be broken across a tab.
        assert_eq!(
            split_rate_price("Plan\tshow\tprice").unwrap(),
            ("Plan".to_string(), "-".to_string())
        );
    }

    #[test]
    fn empty_rate_price_cell_is_a_parse_error() {
        assert!(matches!(
            split_rate_price("  \t\n "),
            Err(ParseError::EmptyRatePrice)
        ));
    }
}
