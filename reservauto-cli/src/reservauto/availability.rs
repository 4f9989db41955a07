//! Availability search page extraction.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::{CarAvailability, StationId};
use crate::geo::{self, Coordinates};
use crate::stations::StationDirectory;

use super::error::ParseError;

/// Parse the availability search response and join it against the station
/// directory.
///
/// A page with no `<table>` at all is the site's "no cars available"
/// response and yields an empty list. Within the first table, each car row
/// contributes one entry to each of three parallel sub-sequences: a station
/// detail anchor, a billing-rules anchor carrying the car's position, and a
/// centered description cell. Any misalignment aborts the whole parse.
pub fn parse_availability(
    body: &str,
    directory: &StationDirectory,
) -> Result<Vec<CarAvailability>, ParseError> {
    let html = Html::parse_document(body);
    let table_sel = Selector::parse("table").unwrap();
    let Some(table) = html.select(&table_sel).next() else {
        return Ok(Vec::new());
    };

    let station_sel = Selector::parse(r#"a[href*="InfoStation"]"#).unwrap();
    let coords_sel = Selector::parse(r#"a[href*="BillingRulesAcpt"]"#).unwrap();
    let desc_sel = Selector::parse(r#"td[align="center"][width="420"]"#).unwrap();

    let stations: Vec<ElementRef> = table.select(&station_sel).collect();
    let coordinates: Vec<ElementRef> = table.select(&coords_sel).collect();
    // The first centered wide cell is the column header, not a car.
    let descriptions: Vec<ElementRef> = table.select(&desc_sel).skip(1).collect();

    if stations.len() != coordinates.len() || stations.len() != descriptions.len() {
        return Err(ParseError::StructuralMismatch {
            stations: stations.len(),
            coordinates: coordinates.len(),
            descriptions: descriptions.len(),
        });
    }

    let mut cars = Vec::with_capacity(stations.len());
    for ((station, coords), desc) in stations.iter().zip(&coordinates).zip(&descriptions) {
        cars.push(parse_row(station, coords, desc, directory)?);
    }

    debug!(count = cars.len(), "parsed availability rows");
    Ok(cars)
}

fn parse_row(
    station: &ElementRef,
    coords: &ElementRef,
    desc: &ElementRef,
    directory: &StationDirectory,
) -> Result<CarAvailability, ParseError> {
    let station_name = station.text().collect::<String>().trim().to_string();

    let station_href = station.attr("href").unwrap_or("").trim();
    let station_id = station_id_from_href(station_href).ok_or_else(|| {
        ParseError::BadStationLink {
            href: station_href.to_string(),
        }
    })?;
    let station_info = directory
        .get(&station_id)
        .ok_or(ParseError::UnknownStation(station_id))?;

    let coords_href = coords.attr("href").unwrap_or("").trim();
    let car_coords =
        car_coordinates_from_href(coords_href).ok_or_else(|| ParseError::BadCoordinates {
            href: coords_href.to_string(),
        })?;

    // Description cells mix text nodes and markup; join with single spaces
    // before carving on the " - " separators.
    let text = desc.text().collect::<Vec<_>>().join(" ");
    let segments: Vec<&str> = text.trim().split(" - ").collect();
    let car_name = segments[..segments.len().min(2)].join(" ");
    let features = if segments.len() > 2 {
        segments[2..].join(" ")
    } else {
        String::new()
    };

    Ok(CarAvailability {
        station_name,
        distance_km: geo::distance_km(car_coords, station_info.coordinates()),
        car_name,
        features,
    })
}

/// The station link is a javascript call whose quoted argument embeds the
/// id: `OpenWin('../InfoStation.asp?...&StationID=123','...')`.
fn station_id_from_href(href: &str) -> Option<StationId> {
    let (_, after) = href.split_once("StationID=")?;
    let raw = after.split('\'').next().unwrap_or(after);
    StationId::parse(raw).ok()
}

/// The billing-rules link embeds the car's position as javascript call
/// arguments: `BillingRulesAcpt(false, <longitude>,<latitude>,...);`.
fn car_coordinates_from_href(href: &str) -> Option<Coordinates> {
    let (_, after) = href.split_once("false, ")?;
    let args = after.split(");").next().unwrap_or(after);
    let mut tokens = args.split(',');
    let longitude: f64 = tokens.next()?.trim().parse().ok()?;
    let latitude: f64 = tokens.next()?.trim().parse().ok()?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}
