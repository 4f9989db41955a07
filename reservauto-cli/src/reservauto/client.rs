//! HTTP client for the booking script pages.
//!
//! Builds the exact query strings the classic-ASP endpoints expect
//! (parameter order included, since the site has never been observed with
//! anything else) and performs strictly sequential GETs over an
//! authenticated [`Session`].

use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::debug;

use crate::domain::{CarAvailability, Language, Reservation, SearchCriteria, StatusFilter};
use crate::session::Session;
use crate::stations::StationDirectory;

use super::availability::parse_availability;
use super::car::{CarDescription, parse_car_description};
use super::error::{FetchError, ReservautoError};
use super::reservations::parse_reservation_rows;

/// Base URL for the booking script pages.
const DEFAULT_BASE_URL: &str = "https://www.reservauto.net/Scripts/client";

/// Client for the reservauto.net booking pages.
#[derive(Debug, Clone)]
pub struct ReservautoClient {
    base_url: String,
}

impl Default for ReservautoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservautoClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// URL of an availability search.
    ///
    /// The structural parameters are a fixed contract: ordering 2, no
    /// accessory filter, fee type 80, grid and map disabled. Only the date
    /// window, city and language vary.
    pub fn availability_url(&self, criteria: &SearchCriteria) -> String {
        let start = DateParts::of(criteria.start);
        let end = DateParts::of(criteria.end);
        format!(
            "{}/ReservationDisponibility.asp\
             ?IgnoreError=False\
             &CityID={}\
             &StationID=C\
             &CustomerLocalizationID=\
             &OrderBy=2\
             &Accessories=0\
             &Brand=\
             &ShowGrid=False\
             &ShowMap=False\
             &DestinationID=\
             &FeeType=80\
             &StartYear={}&StartMonth={}&StartDay={}&StartHour={}&StartMinute={}\
             &EndYear={}&EndMonth={}&EndDay={}&EndHour={}&EndMinute={}\
             &CurrentLanguageID={}",
            self.base_url,
            criteria.city.wire_id(),
            start.year,
            start.month,
            start.day,
            start.hour,
            start.minute,
            end.year,
            end.month,
            end.day,
            end.hour,
            end.minute,
            criteria.language.wire_id(),
        )
    }

    /// URL of the reservation list, filtered by status.
    pub fn reservation_list_url(&self, status: StatusFilter, language: Language) -> String {
        format!(
            "{}/ReservationList.asp?OrderBy=1&ReservationStatus={}&CurrentLanguageID={}",
            self.base_url,
            status.wire_id(),
            language.wire_id(),
        )
    }

    /// URL of a car description fragment.
    pub fn car_description_url(&self, car_id: &str, language: Language) -> String {
        format!(
            "{}/CarDescription.asp?CurrentLanguageID={}&CarID={}",
            self.base_url,
            language.wire_id(),
            car_id,
        )
    }

    /// Fetch the raw availability search response.
    pub async fn fetch_availability(
        &self,
        session: &Session,
        criteria: &SearchCriteria,
    ) -> Result<String, FetchError> {
        self.fetch(session, &self.availability_url(criteria)).await
    }

    /// Search for available cars: fetch, parse, join against the directory.
    pub async fn search(
        &self,
        session: &Session,
        criteria: &SearchCriteria,
        directory: &StationDirectory,
    ) -> Result<Vec<CarAvailability>, ReservautoError> {
        let body = self.fetch_availability(session, criteria).await?;
        Ok(parse_availability(&body, directory)?)
    }

    /// List reservations matching the status filter.
    ///
    /// Each row's car id is resolved to a display name with one extra
    /// request, issued strictly one after another.
    pub async fn list_reservations(
        &self,
        session: &Session,
        status: StatusFilter,
        language: Language,
    ) -> Result<Vec<Reservation>, ReservautoError> {
        let url = self.reservation_list_url(status, language);
        let body = self.fetch(session, &url).await?;
        let rows = parse_reservation_rows(&body)?;

        let mut reservations = Vec::with_capacity(rows.len());
        for row in rows {
            let car = self.resolve_car(session, &row.car_id, language).await?;
            reservations.push(row.into_reservation(car.car_name));
        }
        Ok(reservations)
    }

    /// Resolve a car id to its display name and feature list.
    pub async fn resolve_car(
        &self,
        session: &Session,
        car_id: &str,
        language: Language,
    ) -> Result<CarDescription, ReservautoError> {
        let body = self
            .fetch(session, &self.car_description_url(car_id, language))
            .await?;
        Ok(parse_car_description(&body)?)
    }

    async fn fetch(&self, session: &Session, url: &str) -> Result<String, FetchError> {
        debug!(url, "fetching");
        let response = session.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Calendar fields of a timestamp, as the endpoint wants them: unpadded
/// decimal, month 1-12, 24-hour clock.
struct DateParts {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl DateParts {
    fn of(stamp: NaiveDateTime) -> Self {
        Self {
            year: stamp.year(),
            month: stamp.month(),
            day: stamp.day(),
            hour: stamp.hour(),
            minute: stamp.minute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::City;

    use super::*;

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            start: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 5, 0)
                .unwrap(),
            city: City::Montreal,
            language: Language::English,
        }
    }

    #[test]
    fn availability_url_reproduces_the_contract() {
        let client = ReservautoClient::new().with_base_url("https://test.example/Scripts/client");
        assert_eq!(
            client.availability_url(&criteria()),
            "https://test.example/Scripts/client/ReservationDisponibility.asp\
             ?IgnoreError=False\
             &CityID=59\
             &StationID=C\
             &CustomerLocalizationID=\
             &OrderBy=2\
             &Accessories=0\
             &Brand=\
             &ShowGrid=False\
             &ShowMap=False\
             &DestinationID=\
             &FeeType=80\
             &StartYear=2024&StartMonth=1&StartDay=1&StartHour=10&StartMinute=0\
             &EndYear=2024&EndMonth=1&EndDay=1&EndHour=12&EndMinute=5\
             &CurrentLanguageID=2"
        );
    }

    #[test]
    fn availability_url_varies_city_and_language() {
        let client = ReservautoClient::new().with_base_url("https://t");
        let mut c = criteria();
        c.city = City::Ottawa;
        c.language = Language::French;
        let url = client.availability_url(&c);
        assert!(url.contains("&CityID=93&"));
        assert!(url.ends_with("&CurrentLanguageID=1"));
    }

    #[test]
    fn reservation_list_url_reproduces_the_contract() {
        let client = ReservautoClient::new().with_base_url("https://t");
        assert_eq!(
            client.reservation_list_url(StatusFilter::Upcoming, Language::English),
            "https://t/ReservationList.asp?OrderBy=1&ReservationStatus=1&CurrentLanguageID=2"
        );
        assert_eq!(
            client.reservation_list_url(StatusFilter::All, Language::French),
            "https://t/ReservationList.asp?OrderBy=1&ReservationStatus=4&CurrentLanguageID=1"
        );
    }

    #[test]
    fn car_description_url_reproduces_the_contract() {
        let client = ReservautoClient::new().with_base_url("https://t");
        assert_eq!(
            client.car_description_url("340", Language::English),
            "https://t/CarDescription.asp?CurrentLanguageID=2&CarID=340"
        );
    }
}
