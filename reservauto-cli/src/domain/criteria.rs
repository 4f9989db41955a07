//! Search input values: cities, languages and the date window.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// A city served by the car-sharing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Montreal,
    Sherbrooke,
    Quebec,
    Gatineau,
    Kingston,
    Ottawa,
    SwOntario,
}

impl City {
    /// The `CityID` value the availability endpoint expects.
    pub fn wire_id(self) -> &'static str {
        match self {
            City::Montreal => "59",
            City::Sherbrooke => "89",
            City::Quebec => "90",
            City::Gatineau => "94",
            City::Kingston => "97",
            City::Ottawa => "93",
            City::SwOntario => "103",
        }
    }
}

/// Display language of the scraped pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    French,
}

impl Language {
    /// The `CurrentLanguageID` value the site expects.
    pub fn wire_id(self) -> &'static str {
        match self {
            Language::English => "2",
            Language::French => "1",
        }
    }
}

/// Immutable input of an availability search.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    /// Start of the requested reservation window.
    pub start: NaiveDateTime,
    /// End of the requested reservation window.
    pub end: NaiveDateTime,
    pub city: City,
    pub language: Language,
}

impl SearchCriteria {
    /// Human-readable date range, echoed around search output.
    ///
    /// Components are unpadded (`1/1/2024 10:0`), matching how the site's
    /// own pages render the slot.
    pub fn date_range(&self) -> String {
        format!(
            "{} - {}",
            format_stamp(self.start),
            format_stamp(self.end)
        )
    }
}

fn format_stamp(stamp: NaiveDateTime) -> String {
    format!(
        "{}/{}/{} {}:{}",
        stamp.day(),
        stamp.month(),
        stamp.year(),
        stamp.hour(),
        stamp.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn wire_ids_match_site_contract() {
        assert_eq!(City::Montreal.wire_id(), "59");
        assert_eq!(City::Sherbrooke.wire_id(), "89");
        assert_eq!(City::Quebec.wire_id(), "90");
        assert_eq!(City::Gatineau.wire_id(), "94");
        assert_eq!(City::Kingston.wire_id(), "97");
        assert_eq!(City::Ottawa.wire_id(), "93");
        assert_eq!(City::SwOntario.wire_id(), "103");

        assert_eq!(Language::English.wire_id(), "2");
        assert_eq!(Language::French.wire_id(), "1");
    }

    #[test]
    fn date_range_is_unpadded() {
        let criteria = SearchCriteria {
            start: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            city: City::Montreal,
            language: Language::English,
        };
        assert_eq!(criteria.date_range(), "1/1/2024 10:0 - 1/1/2024 12:30");
    }
}
