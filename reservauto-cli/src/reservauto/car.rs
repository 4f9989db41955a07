//! Car description fragment extraction.

use scraper::{Html, Selector};

use super::error::ParseError;

/// Font signature of the description block on the car description page.
const DESCRIPTION_BLOCK: &str = r#"font[face="Arial, Helvetica, sans-serif"]"#;

/// A car's display name and feature list, resolved from its id.
#[derive(Debug, Clone, PartialEq)]
pub struct CarDescription {
    pub car_name: String,
    pub features: String,
}

/// Extract the car description from the fragment page.
///
/// The first styled block reads like `"340 - Toyota - Corolla - Automatic -
/// Air conditioning"`: the first three ` - ` segments joined with spaces
/// form the display name, the rest the features.
pub fn parse_car_description(body: &str) -> Result<CarDescription, ParseError> {
    let html = Html::parse_document(body);
    let block_sel = Selector::parse(DESCRIPTION_BLOCK).unwrap();
    let block = html
        .select(&block_sel)
        .next()
        .ok_or(ParseError::MissingCarDescription)?;

    let text = block.text().collect::<String>();
    let segments: Vec<&str> = text.trim().split(" - ").collect();
    let car_name = segments[..segments.len().min(3)].join(" ");
    let features = if segments.len() > 3 {
        segments[3..].join(" ")
    } else {
        String::new()
    };

    Ok(CarDescription { car_name, features })
}
