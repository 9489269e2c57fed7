//! Publication Series Commands

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::get;
use crate::error::ApiError;
use crate::models::PubseriesRow;

/// `/list_pubseries/<publisher>/`
pub fn pubseries_url(publisher: &str) -> String {
    format!(
        "/list_pubseries/{}/",
        utf8_percent_encode(publisher, NON_ALPHANUMERIC)
    )
}

/// Series of a publisher, by publisher name
pub async fn list_pubseries(publisher: &str) -> Result<Vec<PubseriesRow>, ApiError> {
    let body = get(&pubseries_url(publisher)).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Options for the series select: an empty choice followed by the rows.
pub fn pubseries_options(rows: Vec<PubseriesRow>) -> Vec<(String, String)> {
    std::iter::once((String::new(), String::new()))
        .chain(rows.into_iter().map(|PubseriesRow(id, name)| (id, name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubseries_url() {
        assert_eq!(pubseries_url("Otava"), "/list_pubseries/Otava/");
        assert_eq!(pubseries_url("WSOY & co"), "/list_pubseries/WSOY%20%26%20co/");
    }

    #[test]
    fn test_pubseries_options_start_empty() {
        let options = pubseries_options(vec![PubseriesRow("2".into(), "Keltainen kirjasto".into())]);
        assert_eq!(
            options,
            vec![
                (String::new(), String::new()),
                ("2".to_string(), "Keltainen kirjasto".to_string())
            ]
        );
    }
}
