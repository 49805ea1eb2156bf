use serde::Deserialize;
use thiserror::Error;

use crate::{constants::CATALOG_SETTINGS, domain::Chapter};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("catalog responded with code {0}")]
    ResponseCode(u32),
    #[error("catalog payload could not be parsed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    code: u32,
    data: Vec<Chapter>,
}

/// One blocking GET for the full chapter list. No retry, no caching: a fresh
/// fetch every launch, and any failure leaves the catalog empty.
pub fn fetch_catalog() -> Result<Vec<Chapter>, CatalogError> {
    fetch_catalog_from(CATALOG_SETTINGS.endpoint)
}

pub fn fetch_catalog_from(endpoint: &str) -> Result<Vec<Chapter>, CatalogError> {
    let response = reqwest::blocking::get(endpoint)?;
    if !response.status().is_success() {
        return Err(CatalogError::HttpStatus(response.status()));
    }

    let body = response.text()?;
    parse_catalog(&body)
}

fn parse_catalog(body: &str) -> Result<Vec<Chapter>, CatalogError> {
    let envelope: CatalogResponse = serde_json::from_str(body)?;
    if envelope.code != CATALOG_SETTINGS.success_code {
        return Err(CatalogError::ResponseCode(envelope.code));
    }
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BODY: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": [
            {
                "number": 1,
                "name": "سُورَةُ ٱلْفَاتِحَةِ",
                "englishName": "Al-Faatiha",
                "englishNameTranslation": "The Opening",
                "numberOfAyahs": 7,
                "revelationType": "Meccan"
            },
            {
                "number": 2,
                "name": "سُورَةُ البَقَرَةِ",
                "englishName": "Al-Baqara",
                "englishNameTranslation": "The Cow",
                "numberOfAyahs": 286,
                "revelationType": "Medinan"
            }
        ]
    }"#;

    #[test]
    fn test_parse_catalog_payload() {
        let chapters = parse_catalog(SAMPLE_BODY).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].number, 1);
        assert_eq!(chapters[0].english_name, "Al-Faatiha");
        assert_eq!(chapters[0].verse_count, 7);
        assert_eq!(chapters[1].english_name_translation, "The Cow");
        assert_eq!(chapters[1].revelation_type, "Medinan");
    }

    #[test]
    fn test_parse_catalog_rejects_bad_code() {
        let body = r#"{ "code": 404, "data": [] }"#;
        let err = parse_catalog(body).unwrap_err();
        assert!(matches!(err, CatalogError::ResponseCode(404)));
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_body() {
        let err = parse_catalog("<html>not json</html>").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }
}
