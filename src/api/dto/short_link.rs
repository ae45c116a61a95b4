//! DTOs for recipe short links.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_hyphenated_key() {
        let body = serde_json::to_value(ShortLinkResponse {
            short_link: "http://localhost:8000/s/abc123".to_string(),
        })
        .unwrap();

        assert_eq!(body["short-link"], "http://localhost:8000/s/abc123");
    }
}
