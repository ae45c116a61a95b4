//! Page-number pagination: query parameters and the paginated envelope.

use axum::http::Uri;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use url::Url;

use crate::domain::entities::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::entities::{Page, PageRequest};
use crate::error::AppError;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Validates the parameters.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: 6, at most 100
    pub fn to_page_request(&self) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::bad_request(
                format!("Limit must be between 1 and {MAX_PAGE_SIZE}"),
                json!({ "limit": limit }),
            ));
        }

        Ok(PageRequest::new(page, limit))
    }
}

/// `{count, next, previous, results}` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wraps a page, linking neighbours relative to the request URI.
    pub fn new(page: Page<T>, base_url: &str, uri: &Uri) -> Self {
        let current = page.request.page;
        let next = page
            .has_next()
            .then(|| page_link(base_url, uri, current + 1))
            .flatten();
        let previous = page
            .has_previous()
            .then(|| page_link(base_url, uri, current - 1))
            .flatten();

        Self {
            count: page.count,
            next,
            previous,
            results: page.items,
        }
    }
}

/// Absolute URL of `uri` with its `page` parameter set to `page`.
///
/// Other query parameters, including repeated ones, are kept in order.
pub fn page_link(base_url: &str, uri: &Uri, page: u32) -> Option<String> {
    let mut url = Url::parse(base_url).ok()?.join(uri.path()).ok()?;

    let kept: Vec<(String, String)> = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .filter(|(key, _)| key != "page")
                .collect()
        })
        .unwrap_or_default();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string());

    Some(url.into())
}
