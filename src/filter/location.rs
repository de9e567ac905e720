use std::num::NonZeroU32;

use url::Url;

use super::{FilterPatch, PostListFilter};

/// Location used when only a query string is supplied.
pub const DEFAULT_LOCATION: &str = "http://localhost/";

/// Query strings kept for `back`; the oldest is dropped past this.
pub const HISTORY_LIMIT: usize = 50;

/// The dashboard URL, kept in sync with the filter it encodes.
///
/// Applying a patch rewrites only the query component and pushes the
/// previous query onto the history stack; nothing is reloaded.
#[derive(Debug, Clone)]
pub struct FilterLocation {
    url: Url,
    page_size: NonZeroU32,
    filter: PostListFilter,
    history: Vec<String>,
}

impl FilterLocation {
    pub fn new(url: Url, page_size: NonZeroU32) -> Self {
        let filter = PostListFilter::from_query(url.query().unwrap_or_default(), page_size);
        Self {
            url,
            page_size,
            filter,
            history: Vec::new(),
        }
    }

    /// Accept either an absolute URL or a bare query string such as
    /// `?tag=love&skip=10`.
    pub fn parse(input: &str, page_size: NonZeroU32) -> Result<Self, url::ParseError> {
        let input = input.trim();
        let url = match Url::parse(input) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => {
                let mut url = Url::parse(DEFAULT_LOCATION)?;
                let query = input.strip_prefix('?').unwrap_or(input);
                url.set_query((!query.is_empty()).then_some(query));
                url
            }
        };
        Ok(Self::new(url, page_size))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn filter(&self) -> &PostListFilter {
        &self.filter
    }

    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    /// Previously visited query strings, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn query_string(&self) -> String {
        self.url.query().unwrap_or_default().to_string()
    }

    /// Merge `patch` into the filter. Returns false (and records nothing)
    /// when the filter is unchanged.
    pub fn apply(&mut self, patch: &FilterPatch) -> bool {
        let next = self.filter.merged(patch);
        if next == self.filter {
            return false;
        }
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(self.query_string());
        self.set_filter(next);
        true
    }

    /// Return to the previous query string, if any.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        let filter = PostListFilter::from_query(&previous, self.page_size);
        self.set_filter(filter);
        true
    }

    fn set_filter(&mut self, filter: PostListFilter) {
        let query = filter.to_query_string(self.page_size);
        self.url
            .set_query((!query.is_empty()).then_some(query.as_str()));
        self.filter = filter;
    }
}
