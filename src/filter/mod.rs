//! Post list filter state and its URL query-string form.
//!
//! Query parameters: `q`, `tag`, `sortBy` (`none|id|title|reactions`),
//! `order` (`asc|desc`), `limit`, `skip`. Fields that are missing or fail to
//! parse fall back to their defaults one by one.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use url::form_urlencoded;

use crate::cache::{PostListKey, SortKey};
use crate::config::DEFAULT_PAGE_SIZE;

mod location;

pub use location::{DEFAULT_LOCATION, FilterLocation};

/// Page sizes offered by the pagination control.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 20, 30];

/// Tag value meaning "no tag filter".
pub const ALL_TAGS: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortBy {
    #[default]
    None,
    Id,
    Title,
    Reactions,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [Self::None, Self::Id, Self::Title, Self::Reactions];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Id => "id",
            Self::Title => "title",
            Self::Reactions => "reactions",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| format!("unknown sort field `{value}`"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order `{other}`")),
        }
    }
}

/// The dashboard's list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListFilter {
    pub search: String,
    pub tag: String,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub limit: NonZeroU32,
    pub skip: u32,
}

impl Default for PostListFilter {
    fn default() -> Self {
        Self::with_page_size(NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN))
    }
}

impl PostListFilter {
    pub fn with_page_size(limit: NonZeroU32) -> Self {
        Self {
            search: String::new(),
            tag: String::new(),
            sort_by: SortBy::None,
            order: SortOrder::Asc,
            limit,
            skip: 0,
        }
    }

    /// Parse a query string (with or without the leading `?`).
    pub fn from_query(query: &str, page_size: NonZeroU32) -> Self {
        let mut filter = Self::with_page_size(page_size);
        let query = query.strip_prefix('?').unwrap_or(query);
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                "q" => filter.search = value.into_owned(),
                "tag" => filter.tag = value.into_owned(),
                "sortBy" => {
                    if let Ok(sort_by) = value.parse() {
                        filter.sort_by = sort_by;
                    }
                }
                "order" => {
                    if let Ok(order) = value.parse() {
                        filter.order = order;
                    }
                }
                "limit" => {
                    if let Some(limit) = value.parse::<u32>().ok().and_then(NonZeroU32::new) {
                        filter.limit = limit;
                    }
                }
                "skip" => {
                    if let Ok(skip) = value.parse() {
                        filter.skip = skip;
                    }
                }
                _ => {}
            }
        }
        filter
    }

    /// Query pairs for every field that differs from its default.
    pub fn to_query_pairs(&self, page_size: NonZeroU32) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("q", self.search.clone()));
        }
        if !self.tag.is_empty() {
            pairs.push(("tag", self.tag.clone()));
        }
        if self.sort_by != SortBy::None {
            pairs.push(("sortBy", self.sort_by.to_string()));
        }
        if self.order != SortOrder::Asc {
            pairs.push(("order", self.order.to_string()));
        }
        if self.limit != page_size {
            pairs.push(("limit", self.limit.to_string()));
        }
        if self.skip != 0 {
            pairs.push(("skip", self.skip.to_string()));
        }
        pairs
    }

    pub fn to_query_string(&self, page_size: NonZeroU32) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_pairs(page_size))
            .finish()
    }

    /// Tag to filter by, or `None` for "" and "all".
    pub fn active_tag(&self) -> Option<&str> {
        let tag = self.tag.trim();
        (!tag.is_empty() && tag != ALL_TAGS).then_some(tag)
    }

    pub fn active_search(&self) -> Option<&str> {
        let search = self.search.trim();
        (!search.is_empty()).then_some(search)
    }

    /// The single request this filter resolves to: tag, else search, else
    /// the paginated listing.
    pub fn list_key(&self) -> PostListKey {
        if let Some(tag) = self.active_tag() {
            return PostListKey::ByTag {
                tag: tag.to_string(),
                limit: self.limit.get(),
                skip: self.skip,
            };
        }
        if let Some(search) = self.active_search() {
            return PostListKey::Search {
                q: search.to_string(),
                limit: self.limit.get(),
                skip: self.skip,
            };
        }
        let sort = (self.sort_by != SortBy::None).then_some(SortKey {
            by: self.sort_by,
            order: self.order,
        });
        PostListKey::Page {
            limit: self.limit.get(),
            skip: self.skip,
            sort,
        }
    }

    /// Merge a partial update. Changing search, tag or page size restarts
    /// pagination unless the patch sets `skip` itself.
    pub fn merged(&self, patch: &FilterPatch) -> Self {
        let mut next = self.clone();
        if let Some(search) = &patch.search {
            next.search.clone_from(search);
        }
        if let Some(tag) = &patch.tag {
            next.tag.clone_from(tag);
        }
        if let Some(sort_by) = patch.sort_by {
            next.sort_by = sort_by;
        }
        if let Some(order) = patch.order {
            next.order = order;
        }
        if let Some(limit) = patch.limit {
            next.limit = limit;
        }

        let restart = next.search != self.search || next.tag != self.tag || next.limit != self.limit;
        match patch.skip {
            Some(skip) => next.skip = skip,
            None if restart => next.skip = 0,
            None => {}
        }
        next
    }

    pub fn has_prev_page(&self) -> bool {
        self.skip > 0
    }

    pub fn has_next_page(&self, total: u64) -> bool {
        u64::from(self.skip) + u64::from(self.limit.get()) < total
    }

    /// `skip` of the previous page, clamped at zero.
    pub fn prev_skip(&self) -> u32 {
        self.skip.saturating_sub(self.limit.get())
    }

    pub fn next_skip(&self) -> u32 {
        self.skip.saturating_add(self.limit.get())
    }

    /// 1-based page number for display.
    pub fn page_number(&self) -> u32 {
        self.skip / self.limit.get() + 1
    }
}

/// A partial filter update; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort_by: Option<SortBy>,
    pub order: Option<SortOrder>,
    pub limit: Option<NonZeroU32>,
    pub skip: Option<u32>,
}

impl FilterPatch {
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self {
            tag: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn sort(sort_by: SortBy, order: Option<SortOrder>) -> Self {
        Self {
            sort_by: Some(sort_by),
            order,
            ..Self::default()
        }
    }

    pub fn page_size(limit: NonZeroU32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn skip(skip: u32) -> Self {
        Self {
            skip: Some(skip),
            ..Self::default()
        }
    }
}
