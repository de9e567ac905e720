//! The dashboard root: one filter location, one query cache, and the dialogs
//! that mutate it.
//!
//! Filter operations only rewrite the location; [`Dashboard::load`] reads the
//! list for whatever the location currently encodes.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use postdash_api_types::{Comment, Post, PostId, UserId};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cache::{CacheConfig, PostWatch, QueryCache};
use crate::config::{DashboardSettings, Settings};
use crate::dialogs::Dialog;
use crate::filter::{FilterLocation, FilterPatch, PostListFilter, SortBy, SortOrder};
use crate::forms::{EditCommentForm, EditPostForm, NewCommentForm, NewPostForm};
use crate::infra::error::InfraError;
use crate::infra::http::ApiClient;
use crate::mutations::{MutationError, Mutations, PendingLike};
use crate::presentation::{
    FilterBarView, PaginationView, PostDetailView, PostTableView, UserDetailView,
};
use crate::queries::{QueryClient, QueryError};
use crate::util::debounce::Debouncer;

/// Commenter used by the add-comment dialog until sessions exist.
pub const DEFAULT_COMMENTER: UserId = 1;

/// Everything the list page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub filter_bar: FilterBarView,
    pub table: PostTableView,
    pub pagination: PaginationView,
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.filter_bar, self.table, self.pagination)
    }
}

pub struct Dashboard {
    queries: QueryClient,
    mutations: Mutations,
    location: FilterLocation,
    search_debounce: Duration,
    last_total: Option<u64>,
    pub add_post: Dialog<NewPostForm>,
    pub edit_post: Dialog<EditPostForm>,
    pub add_comment: Dialog<NewCommentForm>,
    pub edit_comment: Dialog<EditCommentForm>,
}

impl Dashboard {
    pub fn new(queries: QueryClient, location: FilterLocation, settings: &DashboardSettings) -> Self {
        let mutations = Mutations::from(&queries);
        Self {
            queries,
            mutations,
            location,
            search_debounce: settings.search_debounce,
            last_total: None,
            add_post: Dialog::default(),
            edit_post: Dialog::default(),
            add_comment: Dialog::default(),
            edit_comment: Dialog::default(),
        }
    }

    /// Build the client, cache and location from resolved settings.
    pub fn connect(settings: &Settings, location: &str) -> Result<Self, InfraError> {
        let api = ApiClient::from_settings(&settings.api)?;
        let cache = Arc::new(QueryCache::new(CacheConfig::from(&settings.cache)));
        let location = FilterLocation::parse(location, settings.dashboard.page_size)?;
        Ok(Self::new(
            QueryClient::new(api, cache),
            location,
            &settings.dashboard,
        ))
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn mutations(&self) -> &Mutations {
        &self.mutations
    }

    pub fn location(&self) -> &FilterLocation {
        &self.location
    }

    pub fn filter(&self) -> &PostListFilter {
        self.location.filter()
    }

    /// Total reported by the last successful [`Dashboard::load`].
    pub fn last_total(&self) -> Option<u64> {
        self.last_total
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        self.apply(&FilterPatch::search(search))
    }

    /// A debouncer for search input; feed the receiver's values to
    /// [`Dashboard::set_search`].
    pub fn search_debouncer(&self) -> (Debouncer<String>, mpsc::UnboundedReceiver<String>) {
        Debouncer::new(self.search_debounce)
    }

    pub fn select_tag(&mut self, tag: impl Into<String>) -> bool {
        self.apply(&FilterPatch::tag(tag))
    }

    pub fn set_sort(&mut self, sort_by: SortBy, order: Option<SortOrder>) -> bool {
        self.apply(&FilterPatch::sort(sort_by, order))
    }

    pub fn set_page_size(&mut self, limit: NonZeroU32) -> bool {
        self.apply(&FilterPatch::page_size(limit))
    }

    pub fn set_skip(&mut self, skip: u32) -> bool {
        self.apply(&FilterPatch::skip(skip))
    }

    /// Advance one page. Needs a loaded total to know where the end is.
    pub fn next_page(&mut self) -> bool {
        let Some(total) = self.last_total else {
            return false;
        };
        if !self.filter().has_next_page(total) {
            return false;
        }
        let skip = self.filter().next_skip();
        self.apply(&FilterPatch::skip(skip))
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.filter().has_prev_page() {
            return false;
        }
        let skip = self.filter().prev_skip();
        self.apply(&FilterPatch::skip(skip))
    }

    pub fn back(&mut self) -> bool {
        self.location.back()
    }

    fn apply(&mut self, patch: &FilterPatch) -> bool {
        let changed = self.location.apply(patch);
        if changed {
            debug!(location = %self.location.url(), "filter changed");
        }
        changed
    }

    /// Load the list page. Authors and tags only decorate it, so their
    /// failures leave rows without authors or the tag select empty.
    pub async fn load(&mut self) -> Result<DashboardView, QueryError> {
        let filter = self.location.filter().clone();
        let (page, authors, tags) = futures::join!(
            self.queries.post_list(&filter),
            self.queries.authors(),
            self.queries.tags(),
        );

        let page = page?;
        let authors = authors.unwrap_or_else(|err| {
            warn!(error = %err, "author list unavailable");
            Vec::new()
        });
        let tags = tags.unwrap_or_else(|err| {
            warn!(error = %err, "tag list unavailable");
            Vec::new()
        });

        self.last_total = Some(page.total);
        let posts = self.queries.resolve_posts(&page);
        Ok(DashboardView {
            filter_bar: FilterBarView::new(&filter, &tags),
            table: PostTableView::new(&posts, page.total, &authors, &filter),
            pagination: PaginationView::new(&filter, page.total),
        })
    }

    /// Post detail comes from the cache; only its comments are fetched.
    pub async fn post_detail(&self, id: PostId) -> Result<PostDetailView, QueryError> {
        let post = self.queries.post_detail(id)?;
        let comments = self.queries.comments(id).await?;
        Ok(PostDetailView::new(&post, &comments, &self.filter().search))
    }

    pub async fn user_detail(&self, id: UserId) -> Result<UserDetailView, QueryError> {
        let user = self.queries.user_detail(id).await?;
        Ok(UserDetailView::new(&user))
    }

    pub fn watch_post(&self, id: PostId) -> PostWatch {
        self.queries.cache().watch_post(id)
    }

    pub fn open_add_post(&mut self) {
        self.add_post.open_default();
    }

    pub async fn submit_add_post(&mut self) -> Option<Result<Post, MutationError>> {
        let mutations = &self.mutations;
        self.add_post
            .submit(|form| async move { mutations.create_post(&form).await })
            .await
    }

    /// Open the edit dialog prefilled from the cached detail.
    pub fn open_edit_post(&mut self, id: PostId) -> Result<(), QueryError> {
        let post = self.queries.post_detail(id)?;
        self.edit_post.open(EditPostForm::from_post(&post));
        Ok(())
    }

    pub async fn submit_edit_post(&mut self) -> Option<Result<Post, MutationError>> {
        let mutations = &self.mutations;
        self.edit_post
            .submit(|form| async move { mutations.update_post(&form).await })
            .await
    }

    pub async fn delete_post(&self, id: PostId) -> Result<(), MutationError> {
        self.mutations.delete_post(id).await
    }

    pub fn open_add_comment(&mut self, post_id: PostId) {
        self.add_comment
            .open(NewCommentForm::new(post_id, DEFAULT_COMMENTER));
    }

    pub async fn submit_add_comment(&mut self) -> Option<Result<Comment, MutationError>> {
        let mutations = &self.mutations;
        self.add_comment
            .submit(|form| async move { mutations.create_comment(&form).await })
            .await
    }

    pub fn open_edit_comment(&mut self, comment: &Comment) {
        self.edit_comment.open(EditCommentForm {
            comment_id: comment.id,
            post_id: comment.post_id,
            body: comment.body.clone(),
        });
    }

    pub async fn submit_edit_comment(&mut self) -> Option<Result<Comment, MutationError>> {
        let mutations = &self.mutations;
        self.edit_comment
            .submit(|form| async move { mutations.update_comment(&form).await })
            .await
    }

    pub async fn delete_comment(&self, comment: &Comment) -> Result<(), MutationError> {
        self.mutations
            .delete_comment(comment.id, comment.post_id)
            .await
    }

    /// The returned like is already visible in the cache.
    pub fn like_comment(&self, comment: &Comment) -> PendingLike {
        self.mutations.begin_like_comment(comment)
    }
}
