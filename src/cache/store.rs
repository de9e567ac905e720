//! Query cache storage.
//!
//! Post details live in an unbounded map so a cached list can always resolve
//! its ids; every other family is LRU-bounded.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::Duration;

use lru::LruCache;
use postdash_api_types::{Comment, Post, PostId, Tag, User, UserId, UserListQuery};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, trace};

use super::config::CacheConfig;
use super::events::{CacheEvent, EventKind, PostWatch};
use super::keys::{PostListKey, QueryKey, QueryScope};
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

/// A list entry: ordered ids plus the server-reported total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostIdPage {
    pub ids: Vec<PostId>,
    pub total: u64,
}

/// A cached value with its fetch time.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    pub value: T,
    fetched_at: Instant,
    invalidated: bool,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            invalidated: false,
        }
    }

    /// True when the entry may be served without refetching.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        !self.invalidated && self.fetched_at.elapsed() < max_age
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }
}

pub struct QueryCache {
    config: CacheConfig,
    post_details: RwLock<HashMap<PostId, Entry<Post>>>,
    post_lists: RwLock<LruCache<PostListKey, Entry<PostIdPage>>>,
    comment_lists: RwLock<LruCache<PostId, Entry<Vec<Comment>>>>,
    user_lists: RwLock<LruCache<UserListQuery, Entry<Vec<User>>>>,
    users: RwLock<LruCache<UserId, Entry<User>>>,
    tags: RwLock<Option<Entry<Vec<Tag>>>>,
    events: broadcast::Sender<CacheEvent>,
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity_non_zero());
        Self {
            post_details: RwLock::new(HashMap::new()),
            post_lists: RwLock::new(LruCache::new(config.post_list_limit_non_zero())),
            comment_lists: RwLock::new(LruCache::new(config.comment_list_limit_non_zero())),
            user_lists: RwLock::new(LruCache::new(config.user_limit_non_zero())),
            users: RwLock::new(LruCache::new(config.user_limit_non_zero())),
            tags: RwLock::new(None),
            events,
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    pub fn watch_post(&self, id: PostId) -> PostWatch {
        PostWatch::new(id, self.events.subscribe())
    }

    fn publish(&self, key: QueryKey, kind: EventKind) {
        trace!(key = %key, kind = ?kind, "cache event");
        // No receivers is the normal case for one-shot CLI runs.
        let _ = self.events.send(CacheEvent::new(key, kind));
    }

    // ========================================================================
    // Post details
    // ========================================================================

    pub fn post(&self, id: PostId) -> Option<Post> {
        rw_read(&self.post_details, SOURCE, "post")
            .get(&id)
            .map(|entry| entry.value.clone())
    }

    pub fn put_post(&self, post: Post) {
        let id = post.id;
        rw_write(&self.post_details, SOURCE, "put_post").insert(id, Entry::new(post));
        self.publish(QueryKey::PostDetail(id), EventKind::Updated);
    }

    /// Apply `patch` to a cached post; returns the patched copy.
    pub fn patch_post(&self, id: PostId, patch: impl FnOnce(&mut Post)) -> Option<Post> {
        let patched = {
            let mut details = rw_write(&self.post_details, SOURCE, "patch_post");
            let entry = details.get_mut(&id)?;
            patch(&mut entry.value);
            entry.value.clone()
        };
        self.publish(QueryKey::PostDetail(id), EventKind::Updated);
        Some(patched)
    }

    /// Drop a post everywhere: its detail entry and its id in every cached
    /// list, whose totals shrink by one.
    pub fn remove_post(&self, id: PostId) -> bool {
        let removed_detail = rw_write(&self.post_details, SOURCE, "remove_post.detail")
            .remove(&id)
            .is_some();

        let mut touched = Vec::new();
        {
            let mut lists = rw_write(&self.post_lists, SOURCE, "remove_post.lists");
            for (key, entry) in lists.iter_mut() {
                let before = entry.value.ids.len();
                entry.value.ids.retain(|candidate| *candidate != id);
                if entry.value.ids.len() != before {
                    entry.value.total = entry.value.total.saturating_sub(1);
                    touched.push(key.clone());
                }
            }
        }

        if removed_detail {
            self.publish(QueryKey::PostDetail(id), EventKind::Removed);
        }
        let lists_touched = !touched.is_empty();
        for key in touched {
            self.publish(QueryKey::PostList(key), EventKind::Updated);
        }
        debug!(post_id = id, removed_detail, lists_touched, "post removed from cache");
        removed_detail || lists_touched
    }

    // ========================================================================
    // Post lists
    // ========================================================================

    pub fn post_list(&self, key: &PostListKey) -> Option<Entry<PostIdPage>> {
        rw_write(&self.post_lists, SOURCE, "post_list")
            .get(key)
            .cloned()
    }

    /// Store a fetched page: every post becomes a detail entry first, then
    /// the list entry is written with ids only.
    pub fn put_post_page(&self, key: PostListKey, posts: Vec<Post>, total: u64) -> PostIdPage {
        let ids: Vec<PostId> = posts.iter().map(|post| post.id).collect();
        {
            let mut details = rw_write(&self.post_details, SOURCE, "put_post_page.details");
            for post in posts {
                details.insert(post.id, Entry::new(post));
            }
        }
        for id in &ids {
            self.publish(QueryKey::PostDetail(*id), EventKind::Updated);
        }

        let page = PostIdPage { ids, total };
        rw_write(&self.post_lists, SOURCE, "put_post_page.list")
            .put(key.clone(), Entry::new(page.clone()));
        self.publish(QueryKey::PostList(key), EventKind::Updated);
        page
    }

    /// Every cached list page, most recently used first.
    pub fn post_lists(&self) -> Vec<(PostListKey, PostIdPage)> {
        rw_read(&self.post_lists, SOURCE, "post_lists")
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    // ========================================================================
    // Comments
    // ========================================================================

    pub fn comments(&self, post_id: PostId) -> Option<Entry<Vec<Comment>>> {
        rw_write(&self.comment_lists, SOURCE, "comments")
            .get(&post_id)
            .cloned()
    }

    pub fn put_comments(&self, post_id: PostId, comments: Vec<Comment>) {
        rw_write(&self.comment_lists, SOURCE, "put_comments").put(post_id, Entry::new(comments));
        self.publish(QueryKey::CommentList(post_id), EventKind::Updated);
    }

    /// Patch the cached comment list of one post. Nothing happens when the
    /// list was never loaded.
    pub fn patch_comments<R>(
        &self,
        post_id: PostId,
        patch: impl FnOnce(&mut Vec<Comment>) -> R,
    ) -> Option<R> {
        let result = {
            let mut lists = rw_write(&self.comment_lists, SOURCE, "patch_comments");
            let entry = lists.get_mut(&post_id)?;
            patch(&mut entry.value)
        };
        self.publish(QueryKey::CommentList(post_id), EventKind::Updated);
        Some(result)
    }

    /// Append to the owning post's list, starting one if none is cached.
    pub fn append_comment(&self, comment: Comment) {
        let post_id = comment.post_id;
        {
            let mut lists = rw_write(&self.comment_lists, SOURCE, "append_comment");
            match lists.get_mut(&post_id) {
                Some(entry) => entry.value.push(comment),
                None => {
                    lists.put(post_id, Entry::new(vec![comment]));
                }
            }
        }
        self.publish(QueryKey::CommentList(post_id), EventKind::Updated);
    }

    // ========================================================================
    // Users and tags
    // ========================================================================

    pub fn user_list(&self, query: &UserListQuery) -> Option<Entry<Vec<User>>> {
        rw_write(&self.user_lists, SOURCE, "user_list")
            .get(query)
            .cloned()
    }

    pub fn put_user_list(&self, query: UserListQuery, users: Vec<User>) {
        rw_write(&self.user_lists, SOURCE, "put_user_list")
            .put(query.clone(), Entry::new(users));
        self.publish(QueryKey::UserList(query), EventKind::Updated);
    }

    pub fn user(&self, id: UserId) -> Option<Entry<User>> {
        rw_write(&self.users, SOURCE, "user").get(&id).cloned()
    }

    pub fn put_user(&self, user: User) {
        let id = user.id;
        rw_write(&self.users, SOURCE, "put_user").put(id, Entry::new(user));
        self.publish(QueryKey::UserDetail(id), EventKind::Updated);
    }

    pub fn tags(&self) -> Option<Entry<Vec<Tag>>> {
        rw_read(&self.tags, SOURCE, "tags").clone()
    }

    pub fn put_tags(&self, tags: Vec<Tag>) {
        *rw_write(&self.tags, SOURCE, "put_tags") = Some(Entry::new(tags));
        self.publish(QueryKey::TagList, EventKind::Updated);
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Mark every entry in `scope` for refetch; values stay readable.
    /// Returns the number of entries marked.
    pub fn invalidate(&self, scope: QueryScope) -> usize {
        let mut keys = Vec::new();

        mark(
            &mut rw_write(&self.post_details, SOURCE, "invalidate.post_details"),
            scope,
            |id| QueryKey::PostDetail(*id),
            &mut keys,
        );
        mark_lru(
            &mut rw_write(&self.post_lists, SOURCE, "invalidate.post_lists"),
            scope,
            |key| QueryKey::PostList(key.clone()),
            &mut keys,
        );
        mark_lru(
            &mut rw_write(&self.comment_lists, SOURCE, "invalidate.comment_lists"),
            scope,
            |id| QueryKey::CommentList(*id),
            &mut keys,
        );
        mark_lru(
            &mut rw_write(&self.user_lists, SOURCE, "invalidate.user_lists"),
            scope,
            |query| QueryKey::UserList(query.clone()),
            &mut keys,
        );
        mark_lru(
            &mut rw_write(&self.users, SOURCE, "invalidate.users"),
            scope,
            |id| QueryKey::UserDetail(*id),
            &mut keys,
        );
        if scope.contains(&QueryKey::TagList) {
            let mut tags = rw_write(&self.tags, SOURCE, "invalidate.tags");
            if let Some(entry) = tags.as_mut() {
                entry.invalidated = true;
                keys.push(QueryKey::TagList);
            }
        }

        let count = keys.len();
        for key in keys {
            self.publish(key, EventKind::Invalidated);
        }
        debug!(scope = ?scope, count, "cache invalidated");
        count
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

fn mark<K, V>(
    map: &mut HashMap<K, Entry<V>>,
    scope: QueryScope,
    to_key: impl Fn(&K) -> QueryKey,
    out: &mut Vec<QueryKey>,
) {
    for (k, entry) in map.iter_mut() {
        let key = to_key(k);
        if scope.contains(&key) {
            entry.invalidated = true;
            out.push(key);
        }
    }
}

fn mark_lru<K: Hash + Eq, V>(
    map: &mut LruCache<K, Entry<V>>,
    scope: QueryScope,
    to_key: impl Fn(&K) -> QueryKey,
    out: &mut Vec<QueryKey>,
) {
    for (k, entry) in map.iter_mut() {
        let key = to_key(k);
        if scope.contains(&key) {
            entry.invalidated = true;
            out.push(key);
        }
    }
}
