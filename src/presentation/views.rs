use std::collections::HashMap;

use postdash_api_types::{Comment, CommentId, Post, PostId, Tag, User, UserId};

use super::highlight::{Segment, highlight};
use crate::filter::{ALL_TAGS, PAGE_SIZE_OPTIONS, PostListFilter, SortBy, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarView {
    pub search: String,
    pub tags: Vec<SelectOption>,
    pub sort_by: Vec<SelectOption>,
    pub order: Vec<SelectOption>,
    /// Order is meaningless until a sort field is chosen.
    pub order_enabled: bool,
}

impl FilterBarView {
    pub fn new(filter: &PostListFilter, tags: &[Tag]) -> Self {
        let selected_tag = filter.active_tag();
        let mut tag_options = Vec::with_capacity(tags.len() + 1);
        tag_options.push(SelectOption::new(ALL_TAGS, selected_tag.is_none()));
        tag_options.extend(
            tags.iter()
                .map(|tag| SelectOption::new(&tag.slug, selected_tag == Some(tag.slug.as_str()))),
        );

        Self {
            search: filter.search.clone(),
            tags: tag_options,
            sort_by: SortBy::ALL
                .into_iter()
                .map(|by| SelectOption::new(by.as_str(), by == filter.sort_by))
                .collect(),
            order: [SortOrder::Asc, SortOrder::Desc]
                .into_iter()
                .map(|order| SelectOption::new(order.as_str(), order == filter.order))
                .collect(),
            order_enabled: filter.sort_by != SortBy::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorView {
    pub id: UserId,
    pub username: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub slug: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRowView {
    pub id: PostId,
    pub title: Vec<Segment>,
    pub tags: Vec<TagChip>,
    pub author: Option<AuthorView>,
    pub likes: u64,
    pub dislikes: u64,
}

impl PostRowView {
    pub fn new(post: &Post, author: Option<&User>, filter: &PostListFilter) -> Self {
        let selected_tag = filter.active_tag();
        Self {
            id: post.id,
            title: highlight(&post.title, &filter.search),
            tags: post
                .tags
                .iter()
                .flatten()
                .map(|slug| TagChip {
                    slug: slug.clone(),
                    selected: selected_tag == Some(slug.as_str()),
                })
                .collect(),
            author: author.map(|user| AuthorView {
                id: user.id,
                username: user.username.clone(),
                image: user.image.clone(),
            }),
            likes: post.likes(),
            dislikes: post.dislikes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTableView {
    pub rows: Vec<PostRowView>,
    pub total: u64,
}

impl PostTableView {
    /// One row per resolved post, in list order, each decorated with its
    /// author when the author list knows it.
    pub fn new(posts: &[Post], total: u64, authors: &[User], filter: &PostListFilter) -> Self {
        let by_id: HashMap<UserId, &User> = authors.iter().map(|user| (user.id, user)).collect();
        Self {
            rows: posts
                .iter()
                .map(|post| PostRowView::new(post, by_id.get(&post.user_id).copied(), filter))
                .collect(),
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page_size: u32,
    pub page_size_options: Vec<SelectOption>,
    pub page: u32,
    pub skip: u32,
    pub total: u64,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationView {
    pub fn new(filter: &PostListFilter, total: u64) -> Self {
        let page_size = filter.limit.get();
        Self {
            page_size,
            page_size_options: PAGE_SIZE_OPTIONS
                .into_iter()
                .map(|size| SelectOption::new(size.to_string(), size == page_size))
                .collect(),
            page: filter.page_number(),
            skip: filter.skip,
            total,
            prev_enabled: filter.has_prev_page(),
            next_enabled: filter.has_next_page(total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub id: CommentId,
    pub author: String,
    pub body: Vec<Segment>,
    pub likes: u64,
}

impl CommentView {
    pub fn new(comment: &Comment, search: &str) -> Self {
        Self {
            id: comment.id,
            author: comment.user.username.clone(),
            body: highlight(&comment.body, search),
            likes: comment.likes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetailView {
    pub id: PostId,
    pub title: Vec<Segment>,
    pub body: Vec<Segment>,
    pub comments: Vec<CommentView>,
}

impl PostDetailView {
    pub fn new(post: &Post, comments: &[Comment], search: &str) -> Self {
        Self {
            id: post.id,
            title: highlight(&post.title, search),
            body: highlight(&post.body, search),
            comments: comments
                .iter()
                .map(|comment| CommentView::new(comment, search))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailView {
    pub image: Option<String>,
    pub username: String,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// "address, city, state"
    pub address: Option<String>,
    /// "name - title"
    pub company: Option<String>,
}

impl UserDetailView {
    pub fn new(user: &User) -> Self {
        let name = match (user.first_name.as_deref(), user.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        };
        Self {
            image: user.image.clone(),
            username: user.username.clone(),
            name,
            age: user.age,
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user
                .address
                .as_ref()
                .map(|a| format!("{}, {}, {}", a.address, a.city, a.state)),
            company: user
                .company
                .as_ref()
                .map(|c| format!("{} - {}", c.name, c.title)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use postdash_api_types::{Address, Company, Reactions};

    use super::*;

    fn post(id: PostId, user_id: UserId, tags: &[&str]) -> Post {
        Post {
            id,
            title: format!("His post {id}"),
            body: "body".to_string(),
            user_id,
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            reactions: (id == 1).then_some(Reactions {
                likes: 5,
                dislikes: 1,
            }),
            views: None,
            author: None,
        }
    }

    fn user(id: UserId, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            image: Some(format!("https://img/{id}.png")),
            first_name: None,
            last_name: None,
            age: None,
            email: None,
            phone: None,
            address: None,
            company: None,
        }
    }

    fn tag(slug: &str) -> Tag {
        Tag {
            slug: slug.to_string(),
            url: format!("/tag/{slug}"),
            name: None,
        }
    }

    #[test]
    fn filter_bar_lists_all_first_and_gates_order() {
        let filter = PostListFilter::from_query("tag=test", NonZeroU32::MIN);
        let view = FilterBarView::new(&filter, &[tag("test"), tag("love")]);

        let values: Vec<_> = view.tags.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["all", "test", "love"]);
        assert!(view.tags[1].selected);
        assert!(!view.order_enabled);

        let filter = PostListFilter::from_query("sortBy=id", NonZeroU32::MIN);
        let view = FilterBarView::new(&filter, &[]);
        assert!(view.tags[0].selected);
        assert!(view.order_enabled);
    }

    #[test]
    fn rows_resolve_authors_and_default_reactions() {
        let filter = PostListFilter::from_query("q=his&tag=test", NonZeroU32::MIN);
        let table = PostTableView::new(
            &[post(1, 7, &["test", "example"]), post(2, 8, &["test"])],
            2,
            &[user(7, "emilys")],
            &filter,
        );

        let first = &table.rows[0];
        assert_eq!(first.author.as_ref().map(|a| a.username.as_str()), Some("emilys"));
        assert_eq!((first.likes, first.dislikes), (5, 1));
        assert!(first.tags[0].selected);
        assert!(!first.tags[1].selected);
        assert!(first.title[0].highlighted);

        let second = &table.rows[1];
        assert!(second.author.is_none());
        assert_eq!((second.likes, second.dislikes), (0, 0));
    }

    #[test]
    fn pagination_disables_ends() {
        let ten = NonZeroU32::new(10).expect("non-zero");
        let first = PaginationView::new(&PostListFilter::from_query("", ten), 25);
        assert!(!first.prev_enabled);
        assert!(first.next_enabled);
        assert!(first.page_size_options[0].selected);

        let last = PaginationView::new(&PostListFilter::from_query("skip=20", ten), 25);
        assert!(last.prev_enabled);
        assert!(!last.next_enabled);
        assert_eq!(last.page, 3);
    }

    #[test]
    fn user_detail_formats_address_and_company() {
        let mut profile = user(1, "emilys");
        profile.first_name = Some("Emily".to_string());
        profile.last_name = Some("Johnson".to_string());
        profile.address = Some(Address {
            address: "626 Main Street".to_string(),
            city: "Phoenix".to_string(),
            state: "Mississippi".to_string(),
        });
        profile.company = Some(Company {
            name: "Dooley".to_string(),
            title: "Sales Manager".to_string(),
        });

        let view = UserDetailView::new(&profile);
        assert_eq!(view.name.as_deref(), Some("Emily Johnson"));
        assert_eq!(
            view.address.as_deref(),
            Some("626 Main Street, Phoenix, Mississippi")
        );
        assert_eq!(view.company.as_deref(), Some("Dooley - Sales Manager"));
    }
}
