use postdash_api_types::{CreatePostRequest, Post, PostId, UpdatePostRequest, UserId};

use super::validation::{ValidationErrors, check_text};

pub const TITLE_MAX_CHARS: usize = 100;
pub const BODY_MIN_CHARS: usize = 10;
pub const BODY_MAX_CHARS: usize = 1000;
const SUGGESTED_TITLE_CHARS: usize = 50;
const SUMMARY_CHARS: usize = 100;
const CHARS_PER_MINUTE: usize = 200;

/// The "add post" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPostForm {
    pub title: String,
    pub body: String,
    pub user_id: UserId,
}

impl Default for NewPostForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            user_id: 1,
        }
    }
}

impl NewPostForm {
    /// Trim, check and build the request.
    pub fn validate(&self) -> Result<CreatePostRequest, ValidationErrors> {
        let title = self.title.trim();
        let body = self.body.trim();

        let mut errors = ValidationErrors::default();
        check_text(&mut errors, "title", title, 1, TITLE_MAX_CHARS);
        check_text(&mut errors, "body", body, BODY_MIN_CHARS, BODY_MAX_CHARS);
        if self.user_id < 1 {
            errors.push("userId", "must be a valid user id");
        }

        errors.into_result(CreatePostRequest {
            title: title.to_string(),
            body: body.to_string(),
            user_id: self.user_id,
        })
    }

    pub fn stats(&self) -> DraftStats {
        DraftStats::of(&self.body)
    }
}

/// The "edit post" dialog; absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPostForm {
    pub post_id: PostId,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl EditPostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            post_id: post.id,
            title: Some(post.title.clone()),
            body: Some(post.body.clone()),
        }
    }

    pub fn validate(&self) -> Result<UpdatePostRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let title = self.title.as_deref().map(str::trim);
        let body = self.body.as_deref().map(str::trim);

        if title.is_none() && body.is_none() {
            errors.push("post", "nothing to update");
        }
        if let Some(title) = title {
            check_text(&mut errors, "title", title, 1, TITLE_MAX_CHARS);
        }
        if body.is_some_and(str::is_empty) {
            errors.push("body", "is required");
        }

        errors.into_result(UpdatePostRequest {
            title: title.map(str::to_string),
            body: body.map(str::to_string),
            user_id: None,
        })
    }
}

/// Live counters shown under the body field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStats {
    pub characters: usize,
    pub reading_minutes: usize,
    pub hashtags: Vec<String>,
    pub suggested_title: String,
    pub summary: String,
}

impl DraftStats {
    pub fn of(body: &str) -> Self {
        Self {
            characters: character_count(body),
            reading_minutes: reading_minutes(body),
            hashtags: extract_hashtags(body),
            suggested_title: suggest_title(body),
            summary: summary(body, SUMMARY_CHARS),
        }
    }
}

/// First non-blank sentence, cut to 50 characters.
pub fn suggest_title(body: &str) -> String {
    let Some(first) = body
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|sentence| !sentence.is_empty())
    else {
        return String::new();
    };
    truncate_chars(first, SUGGESTED_TITLE_CHARS)
}

/// Whitespace-collapsed body cut to `max_chars`.
pub fn summary(body: &str, max_chars: usize) -> String {
    let clean = body.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&clean, max_chars)
}

/// `#word` hashtags, without the `#`.
pub fn extract_hashtags(body: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut rest = body;
    while let Some(pos) = rest.find('#') {
        rest = &rest[pos + 1..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end > 0 {
            tags.push(rest[..end].to_string());
        }
        rest = &rest[end..];
    }
    tags
}

/// Characters excluding whitespace.
pub fn character_count(body: &str) -> usize {
    body.chars().filter(|c| !c.is_whitespace()).count()
}

/// Minutes at 200 characters per minute, rounded up.
pub fn reading_minutes(body: &str) -> usize {
    character_count(body).div_ceil(CHARS_PER_MINUTE)
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_is_trimmed_before_checks() {
        let form = NewPostForm {
            title: "  Hello  ".to_string(),
            body: "  This body is long enough.  ".to_string(),
            user_id: 3,
        };
        let request = form.validate().expect("valid");
        assert_eq!(request.title, "Hello");
        assert_eq!(request.body, "This body is long enough.");
        assert_eq!(request.user_id, 3);
    }

    #[test]
    fn new_post_reports_each_field() {
        let form = NewPostForm {
            title: "   ".to_string(),
            body: "short".to_string(),
            user_id: 0,
        };
        let errors = form.validate().expect_err("invalid");
        assert_eq!(errors.field("title"), Some("is required"));
        assert_eq!(errors.field("body"), Some("must be at least 10 characters"));
        assert!(errors.field("userId").is_some());
    }

    #[test]
    fn title_over_limit_is_rejected() {
        let form = NewPostForm {
            title: "x".repeat(101),
            body: "A body that is long enough".to_string(),
            user_id: 1,
        };
        assert!(form.validate().expect_err("too long").field("title").is_some());
    }

    #[test]
    fn edit_form_only_sends_present_fields() {
        let form = EditPostForm {
            post_id: 1,
            title: Some(" New title ".to_string()),
            body: None,
        };
        let request = form.validate().expect("valid");
        assert_eq!(request.title.as_deref(), Some("New title"));
        assert!(request.body.is_none());

        assert!(EditPostForm::default().validate().is_err());
        let blank = EditPostForm {
            body: Some("  ".to_string()),
            ..EditPostForm::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn suggested_title_uses_first_sentence() {
        assert_eq!(suggest_title("Hello world. Second one!"), "Hello world");
        assert_eq!(suggest_title("  ...  "), "");
        let long = "a".repeat(60);
        assert_eq!(suggest_title(&long), format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn summary_collapses_whitespace() {
        assert_eq!(summary("a  b\n\tc", 100), "a b c");
        assert_eq!(summary("abcdef", 3), "abc...");
        assert_eq!(summary("   ", 100), "");
    }

    #[test]
    fn hashtags_and_counts() {
        assert_eq!(
            extract_hashtags("Loving #rust and #async_io! # not"),
            vec!["rust".to_string(), "async_io".to_string()]
        );
        assert_eq!(character_count("a b\nc"), 3);
        assert_eq!(reading_minutes(""), 0);
        assert_eq!(reading_minutes(&"x".repeat(201)), 2);

        let stats = DraftStats::of("Short note. #tag");
        assert_eq!(stats.suggested_title, "Short note");
        assert_eq!(stats.hashtags, vec!["tag".to_string()]);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn hashtags_stop_at_non_ascii_characters() {
        assert_eq!(extract_hashtags("#tag—x"), vec!["tag".to_string()]);
        assert_eq!(
            extract_hashtags("#café ##über #naïve_2"),
            vec!["caf".to_string(), "na".to_string()]
        );
        assert!(extract_hashtags("#—#").is_empty());
    }
}
