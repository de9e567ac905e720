#![deny(clippy::all, clippy::pedantic)]

use httpmock::MockServer;
use postdash::config::{self, SettingsOverrides};
use postdash::mutations::MutationError;
use serde_json::json;
use tempfile::NamedTempFile;

use crate::args::{CommentsCmd, PostsCmd};
use crate::client::{CliError, Ctx};
use crate::handlers::{comments, posts};

fn ctx(server: &MockServer, location: &str) -> Ctx {
    let overrides = SettingsOverrides {
        api_origin: Some(server.base_url()),
        ..Default::default()
    };
    let settings = config::load(&overrides).expect("settings");
    Ctx::new(&settings, location, false).expect("ctx")
}

fn tmp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write tmp");
    file
}

fn mock_decorations(server: &MockServer) {
    server.mock(|when, then| {
        when.method("GET").path("/api/users");
        then.status(200).json_body(json!({"users": [], "total": 0}));
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/tags");
        then.status(200).json_body(json!([]));
    });
}

#[test]
fn read_value_prefers_file_over_inline() -> Result<(), CliError> {
    let file = tmp_file("from-file");
    let val = crate::io::read_value(Some("inline".into()), Some(file.path().to_path_buf()))?;
    assert_eq!(val, "from-file");
    Ok(())
}

#[test]
fn read_value_requires_some_input() {
    let err = crate::io::read_value(None, None).expect_err("missing body");
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn list_tag_flag_overrides_location_search() -> Result<(), CliError> {
    let server = MockServer::start();
    mock_decorations(&server);
    let by_tag = server.mock(|when, then| {
        when.method("GET").path("/api/posts/tag/love");
        then.status(200).json_body(json!({
            "posts": [{"id": 4, "title": "Tagged", "body": "Body text", "userId": 1, "tags": ["love"]}],
            "total": 1
        }));
    });
    let search = server.mock(|when, then| {
        when.method("GET").path("/api/posts/search");
        then.status(200).json_body(json!({"posts": [], "total": 0}));
    });

    let mut ctx = ctx(&server, "?q=history&skip=20");
    posts::handle(
        &mut ctx,
        PostsCmd::List {
            search: None,
            tag: Some("love".into()),
            sort_by: None,
            order: None,
            limit: None,
            skip: None,
        },
    )
    .await?;

    by_tag.assert();
    search.assert_calls(0);
    assert_eq!(ctx.dashboard.filter().skip, 0);
    assert_eq!(ctx.dashboard.location().query_string(), "q=history&tag=love");
    Ok(())
}

#[tokio::test]
async fn invalid_post_is_rejected_before_any_request() {
    let server = MockServer::start();
    let add = server.mock(|when, then| {
        when.method("POST").path("/api/posts/add");
        then.status(201).json_body(json!({}));
    });

    let mut ctx = ctx(&server, "");
    let err = posts::handle(
        &mut ctx,
        PostsCmd::Create {
            title: "  ".into(),
            body: Some("short".into()),
            body_file: None,
            user_id: 1,
        },
    )
    .await
    .expect_err("invalid form");

    assert!(matches!(
        err,
        CliError::Mutation(MutationError::Validation(_))
    ));
    add.assert_calls(0);
}

#[tokio::test]
async fn like_of_unknown_comment_fails_without_patch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/comments/post/1");
        then.status(200).json_body(json!({
            "comments": [{"id": 1, "body": "Nice", "postId": 1, "likes": 2, "user": {"id": 3, "username": "ann"}}],
            "total": 1
        }));
    });
    let patch = server.mock(|when, then| {
        when.method("PATCH").path("/api/comments/9");
        then.status(200).json_body(json!({}));
    });

    let mut ctx = ctx(&server, "");
    let err = comments::handle(&mut ctx, CommentsCmd::Like { id: 9, post_id: 1 })
        .await
        .expect_err("unknown comment");
    assert!(matches!(err, CliError::InvalidInput(_)));
    patch.assert_calls(0);
}
