#![deny(clippy::all, clippy::pedantic)]

use std::io::Write;

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use serde_json::json;
use tempfile::NamedTempFile;

fn postdash(server: &MockServer) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postdash"));
    cmd.env("POSTDASH_API_ORIGIN", server.base_url())
        .env_remove("POSTDASH_LOCATION")
        .env_remove("POSTDASH_CONFIG_FILE");
    cmd
}

fn mock_decorations(server: &MockServer) {
    server.mock(|when, then| {
        when.method("GET")
            .path("/api/users")
            .query_param("limit", "0")
            .query_param("select", "username,image");
        then.status(200).json_body(json!({
            "users": [{"id": 5, "username": "emilys"}],
            "total": 1
        }));
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/tags");
        then.status(200).json_body(json!([
            {"slug": "history", "url": "https://api/posts/tag/history", "name": "History"}
        ]));
    });
}

#[test]
fn posts_list_renders_the_table() {
    let server = MockServer::start();
    mock_decorations(&server);
    let list = server.mock(|when, then| {
        when.method("GET")
            .path("/api/posts")
            .query_param("limit", "10")
            .query_param("skip", "10");
        then.status(200).json_body(json!({
            "posts": [{
                "id": 11,
                "title": "His mother had always taught him",
                "body": "His mother had always taught him not to ever think of himself.",
                "userId": 5,
                "tags": ["history"],
                "reactions": {"likes": 192, "dislikes": 25}
            }],
            "total": 30, "skip": 10, "limit": 10
        }));
    });

    let assert = postdash(&server)
        .args(["--location", "?skip=10", "posts", "list"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("His mother had always taught him"));
    assert!(output.contains("emilys"));
    assert!(output.contains("location: ?skip=10"));
    list.assert();
}

#[test]
fn posts_list_json_lists_posts() {
    let server = MockServer::start();
    mock_decorations(&server);
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/search").query_param("q", "love");
        then.status(200).json_body(json!({
            "posts": [{"id": 2, "title": "Love", "body": "About love.", "userId": 5}],
            "total": 1
        }));
    });

    postdash(&server)
        .args(["--json", "posts", "list", "--search", "love"])
        .assert()
        .success()
        .stdout(contains("\"location\": \"q=love\""))
        .stdout(contains("\"title\": \"Love\""));
}

#[test]
fn tags_list_prints_slugs() {
    let server = MockServer::start();
    mock_decorations(&server);

    postdash(&server)
        .args(["tags", "list"])
        .assert()
        .success()
        .stdout(contains("history (History)"));
}

#[test]
fn create_post_reads_body_file() {
    let server = MockServer::start();
    let body = "A post body that is long enough to pass validation.";
    let add = server.mock(|when, then| {
        when.method("POST").path("/api/posts/add").json_body(json!({
            "title": "Fresh",
            "body": body,
            "userId": 1
        }));
        then.status(201).json_body(json!({
            "id": 252, "title": "Fresh", "body": body, "userId": 1
        }));
    });

    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(body.as_bytes()).expect("write body");

    postdash(&server)
        .args(["posts", "create", "--title", "Fresh", "--body-file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("created post 252: Fresh"));
    add.assert();
}

#[test]
fn invalid_post_fails_without_request() {
    let server = MockServer::start();
    let add = server.mock(|when, then| {
        when.method("POST").path("/api/posts/add");
        then.status(201).json_body(json!({}));
    });

    postdash(&server)
        .args(["posts", "create", "--title", "", "--body", "too short"])
        .assert()
        .failure()
        .stderr(contains("Validation"));
    add.assert_calls(0);
}

#[test]
fn server_error_exits_non_zero() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/users/42");
        then.status(404).body("user not found");
    });

    postdash(&server)
        .args(["users", "show", "42"])
        .assert()
        .failure();
}

#[test]
fn zero_page_size_is_a_config_error() {
    let server = MockServer::start();
    postdash(&server)
        .args(["--page-size", "0", "tags", "list"])
        .assert()
        .failure()
        .stderr(contains("dashboard.page_size"));
}
