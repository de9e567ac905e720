#![deny(clippy::all, clippy::pedantic)]

use std::fmt::Write as _;

use postdash::forms::EditCommentForm;
use postdash_api_types::{Comment, CommentId, PostId, UserId};
use serde_json::json;

use crate::args::CommentsCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::submitted;
use crate::io::read_value;
use crate::print::emit;

pub async fn handle(ctx: &mut Ctx, cmd: CommentsCmd) -> Result<(), CliError> {
    match cmd {
        CommentsCmd::List { post_id } => list(ctx, post_id).await,
        CommentsCmd::Add {
            post_id,
            body,
            body_file,
            user_id,
        } => {
            let body = read_value(body, body_file)?;
            add(ctx, post_id, user_id, body).await
        }
        CommentsCmd::Edit {
            id,
            post_id,
            body,
            body_file,
        } => {
            let body = read_value(body, body_file)?;
            edit(
                ctx,
                EditCommentForm {
                    comment_id: id,
                    post_id,
                    body,
                },
            )
            .await
        }
        CommentsCmd::Delete { id, post_id } => delete(ctx, id, post_id).await,
        CommentsCmd::Like { id, post_id } => like(ctx, id, post_id).await,
    }
}

fn comment_line(comment: &Comment) -> String {
    format!(
        "#{} {} ({} likes): {}\n",
        comment.id, comment.user.username, comment.likes, comment.body
    )
}

async fn list(ctx: &mut Ctx, post_id: PostId) -> Result<(), CliError> {
    let comments = ctx.dashboard.queries().comments(post_id).await?;
    let mut text = String::new();
    if comments.is_empty() {
        text.push_str("no comments\n");
    }
    for comment in &comments {
        let _ = write!(text, "{}", comment_line(comment));
    }
    emit(ctx, text, &comments)
}

async fn add(ctx: &mut Ctx, post_id: PostId, user_id: UserId, body: String) -> Result<(), CliError> {
    ctx.dashboard.open_add_comment(post_id);
    if let Some(form) = ctx.dashboard.add_comment.form_mut() {
        form.user_id = user_id;
        form.body = body;
    }
    let comment = submitted(ctx.dashboard.submit_add_comment().await)?;
    emit(ctx, comment_line(&comment), &comment)
}

async fn edit(ctx: &mut Ctx, form: EditCommentForm) -> Result<(), CliError> {
    ctx.dashboard.edit_comment.open(form);
    let comment = submitted(ctx.dashboard.submit_edit_comment().await)?;
    emit(ctx, comment_line(&comment), &comment)
}

async fn delete(ctx: &mut Ctx, id: CommentId, post_id: PostId) -> Result<(), CliError> {
    ctx.dashboard
        .mutations()
        .delete_comment(id, post_id)
        .await?;
    emit(
        ctx,
        format!("deleted comment {id}\n"),
        &json!({ "deleted": id, "postId": post_id }),
    )
}

async fn like(ctx: &mut Ctx, id: CommentId, post_id: PostId) -> Result<(), CliError> {
    let comments = ctx.dashboard.queries().comments(post_id).await?;
    let comment = comments
        .iter()
        .find(|comment| comment.id == id)
        .ok_or_else(|| CliError::InvalidInput(format!("comment {id} not found on post {post_id}")))?;

    let likes = ctx.dashboard.like_comment(comment).send().await?;
    emit(
        ctx,
        format!("comment {id} now has {likes} likes\n"),
        &json!({ "id": id, "likes": likes }),
    )
}
