#![deny(clippy::all, clippy::pedantic)]

use std::num::NonZeroU32;

use postdash::filter::{SortBy, SortOrder};
use postdash::forms::{EditPostForm, NewPostForm};
use postdash_api_types::{Post, PostId};
use serde_json::json;

use crate::args::PostsCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::submitted;
use crate::io::{read_opt_value, read_value};
use crate::print::emit;

pub async fn handle(ctx: &mut Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List {
            search,
            tag,
            sort_by,
            order,
            limit,
            skip,
        } => {
            let flags = ListFlags {
                search,
                tag,
                sort_by,
                order,
                limit,
                skip,
            };
            list(ctx, flags).await
        }
        PostsCmd::Show { id } => show(ctx, id).await,
        PostsCmd::Create {
            title,
            body,
            body_file,
            user_id,
        } => {
            let body = read_value(body, body_file)?;
            create(
                ctx,
                NewPostForm {
                    title,
                    body,
                    user_id,
                },
            )
            .await
        }
        PostsCmd::Update {
            id,
            title,
            body,
            body_file,
        } => {
            let body = read_opt_value(body, body_file)?;
            update(
                ctx,
                EditPostForm {
                    post_id: id,
                    title,
                    body,
                },
            )
            .await
        }
        PostsCmd::Delete { id } => delete(ctx, id).await,
    }
}

struct ListFlags {
    search: Option<String>,
    tag: Option<String>,
    sort_by: Option<SortBy>,
    order: Option<SortOrder>,
    limit: Option<u32>,
    skip: Option<u32>,
}

async fn list(ctx: &mut Ctx, flags: ListFlags) -> Result<(), CliError> {
    let dashboard = &mut ctx.dashboard;
    if let Some(limit) = flags.limit {
        let limit = NonZeroU32::new(limit)
            .ok_or_else(|| CliError::InvalidInput("limit must be greater than zero".into()))?;
        dashboard.set_page_size(limit);
    }
    if let Some(tag) = flags.tag {
        dashboard.select_tag(tag);
    }
    if let Some(search) = flags.search {
        dashboard.set_search(search);
    }
    if flags.sort_by.is_some() || flags.order.is_some() {
        let sort_by = flags.sort_by.unwrap_or(dashboard.filter().sort_by);
        dashboard.set_sort(sort_by, flags.order);
    }
    if let Some(skip) = flags.skip {
        dashboard.set_skip(skip);
    }

    let view = dashboard.load().await?;
    let query = dashboard.location().query_string();
    let posts: Vec<Post> = view
        .table
        .rows
        .iter()
        .filter_map(|row| dashboard.queries().post_detail(row.id).ok())
        .collect();

    let text = format!("{view}location: ?{query}\n");
    let value = json!({
        "location": query,
        "total": view.table.total,
        "posts": posts,
    });
    emit(ctx, text, &value)
}

/// There is no single-post endpoint, so the post must be part of the list
/// the location selects.
async fn show(ctx: &mut Ctx, id: PostId) -> Result<(), CliError> {
    ctx.dashboard.load().await?;
    let view = ctx.dashboard.post_detail(id).await?;
    let post = ctx.dashboard.queries().post_detail(id)?;
    let comments = ctx.dashboard.queries().comments(id).await?;
    emit(ctx, view, &json!({ "post": post, "comments": comments }))
}

async fn create(ctx: &mut Ctx, form: NewPostForm) -> Result<(), CliError> {
    ctx.dashboard.open_add_post();
    if let Some(draft) = ctx.dashboard.add_post.form_mut() {
        *draft = form;
    }
    let post = submitted(ctx.dashboard.submit_add_post().await)?;
    emit(
        ctx,
        format!("created post {}: {}\n", post.id, post.title),
        &post,
    )
}

async fn update(ctx: &mut Ctx, form: EditPostForm) -> Result<(), CliError> {
    ctx.dashboard.edit_post.open(form);
    let post = submitted(ctx.dashboard.submit_edit_post().await)?;
    emit(
        ctx,
        format!("updated post {}: {}\n", post.id, post.title),
        &post,
    )
}

async fn delete(ctx: &mut Ctx, id: PostId) -> Result<(), CliError> {
    ctx.dashboard.delete_post(id).await?;
    emit(ctx, format!("deleted post {id}\n"), &json!({ "deleted": id }))
}
