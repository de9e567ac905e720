//! Command-line surface for `postdash`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use postdash::config::SettingsOverrides;
use postdash::filter::{SortBy, SortOrder};
use postdash_api_types::{CommentId, PostId, UserId};

#[derive(Parser, Debug)]
#[command(name = "postdash", version, about = "Headless posts dashboard", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: SettingsOverrides,

    /// Dashboard location the list views start from, either a full URL or a
    /// query string such as `?tag=love&skip=10`
    #[arg(long, env = "POSTDASH_LOCATION", default_value = "", global = true)]
    pub location: String,

    /// Print JSON instead of text
    #[arg(long, default_value_t = false, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filtered post listings and post mutations
    Posts(PostsArgs),
    /// Comments of one post
    Comments(CommentsArgs),
    /// User profiles
    Users(UsersArgs),
    /// Tag listing
    Tags(TagsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts for the current location, adjusted by any filter flags
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        sort_by: Option<SortBy>,
        #[arg(long)]
        order: Option<SortOrder>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        skip: Option<u32>,
    },
    /// Show a post from the current list together with its comments
    Show { id: PostId },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        body_file: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        user_id: UserId,
    },
    /// Update the title and/or body of a post
    Update {
        id: PostId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Delete a post
    Delete { id: PostId },
}

#[derive(Parser, Debug)]
pub struct CommentsArgs {
    #[command(subcommand)]
    pub action: CommentsCmd,
}

#[derive(Subcommand, Debug)]
pub enum CommentsCmd {
    /// List the comments of a post
    List { post_id: PostId },
    /// Add a comment to a post
    Add {
        post_id: PostId,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        body_file: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        user_id: UserId,
    },
    /// Replace the body of a comment
    Edit {
        id: CommentId,
        #[arg(long)]
        post_id: PostId,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Delete a comment
    Delete {
        id: CommentId,
        #[arg(long)]
        post_id: PostId,
    },
    /// Like a comment
    Like {
        id: CommentId,
        #[arg(long)]
        post_id: PostId,
    },
}

#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub action: UsersCmd,
}

#[derive(Subcommand, Debug)]
pub enum UsersCmd {
    /// Show a user profile
    Show { id: UserId },
}

#[derive(Parser, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub action: TagsCmd,
}

#[derive(Subcommand, Debug)]
pub enum TagsCmd {
    /// List every tag
    List,
}
