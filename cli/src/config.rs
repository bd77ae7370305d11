use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use playground_core::ContentType;

#[derive(Debug, Parser)]
#[command(name = "playground", version, about = "API playground and porter data uploader")]
pub struct Cli {
    /// Server hosting `/static/apiPayloads.json` and `/uploadPorterData`.
    #[arg(long, env = "PLAYGROUND_SERVER", default_value = "http://127.0.0.1:3000", global = true)]
    pub server: String,

    /// Give up on a request after this many seconds. Unset waits forever.
    #[arg(long, env = "PLAYGROUND_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the preset request templates.
    Templates,
    /// Apply a template to an empty form and print the result.
    Show { key: String },
    /// Build a request from the form fields and send it.
    Send(SendArgs),
    /// Upload porter order and driver data.
    Upload(UploadArgs),
}

#[derive(Debug, Default, Args)]
pub struct SendArgs {
    /// Start from this template; explicit flags override its fields.
    #[arg(long)]
    pub template: Option<String>,

    /// Prefix for the endpoint. Defaults to --server.
    #[arg(long, env = "PLAYGROUND_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, short = 'X')]
    pub method: Option<String>,

    #[arg(long)]
    pub endpoint: Option<String>,

    /// `json` or `form-data`.
    #[arg(long, value_parser = parse_content_type)]
    pub content_type: Option<ContentType>,

    #[arg(long)]
    pub auth_type: Option<String>,

    /// Sent as `Authorization: Bearer <token>`.
    #[arg(long, env = "PLAYGROUND_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Raw JSON body text, sent as-is.
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Multipart field as `name=value`. Repeatable.
    #[arg(long = "attr", value_name = "NAME=VALUE")]
    pub attributes: Vec<String>,

    /// File sent under the `file` field. Repeatable.
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[arg(long)]
    pub order_data: Option<PathBuf>,

    #[arg(long)]
    pub driver_data: Option<PathBuf>,
}

fn parse_content_type(value: &str) -> Result<ContentType, String> {
    match value {
        "json" => Ok(ContentType::Json),
        "form-data" => Ok(ContentType::FormData),
        other => Err(format!("expected `json` or `form-data`, got `{other}`")),
    }
}

/// Split `name=value`; a missing `=` gives an empty value.
pub fn split_attribute(raw: &str) -> (&str, &str) {
    raw.split_once('=').unwrap_or((raw, ""))
}
