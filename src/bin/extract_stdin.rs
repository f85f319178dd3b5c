//! Reads one forum page from stdin and prints the extracted records as JSON.
//!
//! Usage: `extract_stdin <page> [arg]` where `<page>` is one of
//! `list`, `feed [cell-selector]`, `topic <id>`, `member <username>`,
//! `replies`, `profile`, `nodes`. Set `RUST_LOG=debug` for extraction logs.

use std::env;
use std::io::{self, Read};
use std::process::ExitCode;

use forum_scrape::{dom, DEFAULT_CELL_SELECTOR};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Output {
    page: String,
    logged_in: bool,
    pagination: forum_scrape::Page,
    records: Value,
}

fn usage() -> ExitCode {
    eprintln!(
        "usage: extract_stdin \
         <list|feed [selector]|topic <id>|member <username>|replies|profile|nodes>"
    );
    ExitCode::from(2)
}

fn to_json<T: Serialize>(records: forum_scrape::Result<T>) -> Result<Value, String> {
    let records = records.map_err(|e| e.to_string())?;
    serde_json::to_value(records).map_err(|e| e.to_string())
}

fn extract(page: &str, arg: Option<&str>, doc: &dom::Document) -> Result<Value, String> {
    match page {
        "list" => to_json(forum_scrape::extract_topic_list(doc)),
        "feed" => {
            let selector = arg.unwrap_or(DEFAULT_CELL_SELECTOR);
            to_json(forum_scrape::extract_filtered_topic_list(doc, selector))
        }
        "topic" => {
            let id = arg
                .and_then(|id| id.parse::<u64>().ok())
                .ok_or_else(|| "topic requires a numeric id".to_string())?;
            to_json(forum_scrape::extract_topic_detail(doc, id))
        }
        "member" => {
            let username = arg.ok_or_else(|| "member requires a username".to_string())?;
            to_json(forum_scrape::extract_member_profile(doc, username))
        }
        "replies" => to_json(forum_scrape::extract_member_reply_log(doc)),
        "profile" => to_json(forum_scrape::extract_profile_widget(doc)),
        "nodes" => to_json(forum_scrape::extract_navigation_directory(doc)),
        other => Err(format!("unknown page kind `{other}`")),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(page) = args.first() else {
        return usage();
    };
    let arg = args.get(1).map(String::as_str);

    let mut html = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut html) {
        eprintln!("Failed to read from stdin: {e}");
        return ExitCode::FAILURE;
    }
    let doc = dom::parse_bytes(&html);

    let records = match extract(page, arg, &doc) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let output = Output {
        page: page.clone(),
        logged_in: forum_scrape::is_logged_in(&doc),
        pagination: forum_scrape::pagination(&doc, 1),
        records,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}
