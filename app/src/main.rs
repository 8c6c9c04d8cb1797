//! Headless driver for the render hooks and the 7TV client.
//!
//! Reads host payloads from stdin and prints results as JSON, so the hooks
//! can be exercised without the chat client.

use std::io::Read;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use fakemote_lib::config::AppConfig;
use fakemote_lib::hooks;
use seventv_client::{BadgeCache, SearchController, SevenTvClient};

#[derive(Debug, Parser)]
#[command(name = "fakemote", about = "Inline 7TV emote links in chat messages")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Rewrite message content read from stdin.
    Rewrite {
        #[arg(long)]
        inline: bool,
    },
    /// Decide whether a link preview should be dropped.
    Embed {
        #[arg(long)]
        url: String,
        #[arg(long)]
        proxy_url: Option<String>,
        #[arg(long)]
        message: String,
    },
    /// Append the fake-emote notice to popout nodes read from stdin.
    Annotate {
        #[arg(long)]
        fake: bool,
    },
    /// Search the emote catalog. Empty text browses the configured category.
    Search {
        #[arg(default_value = "")]
        text: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Check whether a chat user displays a 7TV badge.
    Badge { user_id: String, badge_name: String },
}

fn read_stdin_json() -> anyhow::Result<Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(serde_json::from_str(&buffer)?)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    fakemote_lib::load_dotenv();
    let config = AppConfig::from_env();
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Rewrite { inline } => {
            let content = read_stdin_json()?;
            print_json(&hooks::render_message_content(&content, inline))?;
        }
        Cmd::Embed {
            url,
            proxy_url,
            message,
        } => {
            let embed = json!({ "type": "image", "url": url, "proxyURL": proxy_url });
            let drop = hooks::should_drop_embed(&embed, &json!({ "content": message }));
            print_json(&json!({ "drop": drop }))?;
        }
        Cmd::Annotate { fake } => {
            let nodes = read_stdin_json()?;
            print_json(&hooks::annotate_popout(&nodes, fake))?;
        }
        Cmd::Search { text, page } => {
            let client = SevenTvClient::with_endpoints(&config.gql_url, &config.api_base);
            let size = config.settings.image_size;
            let controller = SearchController::new(client, config.settings);
            controller.set_query(&text);
            controller.set_page(page);
            let outcome = controller.fetch().await;
            tracing::info!(?outcome, "Search finished");

            let state = controller.snapshot();
            let items: Vec<Value> = state
                .results
                .unwrap_or_default()
                .iter()
                .map(|emote| {
                    json!({
                        "name": emote.name,
                        "owner": emote.owner_name(),
                        "link": emote.link(size),
                    })
                })
                .collect();
            print_json(&json!({ "status": controller.status_line(), "emotes": items }))?;
        }
        Cmd::Badge {
            user_id,
            badge_name,
        } => {
            let client = SevenTvClient::with_endpoints(&config.gql_url, &config.api_base);
            let cache = BadgeCache::new(client, config.settings.show_badges);
            cache.has_badge(&user_id, &badge_name);
            while cache.pending() > 0 {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            let has = cache.has_badge(&user_id, &badge_name);
            print_json(&json!({ "user_id": user_id, "badge": badge_name, "has_badge": has }))?;
        }
    }

    Ok(())
}
