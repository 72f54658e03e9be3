//! Links API Walkthrough Binary
//!
//! Exercises the flat link algebra and the recursive notation codec against
//! an in-memory store and logs every step.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin links-demo
//!
//! # Pick the matching link with the smallest id (the oldest) on update/delete
//! LINKS_MATCH_ORDER=lowest-id cargo run --bin links-demo
//! ```
//!
//! # Environment Variables
//!
//! - `LINKS_MATCH_ORDER`: `store` (default) or `lowest-id`
//! - `LINKS_TEMP_ID_START`: first temporary id (default: 1000000)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::sync::Arc;

use links_core::models::{Node, References};
use links_core::{
    Flow, InMemoryLinkStore, Link, LinkChange, LinkConstants, LinksConfig, LinksService,
    RecursiveLinks, Restriction,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = LinksConfig::from_env()?;
    tracing::info!("Links demo");
    tracing::info!("==================================");
    tracing::info!("Match order: {:?}", config.match_order);

    let store = Arc::new(InMemoryLinkStore::new());
    let links = LinksService::with_config(store, config);

    flat_api(&links).await?;
    recursive_api(RecursiveLinks::new(links)).await?;

    tracing::info!("Demo complete");
    Ok(())
}

async fn flat_api(links: &LinksService) -> anyhow::Result<()> {
    tracing::info!("--- Flat API ---");
    tracing::info!(
        "Constants: continue={:?}, break={:?}, any={}",
        LinkConstants::CONTINUE,
        LinkConstants::BREAK,
        LinkConstants::ANY
    );

    let first = links.create(&[1, 2], None).await?;
    let second = links.create(&[3, 4], None).await?;
    links.create(&[1, 5], None).await?;
    tracing::info!("Created links {} (1 -> 2) and {} (3 -> 4)", first, second);

    tracing::info!("Total links: {}", links.count(Restriction::All).await?);
    tracing::info!(
        "Links with source 1: {}",
        links.count([1, LinkConstants::ANY]).await?
    );

    let mut visited = 0;
    let mut print_link = |link: &Link| {
        tracing::info!("Link {}: {} -> {}", link.id, link.source, link.target);
        visited += 1;
        if visited >= 2 {
            LinkConstants::BREAK
        } else {
            LinkConstants::CONTINUE
        }
    };
    links.each(Restriction::All, Some(&mut print_link)).await?;

    let mut log_change = |change: &LinkChange| {
        tracing::info!(
            "{}: {:?} -> {:?}",
            change.kind(),
            change.before,
            change.after
        )
    };
    links
        .update(Restriction::by_id(first), &[10, 20], Some(&mut log_change))
        .await?;
    links
        .delete(Restriction::by_id(second), Some(&mut log_change))
        .await?;

    tracing::info!("Final link count: {}", links.count(Restriction::All).await?);
    Ok(())
}

async fn recursive_api(codec: RecursiveLinks) -> anyhow::Result<()> {
    tracing::info!("--- Recursive API ---");

    let nested = nodes(json!([[1, 2], [3, 4]]))?;
    let ids = codec.create_from_nested_array(&nested).await?;
    tracing::info!(
        "Nested array {} created links {:?} -> {}",
        serde_json::to_string(&nested)?,
        ids,
        codec.to_links_notation(&nested)
    );

    let refs = References::try_from(json!({ "1": [1, { "2": [5, 6] }, 3, 4] }))?;
    let map = codec.create_from_nested_object(&refs).await?;
    tracing::info!(
        "Reference map {} -> {}",
        serde_json::to_string(&map)?,
        codec.to_links_notation_with_refs(&refs)
    );

    let parsed = codec.parse_links_notation("((1 2) (3 4))");
    tracing::info!("Parsed ((1 2) (3 4)) -> {}", serde_json::to_string(&parsed)?);

    let original = nodes(json!([[7, 8], [9, 10]]))?;
    let text = codec.to_links_notation(&original);
    let back = codec.parse_links_notation(&text);
    tracing::info!("Round trip via {}: match={}", text, back == original);

    let stored = codec.read_as_nested_array(Restriction::All).await?;
    let preview: Vec<&Node> = stored.iter().take(5).collect();
    tracing::info!("Stored links (first 5): {}", serde_json::to_string(&preview)?);

    let mut total = 0;
    let mut count_all = |_: &Link| {
        total += 1;
        Flow::Continue
    };
    codec
        .links()
        .each(Restriction::All, Some(&mut count_all))
        .await?;
    tracing::info!("Total links via underlying service: {}", total);
    Ok(())
}

fn nodes(value: serde_json::Value) -> anyhow::Result<Vec<Node>> {
    Node::try_from(value)?
        .into_items()
        .map_err(|other| anyhow::anyhow!("expected an array, got {:?}", other))
}
