//! One-shot query commands against the local dataset.

use serde_json::json;

use crate::config::Settings;
use crate::services::{MatchMode, RawBounds};

use super::helpers::{load_service, print_features};

/// Search area descriptions by keyword.
pub async fn cmd_search(
    settings: &Settings,
    keyword: &str,
    token: bool,
    as_json: bool,
) -> anyhow::Result<()> {
    let service = load_service(settings).await?;
    let mode = if token {
        MatchMode::Token
    } else {
        MatchMode::Substring
    };

    let features = service.search_descriptions(Some(keyword), mode)?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "keywordData": features }))?
        );
    } else {
        print_features(&format!("Descriptions matching '{}'", keyword), &features);
    }
    Ok(())
}

/// List features intersecting a bounding box.
pub async fn cmd_redlining(
    settings: &Settings,
    bounds: &RawBounds,
    as_json: bool,
) -> anyhow::Result<()> {
    let service = load_service(settings).await?;
    let bbox = bounds.parse()?;
    let features = service.features_in(&bbox);

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "redlinedData": features }))?
        );
    } else {
        print_features(&format!("Features in {}", bbox), &features);
    }
    Ok(())
}
