//! Shared helper functions for CLI commands.

use console::style;

use crate::config::Settings;
use crate::dataset::Dataset;
use crate::models::RedliningFeature;
use crate::services::QueryService;

/// Load the configured dataset and wrap it in a query service.
pub async fn load_service(settings: &Settings) -> anyhow::Result<QueryService> {
    let dataset = Dataset::load(&settings.dataset_path).await?;
    Ok(QueryService::new(dataset.into(), settings.index))
}

/// Print one line per feature, or a notice when there are none.
pub fn print_features(title: &str, features: &[&RedliningFeature]) {
    if features.is_empty() {
        println!("{} No matching features", style("!").yellow());
        return;
    }

    println!("\n{}", style(title).bold());
    println!("{}", "-".repeat(60));
    for feature in features {
        println!(
            "{:<50} {:>3} ring(s)",
            truncate(&feature.label(), 50),
            feature.geometry.ring_count()
        );
    }
    println!("{}", "-".repeat(60));
    println!("{} feature(s)", features.len());
}

/// Truncate to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Providence", 20), "Providence");
        assert_eq!(truncate("Blackstone Boulevard", 10), "Blackst...");
    }
}
