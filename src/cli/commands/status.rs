//! Dataset status command.

use console::style;

use crate::config::Settings;

use super::helpers::load_service;

/// Load the dataset and print what was admitted.
pub async fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let service = load_service(settings).await?;
    let report = service.dataset().report();

    println!("\n{}", style("Classify Dataset").bold());
    println!("{}", "-".repeat(40));
    println!(
        "{:<16} {}",
        "Source:",
        report.source.as_deref().unwrap_or("(in memory)")
    );
    println!("{:<16} {}", "Features:", report.features);
    println!("{:<16} {}", "Descriptions:", report.descriptions);
    if report.skipped > 0 {
        println!(
            "{:<16} {}",
            "Skipped:",
            style(report.skipped).yellow()
        );
    } else {
        println!("{:<16} 0", "Skipped:");
    }
    println!("{:<16} {}", "Index:", service.index_name());
    println!("{:<16} {}", "Bind:", settings.bind);

    Ok(())
}
