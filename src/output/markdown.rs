//! Markdown run report generation

use crate::output::report::RunReport;
use crate::output::ExportError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown run report to `output_path`
pub fn write_markdown_report(report: &RunReport, output_path: &Path) -> Result<(), ExportError> {
    let markdown = format_markdown_report(report);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run report as markdown
pub fn format_markdown_report(report: &RunReport) -> String {
    let mut md = String::new();

    md.push_str("# Prensa Scrape Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Articles Scraped**: {}\n",
        report.total_scraped()
    ));
    md.push_str(&format!(
        "- **Unique Articles**: {}\n",
        report.unique_articles
    ));
    md.push_str(&format!(
        "- **Duplicates Skipped**: {}\n",
        report.total_duplicates()
    ));
    md.push_str(&format!(
        "- **Failed Fetches**: {}\n",
        report.total_failures()
    ));
    md.push_str(&format!(
        "- **Cross-Portal Collisions**: {}\n\n",
        report.collisions
    ));

    if !report.portals.is_empty() {
        md.push_str("## Portals\n\n");
        md.push_str(
            "| Portal | Listings | Listing Failures | Links | Duplicates | Articles | Article Failures | Success | Time (s) |\n",
        );
        md.push_str(
            "|--------|----------|------------------|-------|------------|----------|------------------|---------|----------|\n",
        );

        for portal in &report.portals {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {:.1}% | {:.1} |\n",
                portal.portal,
                portal.listings_fetched,
                portal.listings_failed,
                portal.links_discovered,
                portal.duplicates_skipped,
                portal.articles_scraped,
                portal.article_failures,
                portal.success_rate(),
                portal.elapsed.as_secs_f64()
            ));
        }
        md.push('\n');
    }

    md
}
