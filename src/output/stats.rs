//! Console rendering of the run report and the scraped data summary

use crate::output::report::RunReport;
use crate::output::tabular::TabularView;

/// Prints the run report to stdout in a formatted manner
pub fn print_report(report: &RunReport) {
    println!("=== Scrape Report ===\n");

    println!("Overview:");
    println!("  Started: {}", report.started_at.to_rfc3339());
    if let Some(seconds) = report.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!("  Articles scraped: {}", report.total_scraped());
    println!("  Unique articles: {}", report.unique_articles);
    println!("  Duplicates skipped: {}", report.total_duplicates());
    println!("  Failed fetches: {}", report.total_failures());
    if report.collisions > 0 {
        println!("  Cross-portal URL collisions: {}", report.collisions);
    }
    println!();

    println!("Portals:");
    for portal in &report.portals {
        println!(
            "  {}: {} articles, {} failed ({:.1}%), {} listing pages ({} failed), {} duplicates, {:.1}s",
            portal.portal,
            portal.articles_scraped,
            portal.article_failures,
            portal.success_rate(),
            portal.listings_fetched,
            portal.listings_failed,
            portal.duplicates_skipped,
            portal.elapsed.as_secs_f64()
        );
    }
    println!();
}

/// Prints totals, articles per newspaper and the first rows of the data
pub fn print_data_summary(view: &TabularView, preview_rows: usize) {
    print!("{}", format_data_summary(view, preview_rows));
}

/// Renders the data summary printed by [`print_data_summary`]
///
/// The preview shows newspaper, headline and date of each of the first
/// `preview_rows` articles.
pub fn format_data_summary(view: &TabularView, preview_rows: usize) -> String {
    let mut out = format!("Total articles scraped: {}\n", view.len());

    if let Some(counts) = view.value_counts("newspaper") {
        out.push_str("\nArticles per newspaper:\n");
        for (newspaper, count) in counts {
            out.push_str(&format!("  {}: {}\n", newspaper, count));
        }
    }

    let head = view.head(preview_rows);
    if head.is_empty() {
        return out;
    }

    out.push_str(&format!("\nFirst {} articles:\n", head.len()));
    let newspapers = head.column("newspaper").unwrap_or_default();
    let headlines = head.column("headline").unwrap_or_default();
    let dates = head.column("date").unwrap_or_default();
    for ((newspaper, headline), date) in newspapers.iter().zip(&headlines).zip(&dates) {
        out.push_str(&format!("  [{}] {} | {}\n", newspaper, headline, date));
    }

    out
}
