//! Text rendering of a search session
//!
//! Turns a [`SearchView`] snapshot into lines on an [`OutputWriter`]:
//! placeholder rows while loading, course cards, the recommendation notice
//! with its fallback cards, page controls and the retry hint after a failure.

use super::output::OutputWriter;
use crate::Course;
use crate::search::{PAGE_SIZE, SearchView};
use colored::Colorize;

/// Placeholder row shown for each pending card
pub const SKELETON_LINE: &str = "░░░░░░░░░░░░░░░░░░░░  ░░░░░░░░░░";

/// Pages listed before the page controls collapse into gaps
const FULL_WINDOW: u32 = 7;

/// Render a full snapshot
pub fn render_view(view: &SearchView, output: &dyn OutputWriter) {
    output.write(&header(view));

    let result = &view.result;
    if result.loading {
        render_skeleton(output);
        return;
    }

    if let Some(message) = &result.error {
        output.error(&format!("Could not load courses: {message}"));
        output.info("Choose \"Retry\" to load this page again.");
        return;
    }

    for course in &result.visible {
        output.write(&course_card(course));
    }

    if let Some(notice) = result.notice() {
        output.warning(&notice.to_string());
        for course in &result.fallback {
            output.write(&course_card(course));
        }
    }

    if result.shows_pagination() {
        let total = u32::try_from(result.total_pages).unwrap_or(u32::MAX);
        output.write(&page_nav(view.search.page(), total));
    }
}

/// One placeholder row per course slot
pub fn render_skeleton(output: &dyn OutputWriter) {
    for _ in 0..PAGE_SIZE {
        output.info(SKELETON_LINE);
    }
}

/// Title line naming the query and match count
#[must_use]
pub fn header(view: &SearchView) -> String {
    let subject = view.search.query().map_or_else(
        || "All courses".to_string(),
        |q| format!("Results for \"{q}\""),
    );

    if view.result.loading || view.result.is_failed() {
        subject.bold().to_string()
    } else {
        format!(
            "{} ({} match{})",
            subject.bold(),
            view.result.total_matches,
            if view.result.total_matches == 1 { "" } else { "es" }
        )
    }
}

/// Multi-line card for one course
#[must_use]
pub fn course_card(course: &Course) -> String {
    let mut card = format!("  {} by {}", course.title.bold(), course.author.cyan());
    if !course.description.is_empty() {
        card.push_str(&format!("\n    {}", course.description));
    }
    card.push_str(&format!("\n    {}", course.preview_href().dimmed()));
    card
}

/// Page numbers to list, `None` marking a gap
///
/// Short ranges list every page; longer ones keep the first and last page
/// and the neighbours of `current`.
#[must_use]
pub fn page_window(current: u32, total: u32) -> Vec<Option<u32>> {
    if total <= FULL_WINDOW {
        return (1..=total).map(Some).collect();
    }

    let mut pages = vec![1, total];
    pages.extend(
        (current.saturating_sub(1)..=current.saturating_add(1)).filter(|p| (1..=total).contains(p)),
    );
    pages.sort_unstable();
    pages.dedup();

    let mut window = Vec::with_capacity(pages.len() + 2);
    let mut previous = 0;
    for page in pages {
        if page > previous + 1 {
            window.push(None);
        }
        window.push(Some(page));
        previous = page;
    }
    window
}

/// Page controls line, e.g. `‹ 1 [2] 3 … 9 ›`
#[must_use]
pub fn page_nav(current: u32, total: u32) -> String {
    let pages = page_window(current, total)
        .into_iter()
        .map(|page| match page {
            Some(p) if p == current => format!("[{p}]").bold().to_string(),
            Some(p) => p.to_string(),
            None => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let previous = if current > 1 { "‹" } else { " " };
    let next = if current < total { "›" } else { " " };
    format!("{previous} {pages} {next}")
}
