// SPDX-License-Identifier: Apache-2.0

//! Renderers for bookmark, project, theme and confirmation results.

use console::style;
use forkthis_core::{ProjectSnapshot, SortOrder};
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::{
    BookmarkListResult, BookmarkToggleResult, ExportResult, ImportResult, MessageResult,
    ProjectListResult, ProjectSavedResult, ShareResult, ThemeResult,
};

use super::{Renderable, accent};

/// One-line description of the non-default settings of a snapshot.
fn describe(snapshot: &ProjectSnapshot) -> String {
    let filters = &snapshot.filters;
    let mut parts = Vec::new();
    if let Some(difficulty) = filters.difficulty {
        parts.push(format!("difficulty={difficulty}"));
    }
    if let Some(label) = &filters.label {
        parts.push(format!("label={label}"));
    }
    if filters.sort != SortOrder::default() {
        parts.push(format!("sort={}", filters.sort));
    }
    for (name, on) in [
        ("open only", filters.open_only),
        ("beginner only", filters.beginner_only),
        ("bookmarks only", filters.bookmarks_only),
        ("summaries", snapshot.ai_summary),
    ] {
        if on {
            parts.push(name.to_string());
        }
    }
    if parts.is_empty() {
        "no filters".to_string()
    } else {
        parts.join(", ")
    }
}

impl Renderable for BookmarkToggleResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.bookmarked {
            writeln!(
                w,
                "{} Bookmarked {}#{}",
                style("*").yellow(),
                self.repo,
                self.number
            )
        } else {
            writeln!(w, "Removed bookmark {}#{}", self.repo, self.number)
        }
    }
}

impl Renderable for BookmarkListResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if self.bookmarks.is_empty() {
            writeln!(w, "{}", style("No bookmarks yet.").yellow())?;
            return Ok(());
        }
        for (repo, numbers) in &self.bookmarks {
            let numbers: Vec<String> = numbers.iter().map(|n| format!("#{n}")).collect();
            writeln!(
                w,
                "{}  {}",
                accent(ctx.theme).apply_to(repo),
                numbers.join(" ")
            )?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        for (repo, numbers) in &self.bookmarks {
            for number in numbers {
                writeln!(w, "- [{repo}#{number}](https://github.com/{repo}/issues/{number})")?;
            }
        }
        Ok(())
    }
}

impl Renderable for ProjectListResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if self.projects.is_empty() {
            writeln!(w, "{}", style("No saved projects.").yellow())?;
            writeln!(w, "Run `forkthis project save <name>` after a search.")?;
            return Ok(());
        }
        for row in &self.projects {
            let marker = if row.active { ">" } else { " " };
            writeln!(
                w,
                "{} {:<20} {:<30} {}",
                style(marker).green(),
                accent(ctx.theme).apply_to(&row.name),
                row.snapshot.repo,
                style(describe(&row.snapshot)).dim()
            )?;
        }
        Ok(())
    }
}

impl Renderable for ProjectSavedResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "{} Saved project {} ({}, {})",
            style("✓").green(),
            style(&self.name).bold(),
            self.snapshot.repo,
            describe(&self.snapshot)
        )
    }
}

impl Renderable for ExportResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let plural = if self.count == 1 { "" } else { "s" };
        writeln!(
            w,
            "{} Exported {} project{plural} to {}",
            style("✓").green(),
            self.count,
            self.path.display()
        )
    }
}

impl Renderable for ImportResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.cancelled {
            writeln!(
                w,
                "{} Import cancelled: {} already exist. Re-run with --yes to overwrite.",
                style("!").yellow(),
                self.conflicts.join(", ")
            )
        } else {
            let plural = if self.written == 1 { "" } else { "s" };
            writeln!(
                w,
                "{} Imported {} project{plural}",
                style("✓").green(),
                self.written
            )
        }
    }
}

impl Renderable for ShareResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{}", self.url)
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "[{}]({})", self.name, self.url)
    }
}

impl Renderable for ThemeResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        for theme in &self.available {
            if *theme == self.theme {
                writeln!(w, "{} {}", style(">").green(), accent(*theme).apply_to(theme))?;
            } else {
                writeln!(w, "  {}", style(theme).dim())?;
            }
        }
        Ok(())
    }
}

impl Renderable for MessageResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{} {}", style("✓").green(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use forkthis_core::{Difficulty, FeedFilters};

    fn ctx() -> OutputContext {
        OutputContext::from_cli(OutputFormat::Text, true, false)
    }

    fn rendered(result: &impl Renderable) -> String {
        let mut buf = Vec::new();
        result.render_text(&mut buf, &ctx()).unwrap();
        console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).into_owned()
    }

    #[test]
    fn describe_lists_only_non_defaults() {
        let snapshot = ProjectSnapshot {
            repo: "octo/repo".to_string(),
            ai_summary: true,
            filters: FeedFilters {
                difficulty: Some(Difficulty::Easy),
                sort: SortOrder::Title,
                ..FeedFilters::default()
            },
        };
        assert_eq!(describe(&snapshot), "difficulty=Easy, sort=title, summaries");
        assert_eq!(describe(&ProjectSnapshot::default()), "no filters");
    }

    #[test]
    fn cancelled_import_names_conflicts() {
        let result = ImportResult {
            written: 0,
            conflicts: vec!["alpha".to_string(), "beta".to_string()],
            cancelled: true,
        };
        let text = rendered(&result);
        assert!(text.contains("alpha, beta"));
        assert!(text.contains("--yes"));
    }

    #[test]
    fn share_text_is_just_the_url() {
        let result = ShareResult {
            name: "demo".to_string(),
            url: "https://forkthis.app/?repo=octo%2Frepo".to_string(),
        };
        assert_eq!(rendered(&result), "https://forkthis.app/?repo=octo%2Frepo\n");
    }
}
