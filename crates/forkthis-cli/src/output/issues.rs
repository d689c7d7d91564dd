// SPDX-License-Identifier: Apache-2.0

use console::style;
use forkthis_core::{Difficulty, Issue, IssueState, SummaryResult, format_relative_time, truncate};
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::SearchResult;

use super::{Renderable, accent};

fn difficulty_badge(difficulty: Difficulty) -> String {
    let text = format!("[{difficulty}]");
    match difficulty {
        Difficulty::Easy => style(text).green().to_string(),
        Difficulty::Medium => style(text).yellow().to_string(),
        Difficulty::Hard => style(text).red().to_string(),
        Difficulty::Unknown => style(text).dim().to_string(),
    }
}

fn write_issue(
    w: &mut dyn Write,
    ctx: &OutputContext,
    issue: &Issue,
    bookmarked: bool,
) -> io::Result<()> {
    let marker = if bookmarked { "*" } else { " " };
    let closed = if issue.state == IssueState::Closed {
        style(" (closed)").dim().to_string()
    } else {
        String::new()
    };
    writeln!(
        w,
        "{} {} {}{} {}",
        style(marker).yellow(),
        accent(ctx.theme).apply_to(format!("#{}", issue.number)),
        truncate(&issue.title, 70),
        closed,
        difficulty_badge(issue.difficulty)
    )?;

    let labels: Vec<&str> = issue.label_names().collect();
    let author = issue.author.as_ref().map_or("ghost", |a| a.login.as_str());
    writeln!(
        w,
        "    {} by {} · updated {}",
        if labels.is_empty() {
            style("no labels".to_string()).dim()
        } else {
            style(labels.join(", ")).cyan()
        },
        author,
        format_relative_time(&issue.updated_at)
    )?;

    if let Some(summary) = &issue.summary {
        writeln!(w, "    {}", style(summary).italic())?;
    }
    if ctx.verbose {
        writeln!(w, "    {}", style(&issue.html_url).dim())?;
    }
    Ok(())
}

impl Renderable for SearchResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if let Some(banner) = &self.banner {
            writeln!(w, "{}", style(banner).yellow().bold())?;
        }

        writeln!(w)?;
        let heading = match &self.project {
            Some(project) => format!("{} (project {project})", self.repo),
            None => self.repo.clone(),
        };
        writeln!(
            w,
            "{}  {}",
            accent(ctx.theme).apply_to(heading),
            style(format!(
                "{} shown, {} of {} revealed",
                self.issues.len(),
                self.revealed,
                self.fetched
            ))
            .dim()
        )?;
        writeln!(w)?;

        if self.issues.is_empty() {
            writeln!(w, "{}", style("No issues match the current filters.").yellow())?;
        }
        for issue in &self.issues {
            write_issue(w, ctx, issue, self.bookmarks.contains(&issue.number))?;
        }

        if self.has_more {
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                style("More issues available. Re-run with --more 1 to reveal the next page.")
                    .dim()
            )?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Open issues in {}", self.repo)?;
        writeln!(w)?;
        if let Some(banner) = &self.banner {
            writeln!(w, "> {banner}")?;
            writeln!(w)?;
        }
        writeln!(w, "| # | Title | Difficulty | Labels | Summary |")?;
        writeln!(w, "|---|-------|------------|--------|---------|")?;
        for issue in &self.issues {
            let labels: Vec<&str> = issue.label_names().collect();
            writeln!(
                w,
                "| [#{}]({}) | {} | {} | {} | {} |",
                issue.number,
                issue.html_url,
                issue.title.replace('|', "\\|"),
                issue.difficulty,
                labels.join(", "),
                issue.summary.as_deref().unwrap_or("").replace('|', "\\|")
            )?;
        }
        Ok(())
    }
}

impl Renderable for SummaryResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{} {}", difficulty_badge(self.difficulty), self.summary)
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "**Difficulty:** {}", self.difficulty)?;
        writeln!(w)?;
        writeln!(w, "{}", self.summary)
    }
}
