// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::LeaderboardResult;

use super::{Renderable, accent};

impl Renderable for LeaderboardResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if self.entries.is_empty() {
            writeln!(
                w,
                "{}",
                style(format!("No issue authors found in {}.", self.repo)).yellow()
            )?;
            return Ok(());
        }

        writeln!(w)?;
        writeln!(
            w,
            "{}",
            accent(ctx.theme).apply_to(format!("Leaderboard for {}:", self.repo))
        )?;
        writeln!(w)?;

        for (rank, entry) in self.entries.iter().enumerate() {
            let plural = if entry.count == 1 { "issue" } else { "issues" };
            writeln!(
                w,
                "  {:>3}. {:<30} {} {}",
                rank + 1,
                style(&entry.user).bold(),
                style(entry.count).green(),
                plural
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Leaderboard for {}", self.repo)?;
        writeln!(w)?;
        writeln!(w, "| Rank | User | Issues |")?;
        writeln!(w, "|------|------|--------|")?;
        for (rank, entry) in self.entries.iter().enumerate() {
            writeln!(w, "| {} | @{} | {} |", rank + 1, entry.user, entry.count)?;
        }
        Ok(())
    }
}
