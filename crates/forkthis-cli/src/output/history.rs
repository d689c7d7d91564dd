// SPDX-License-Identifier: Apache-2.0

use console::style;
use forkthis_core::{format_relative_time, truncate};
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::HistoryResult;

use super::{Renderable, accent};

impl Renderable for HistoryResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if self.entries.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", style("No history yet.").yellow())?;
            writeln!(w, "Run `forkthis search <owner/name>` to get started!")?;
            writeln!(w)?;
            return Ok(());
        }

        writeln!(w)?;
        writeln!(
            w,
            "{}",
            accent(ctx.theme).apply_to(format!("History ({} entries):", self.entries.len()))
        )?;
        writeln!(w)?;

        writeln!(
            w,
            "  {:<5} {:<16} {:<15} {}",
            style("#").cyan(),
            style("Action").cyan(),
            style("When").cyan(),
            style("Detail").cyan()
        )?;
        writeln!(w, "  {}", style("-".repeat(75)).dim())?;

        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(
                w,
                "  {:<5} {:<16} {:<15} {}",
                style(index).dim(),
                entry.kind.to_string(),
                format_relative_time(&entry.timestamp),
                truncate(&entry.detail, 60)
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "| # | Action | When | Detail |")?;
        writeln!(w, "|---|--------|------|--------|")?;
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(
                w,
                "| {index} | {} | {} | {} |",
                entry.kind,
                entry.timestamp.to_rfc3339(),
                entry.detail.replace('|', "\\|")
            )?;
        }
        Ok(())
    }
}
