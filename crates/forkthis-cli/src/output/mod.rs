// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI commands.
//!
//! Command handlers return data; this module handles presentation in text,
//! JSON or markdown.

use anyhow::{Context, Result};
use console::{Color, Style};
use forkthis_core::Theme;
use serde::Serialize;
use std::io::{self, Write};

use crate::cli::{OutputContext, OutputFormat};

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;

    /// Render as markdown. Defaults to text rendering.
    fn render_markdown(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        self.render_text(w, ctx)
    }
}

/// Generic render function - handles JSON via serde, delegates text/markdown to trait.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            println!("{json}");
        }
        OutputFormat::Markdown => {
            result
                .render_markdown(&mut io::stdout(), ctx)
                .context("Failed to render markdown")?;
        }
        OutputFormat::Text => {
            result
                .render_text(&mut io::stdout(), ctx)
                .context("Failed to render text")?;
        }
    }
    Ok(())
}

/// Accent style for headings and issue numbers under the stored theme.
pub fn accent(theme: Theme) -> Style {
    let color = match theme {
        Theme::Light | Theme::Dark => Color::Cyan,
        Theme::Cyberpunk => Color::Magenta,
        Theme::Terminal => Color::Green,
        Theme::Luxe => Color::Yellow,
    };
    Style::new().fg(color).bold()
}

mod history;
mod issues;
mod leaderboard;
mod workflow;
