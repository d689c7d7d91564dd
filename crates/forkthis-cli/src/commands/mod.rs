// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the ForkThis CLI.

pub mod bookmark;
pub mod completion;
pub mod history;
pub mod leaderboard;
pub mod project;
pub mod search;
pub mod summarize;
pub mod theme;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dialoguer::Confirm;
use forkthis_core::{AppConfig, EnvTokenProvider, FeedFilters, ForkThis, WorkflowStore};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::cli::{
    BookmarkCommand, Commands, HistoryCommand, OutputContext, ProjectCommand, ThemeCommand,
};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let s = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        Ok(style) => s.set_style(style),
        Err(e) => warn!(error = %e, "Invalid spinner template"),
    }
    s.set_message(message.to_string());
    s.enable_steady_tick(Duration::from_millis(100));
    Some(s)
}

/// Asks before overwriting imported projects; declines when not interactive.
fn confirm_overwrite(ctx: &OutputContext, yes: bool, conflicts: &[String]) -> bool {
    if yes {
        return true;
    }
    if !ctx.is_interactive() {
        return false;
    }
    Confirm::new()
        .with_prompt(format!(
            "Overwrite existing project(s): {}?",
            conflicts.join(", ")
        ))
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Dispatch to the appropriate command handler.
#[allow(clippy::too_many_lines)]
pub async fn run(command: Commands, ctx: OutputContext, config: AppConfig) -> Result<()> {
    if let Commands::Completion { shell } = command {
        return completion::run_generate(shell);
    }

    let store_path = config.storage.resolve_path();
    debug!(path = %store_path.display(), "Opening workflow store");
    let store = WorkflowStore::open(store_path);
    let ctx = ctx.with_theme(store.theme()?);
    let app = ForkThis::new(config, Arc::new(EnvTokenProvider), store)?;
    let store = app.store();

    match command {
        Commands::Search {
            repo,
            summaries,
            more,
            filters,
        } => {
            let repo = search::resolve_repo(store, repo)?;
            let filters = FeedFilters::from(filters);
            let message = if summaries {
                "Fetching and summarizing issues..."
            } else {
                "Fetching issues..."
            };
            let spinner = maybe_spinner(&ctx, message);
            let result = search::run(&app, &repo, summaries, more, &filters).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }

        Commands::Summarize { body, from } => {
            let body = summarize::read_body(body, from.as_deref())?;
            let spinner = maybe_spinner(&ctx, "Summarizing...");
            let result = summarize::run(&app, &body).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }

        Commands::Leaderboard { repo, all_pages } => {
            let spinner = maybe_spinner(&ctx, "Counting issue authors...");
            let result = leaderboard::run(&app, &repo, all_pages).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }

        Commands::Bookmark(cmd) => match cmd {
            BookmarkCommand::Toggle { repo, number } => {
                output::render(&bookmark::toggle(store, &repo, number)?, &ctx)
            }
            BookmarkCommand::List { repo } => {
                output::render(&bookmark::list(store, repo.as_deref())?, &ctx)
            }
        },

        Commands::Project(cmd) => match cmd {
            ProjectCommand::Save {
                name,
                repo,
                summaries,
                filters,
            } => output::render(
                &project::save(store, &name, repo, summaries, filters.into())?,
                &ctx,
            ),
            ProjectCommand::Load { name } => {
                let spinner = maybe_spinner(&ctx, "Loading project...");
                let result = project::load(&app, &name).await;
                if let Some(s) = spinner {
                    s.finish_and_clear();
                }
                output::render(&result?, &ctx)
            }
            ProjectCommand::Delete { name } => {
                output::render(&project::delete(store, &name)?, &ctx)
            }
            ProjectCommand::List => output::render(&project::list(store)?, &ctx),
            ProjectCommand::Export { file: Some(path) } => {
                output::render(&project::export_to_file(store, &path)?, &ctx)
            }
            ProjectCommand::Export { file: None } => {
                // The document is JSON already, whatever the output format
                println!("{}", project::export_document(store)?);
                Ok(())
            }
            ProjectCommand::Import { file, yes } => {
                let result = project::import(store, &file, |conflicts| {
                    confirm_overwrite(&ctx, yes, conflicts)
                })?;
                output::render(&result, &ctx)
            }
            ProjectCommand::Share { name, base } => {
                output::render(&project::share(store, &name, &base)?, &ctx)
            }
        },

        Commands::History(cmd) => match cmd {
            HistoryCommand::List => output::render(&history::list(store)?, &ctx),
            HistoryCommand::Clear => output::render(&history::clear(store)?, &ctx),
            HistoryCommand::Remove { index } => {
                output::render(&history::remove(store, index)?, &ctx)
            }
        },

        Commands::Theme(cmd) => match cmd {
            ThemeCommand::Show => output::render(&theme::show(store)?, &ctx),
            ThemeCommand::Set { theme: chosen } => {
                let ctx = ctx.with_theme(chosen);
                output::render(&theme::set(store, chosen)?, &ctx)
            }
        },

        Commands::Completion { .. } => Ok(()),
    }
}
