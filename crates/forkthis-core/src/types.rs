// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by the fetcher, feed, store and leaderboard.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Estimated effort to resolve an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Small, self-contained change.
    Easy,
    /// Needs some familiarity with the codebase.
    Medium,
    /// Large or design-heavy change.
    Hard,
    /// No estimate available.
    #[default]
    Unknown,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "unknown" => Ok(Difficulty::Unknown),
            other => Err(format!("Unknown difficulty: {other}")),
        }
    }
}

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Issue is open.
    #[default]
    Open,
    /// Issue is closed.
    Closed,
}

/// Issue author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAuthor {
    /// GitHub login.
    pub login: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
}

/// Issue label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    /// Label name.
    pub name: String,
    /// Hex color without the leading `#`.
    #[serde(default)]
    pub color: String,
}

/// A GitHub issue as shown in the feed.
///
/// Identity is `(repository, number)`. `summary` and `difficulty` are
/// attached by the feed and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Repository in `owner/name` form.
    pub repository: String,
    /// Issue number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Markdown body, empty when GitHub has none.
    #[serde(default)]
    pub body: String,
    /// Author, absent for deleted accounts.
    #[serde(rename = "user")]
    pub author: Option<IssueAuthor>,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    /// Open/closed state.
    #[serde(default)]
    pub state: IssueState,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Browser URL.
    pub html_url: String,
    /// AI summary, when requested. Serialized as `""` when absent.
    #[serde(
        default,
        serialize_with = "serialize_summary",
        deserialize_with = "deserialize_summary"
    )]
    pub summary: Option<String>,
    /// AI difficulty estimate.
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[allow(clippy::ref_option)]
fn serialize_summary<S: Serializer>(
    summary: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(summary.as_deref().unwrap_or_default())
}

fn deserialize_summary<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let summary: Option<String> = Option::deserialize(deserializer)?;
    Ok(summary.filter(|s| !s.is_empty()))
}

impl Issue {
    /// Label names in GitHub order.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Author login.
    pub user: String,
    /// Avatar of the author.
    #[serde(default)]
    pub avatar_url: String,
    /// Number of issues opened.
    pub count: usize,
}
