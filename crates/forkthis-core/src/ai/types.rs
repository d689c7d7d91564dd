// SPDX-License-Identifier: Apache-2.0

//! Wire types for the AI providers and the summarizer's result.

use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

/// A chat message for OpenAI-compatible APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message content.
    pub content: String,
}

/// Request body for `chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "llama3-8b-8192").
    pub model: String,
    /// List of messages in the conversation.
    pub messages: Vec<ChatMessage>,
}

/// Response from `chat/completions`.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// List of choices (usually just one).
    pub choices: Vec<Choice>,
}

/// A single choice in the chat completion response.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChatMessage,
}

/// Request body for Gemini `generateContent`.
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Conversation turns.
    pub contents: Vec<GeminiContent>,
}

/// A Gemini content block.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Text parts.
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A Gemini text part.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Part text.
    #[serde(default)]
    pub text: String,
}

/// Response from Gemini `generateContent`.
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Candidate completions.
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// A Gemini candidate completion.
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// Candidate content.
    pub content: GeminiContent,
}

/// Prompt pair sent to every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    /// Instruction framing the task.
    pub system: String,
    /// The issue body wrapped in the request.
    pub user: String,
}

/// A one-line summary with its difficulty estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Trimmed provider reply.
    pub summary: String,
    /// Difficulty keyword found in the reply.
    pub difficulty: Difficulty,
}
