//! Chat assistant backed by a hosted language model.

use crate::services::MoodAggregator;
use chrono::{DateTime, Utc};
use moodtune_core::{
    error::Result, Clock, IntentClassifier, LanguageModel, MoodError, MoodStats,
};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, error};

/// Returned in place of the model's answer when anything downstream fails
pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, I'm having trouble processing your request right now. Please try again later.";

const BASE_PROMPT: &str = "You are a supportive mental health assistant integrated into a mood tracking application. Your role is to:

1. Provide general mental health support and information
2. Offer coping strategies and wellness tips
3. Analyze user mood patterns when requested
4. Encourage healthy habits and self-care

Guidelines:
- Be empathetic, supportive, and non-judgmental
- Provide evidence-based mental health information
- Always recommend professional help for serious mental health concerns
- Keep responses concise but helpful (2-3 paragraphs maximum)
- If asked about mood patterns, provide insights based on the data provided

Important: You are not a replacement for professional therapy or medical advice. Always encourage users to seek professional help when needed.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub includes_mood_analysis: bool,
}

/// Build the full prompt sent to the model.
///
/// `stats` is embedded only for mood analysis questions.
pub fn build_prompt(message: &str, stats: Option<&MoodStats>) -> Result<String> {
    let mut prompt = String::from(BASE_PROMPT);

    if let Some(stats) = stats {
        let most_common = stats
            .most_common_mood
            .map_or_else(|| "none".to_string(), |m| m.to_string());

        // Writing to a String cannot fail
        let _ = write!(
            prompt,
            "\n\nMood Analysis Data:\n\
             - Recent mood entries: {}\n\
             - Average mood: {}\n\
             - Mood trend: {}\n\
             - Most common mood: {}\n\
             - Days tracked: {}\n\n\
             Please analyze this mood data and provide insights about patterns, trends, and suggestions for improvement.",
            serde_json::to_string(&stats.recent_entries)?,
            stats.average_mood,
            stats.trend,
            most_common,
            stats.total_days,
        );
    }

    let _ = write!(
        prompt,
        "\n\nUser Question: {message}\n\nPlease provide a helpful response:"
    );

    Ok(prompt)
}

pub struct ChatAssistant {
    model: Arc<dyn LanguageModel>,
    aggregator: Arc<MoodAggregator>,
    classifier: IntentClassifier,
    clock: Arc<dyn Clock>,
}

impl ChatAssistant {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        aggregator: Arc<MoodAggregator>,
        classifier: IntentClassifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            model,
            aggregator,
            classifier,
            clock,
        }
    }

    /// Answer a user message.
    ///
    /// Only an empty message is an error. Model or statistics failures are
    /// logged and answered with [`FALLBACK_RESPONSE`].
    pub async fn ask(&self, message: &str) -> Result<ChatReply> {
        if message.trim().is_empty() {
            return Err(MoodError::invalid_input("Message cannot be empty"));
        }

        let analysis = self.classifier.is_mood_analysis_query(message);
        debug!(analysis, len = message.len(), "Processing chat message");

        let reply = match self.answer(message, analysis).await {
            Ok(response) => ChatReply {
                response,
                timestamp: self.clock.now(),
                includes_mood_analysis: analysis,
            },
            Err(e) => {
                error!(error = %e, "Error processing chatbot message");
                ChatReply {
                    response: FALLBACK_RESPONSE.to_string(),
                    timestamp: self.clock.now(),
                    includes_mood_analysis: false,
                }
            }
        };

        Ok(reply)
    }

    async fn answer(&self, message: &str, analysis: bool) -> Result<String> {
        let stats = if analysis {
            Some(self.aggregator.recent_stats().await?)
        } else {
            None
        };

        let prompt = build_prompt(message, stats.as_ref())?;
        self.model.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtune_core::{MoodLevel, StatsEntry, Trend};

    #[test]
    fn plain_prompt_has_preamble_and_question() {
        let prompt = build_prompt("Any tips for sleep?", None).unwrap();
        assert!(prompt.starts_with("You are a supportive mental health assistant"));
        assert!(prompt.contains("User Question: Any tips for sleep?"));
        assert!(!prompt.contains("Mood Analysis Data"));
    }

    #[test]
    fn analysis_prompt_embeds_stats() {
        let stats = MoodStats {
            recent_entries: vec![StatsEntry {
                mood: MoodLevel::try_from(2_i64).unwrap(),
                emoji: "😢".to_string(),
                date: "2024-06-01".to_string(),
            }],
            average_mood: 2.5,
            trend: Trend::Declining,
            most_common_mood: None,
            total_days: 1,
        };

        let prompt = build_prompt("How is my mood trend?", Some(&stats)).unwrap();
        assert!(prompt.contains("- Average mood: 2.5"));
        assert!(prompt.contains("- Mood trend: declining"));
        assert!(prompt.contains("- Most common mood: none"));
        assert!(prompt.contains(r#""date":"2024-06-01""#));
    }
}
