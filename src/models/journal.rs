use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Calm,
    Anxious,
    Confident,
    Fearful,
    Impatient,
    Frustrated,
    Euphoric,
    Indecisive,
    Other,
}

impl EmotionalState {
    pub const ALL: [EmotionalState; 9] = [
        EmotionalState::Calm,
        EmotionalState::Anxious,
        EmotionalState::Confident,
        EmotionalState::Fearful,
        EmotionalState::Impatient,
        EmotionalState::Frustrated,
        EmotionalState::Euphoric,
        EmotionalState::Indecisive,
        EmotionalState::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Calm => "calm",
            EmotionalState::Anxious => "anxious",
            EmotionalState::Confident => "confident",
            EmotionalState::Fearful => "fearful",
            EmotionalState::Impatient => "impatient",
            EmotionalState::Frustrated => "frustrated",
            EmotionalState::Euphoric => "euphoric",
            EmotionalState::Indecisive => "indecisive",
            EmotionalState::Other => "other",
        }
    }

    pub fn tone(self) -> EmotionalTone {
        match self {
            EmotionalState::Calm | EmotionalState::Confident => EmotionalTone::Positive,
            EmotionalState::Anxious | EmotionalState::Fearful | EmotionalState::Frustrated => {
                EmotionalTone::Negative
            }
            _ => EmotionalTone::Neutral,
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EmotionalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        EmotionalState::ALL
            .into_iter()
            .find(|state| state.as_str() == lower)
            .ok_or_else(|| format!("unknown emotional state '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTone {
    Positive,
    Negative,
    Neutral,
}

impl EmotionalTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalTone::Positive => "positive",
            EmotionalTone::Negative => "negative",
            EmotionalTone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A psychological note about one trade. `operation_id` is a weak reference:
/// the operation may have been deleted since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub operation_id: u64,
    pub emotional_state: EmotionalState,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub improvements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    pub fn new(
        operation_id: u64,
        emotional_state: EmotionalState,
        description: &str,
        improvements: &str,
    ) -> Self {
        Self {
            id: None,
            operation_id,
            emotional_state,
            description: description.to_string(),
            improvements: improvements.to_string(),
            created_at: None,
        }
    }

    pub fn apply(&mut self, patch: &JournalEntryPatch) {
        if let Some(operation_id) = patch.operation_id {
            self.operation_id = operation_id;
        }
        if let Some(state) = patch.emotional_state {
            self.emotional_state = state;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(improvements) = &patch.improvements {
            self.improvements = improvements.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryPatch {
    #[serde(default)]
    pub operation_id: Option<u64>,
    #[serde(default)]
    pub emotional_state: Option<EmotionalState>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub improvements: Option<String>,
}

/// Pair each entry with the operation it points at, if it still exists.
pub fn resolve_entries<'a>(
    entries: &'a [JournalEntry],
    operations: &'a [Operation],
) -> Vec<(&'a JournalEntry, Option<&'a Operation>)> {
    entries
        .iter()
        .map(|entry| {
            let op = operations
                .iter()
                .find(|op| op.id == Some(entry.operation_id));
            (entry, op)
        })
        .collect()
}

/// A note as the journal view shows it: the entry, the tone of its emotional
/// state, and the trade it refers to when that still exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView<'a> {
    #[serde(flatten)]
    pub entry: &'a JournalEntry,
    pub tone: EmotionalTone,
    pub operation: Option<&'a Operation>,
}

pub fn note_views<'a>(
    entries: &'a [JournalEntry],
    operations: &'a [Operation],
) -> Vec<NoteView<'a>> {
    resolve_entries(entries, operations)
        .into_iter()
        .map(|(entry, operation)| NoteView {
            entry,
            tone: entry.emotional_state.tone(),
            operation,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::op;

    #[test]
    fn tone_groups_states() {
        assert_eq!(EmotionalState::Calm.tone(), EmotionalTone::Positive);
        assert_eq!(EmotionalState::Frustrated.tone(), EmotionalTone::Negative);
        assert_eq!(EmotionalState::Euphoric.tone(), EmotionalTone::Neutral);
        assert_eq!(EmotionalState::Indecisive.tone(), EmotionalTone::Neutral);
    }

    #[test]
    fn parses_state_names_case_insensitively() {
        assert_eq!("Anxious".parse::<EmotionalState>(), Ok(EmotionalState::Anxious));
        assert!("bored".parse::<EmotionalState>().is_err());
    }

    #[test]
    fn resolve_tolerates_deleted_operations() {
        let mut kept = op("2025-04-01", "EURUSD", 30.0);
        kept.id = Some(1);
        let entries = vec![
            JournalEntry::new(1, EmotionalState::Calm, "followed the plan", ""),
            JournalEntry::new(99, EmotionalState::Anxious, "rushed entry", "wait"),
        ];
        let ops = vec![kept];

        let resolved = resolve_entries(&entries, &ops);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].1.and_then(|o| o.id), Some(1));
        assert!(resolved[1].1.is_none());
    }

    #[test]
    fn note_views_carry_tone_and_trade() {
        let mut kept = op("2025-04-01", "EURUSD", 30.0);
        kept.id = Some(1);
        let entries = vec![
            JournalEntry::new(1, EmotionalState::Confident, "clean setup", ""),
            JournalEntry::new(2, EmotionalState::Fearful, "cut early", "trust the stop"),
        ];
        let ops = vec![kept];

        let views = note_views(&entries, &ops);
        assert_eq!(views[0].tone, EmotionalTone::Positive);
        assert_eq!(views[0].operation.map(|o| o.asset.as_str()), Some("EURUSD"));
        assert_eq!(views[1].tone, EmotionalTone::Negative);
        assert!(views[1].operation.is_none());

        let json = serde_json::to_value(&views).unwrap();
        assert_eq!(json[0]["emotionalState"], "confident");
        assert_eq!(json[0]["tone"], "positive");
        assert_eq!(json[0]["operation"]["asset"], "EURUSD");
        assert_eq!(json[1]["tone"], "negative");
        assert!(json[1]["operation"].is_null());
        assert_eq!(EmotionalTone::Neutral.to_string(), "neutral");
    }
}
