use serde::{Deserialize, Serialize};

/// Entity types the engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    #[serde(rename = "PERSON", alias = "PER")]
    Person,
    #[serde(rename = "LOCATION", alias = "GPE", alias = "LOC")]
    Location,
    /// Any other label from the annotation provider, ignored by the engine
    #[serde(other)]
    Other,
}

/// A named-entity mention over the document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    pub label: EntityLabel,
    /// Byte offset of the first character
    pub start_char: usize,
    /// Byte offset one past the last character
    pub end_char: usize,
    /// Surface text of the mention
    pub text: String,
}
