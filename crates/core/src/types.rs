//! Core types used throughout Screenwright
//!
//! Small value types shared by the configuration DSL and the interpreter.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Entity Type
// ============================================================================

/// Tag naming one kind of business record (`job`, `candidate`, `pay_run`, ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for EntityType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl AsRef<str> for EntityType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for EntityType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tone
// ============================================================================

/// Semantic color used for badges, statuses, and metric thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Gray,
    Blue,
    Green,
    Amber,
    Orange,
    Red,
    Purple,
}

impl Tone {
    /// All tones, in display order
    pub fn all() -> &'static [Tone] {
        &[
            Tone::Neutral,
            Tone::Gray,
            Tone::Blue,
            Tone::Green,
            Tone::Amber,
            Tone::Orange,
            Tone::Red,
            Tone::Purple,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Gray => "gray",
            Tone::Blue => "blue",
            Tone::Green => "green",
            Tone::Amber => "amber",
            Tone::Orange => "orange",
            Tone::Red => "red",
            Tone::Purple => "purple",
        }
    }

    /// Map a utility-class color string (`bg-green-100 text-green-800`)
    /// or a bare color name to a tone. Unknown colors are neutral.
    pub fn from_color_class(color: &str) -> Self {
        let color = color.to_ascii_lowercase();
        let palette = [
            ("purple", Tone::Purple),
            ("green", Tone::Green),
            ("amber", Tone::Amber),
            ("yellow", Tone::Amber),
            ("orange", Tone::Orange),
            ("red", Tone::Red),
            ("blue", Tone::Blue),
            ("charcoal", Tone::Gray),
            ("gray", Tone::Gray),
        ];
        palette
            .iter()
            .find(|(name, _)| color.contains(name))
            .map(|(_, tone)| *tone)
            .unwrap_or(Tone::Neutral)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Sort direction for lists and related collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Declared ordering for a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

// ============================================================================
// Variant
// ============================================================================

/// Visual weight of an action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Default,
    Primary,
    Ghost,
    Destructive,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_serde_transparent() {
        let tag = EntityType::new("pay_run");
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"pay_run\"");

        let parsed: EntityType = serde_json::from_str("\"job\"").unwrap();
        assert_eq!(parsed, EntityType::from("job"));
        assert_eq!(parsed.to_string(), "job");
    }

    #[test]
    fn test_tone_from_color_class() {
        assert_eq!(Tone::from_color_class("bg-green-100 text-green-800"), Tone::Green);
        assert_eq!(Tone::from_color_class("bg-purple-100 text-purple-800"), Tone::Purple);
        assert_eq!(Tone::from_color_class("bg-charcoal-100 text-charcoal-700"), Tone::Gray);
        assert_eq!(Tone::from_color_class("red"), Tone::Red);
        assert_eq!(Tone::from_color_class("bg-teal-100"), Tone::Neutral);
    }

    #[test]
    fn test_tone_names_roundtrip_serde() {
        for tone in Tone::all() {
            let json = serde_json::to_string(tone).unwrap();
            assert_eq!(json, format!("\"{}\"", tone.name()));
        }
    }

    #[test]
    fn test_sort_spec_default_direction() {
        let spec: SortSpec = serde_json::from_str(r#"{"field":"createdAt"}"#).unwrap();
        assert_eq!(spec, SortSpec::asc("createdAt"));
        assert_eq!(SortSpec::desc("x").direction, SortDirection::Desc);
    }
}
