use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A legal subject, e.g. "§ 223 StGB" or "Betäubungsmittelstrafrecht".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    pub fn new(topic: impl Into<String>) -> Result<Self> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(Error::Pipeline("topic must not be empty".to_string()));
        }
        Ok(Self(topic))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the keyword provider's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCandidate {
    pub phrase: String,
    pub search_volume: u64,
}

impl KeywordCandidate {
    pub fn new(phrase: impl Into<String>, search_volume: u64) -> Self {
        Self {
            phrase: phrase.into(),
            search_volume,
        }
    }
}

/// A curated keyword together with the user's include/exclude choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSelection {
    pub phrase: String,
    pub included: bool,
}

/// Target article length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthMode {
    Short,
    Medium,
    Long,
    Custom { words: u32 },
}

impl LengthMode {
    /// Inclusive word window the draft should land in.
    pub fn word_range(&self) -> (u32, u32) {
        match self {
            LengthMode::Short => (1500, 2000),
            LengthMode::Medium => (2500, 3500),
            LengthMode::Long => (4000, 5000),
            LengthMode::Custom { words } => (
                words.saturating_sub(500).max(100),
                words.saturating_add(500).min(10_000),
            ),
        }
    }
}

impl FromStr for LengthMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(LengthMode::Short),
            "medium" => Ok(LengthMode::Medium),
            "long" => Ok(LengthMode::Long),
            other => other
                .parse::<u32>()
                .map(|words| LengthMode::Custom { words })
                .map_err(|_| format!("Invalid length: {} (expected short, medium, long or a word count)", s)),
        }
    }
}

/// A single call to a text-generation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    Square,
    Wide,
    Tall,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Wide => "1792x1024",
            ImageSize::Tall => "1024x1792",
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::Square
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1024x1024" => Ok(ImageSize::Square),
            "1792x1024" => Ok(ImageSize::Wide),
            "1024x1792" => Ok(ImageSize::Tall),
            _ => Err(format!("Invalid image size: {} (expected 1024x1024, 1792x1024 or 1024x1792)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageQuality {
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

impl Default for ImageQuality {
    fn default() -> Self {
        Self::Standard
    }
}

impl FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ImageQuality::Standard),
            "hd" => Ok(ImageQuality::Hd),
            _ => Err(format!("Invalid image quality: {} (expected standard or hd)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStyle {
    Realistic,
    Iconic,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self::Realistic
    }
}

impl FromStr for ImageStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realistic" => Ok(ImageStyle::Realistic),
            "iconic" => Ok(ImageStyle::Iconic),
            _ => Err(format!("Invalid image style: {} (expected realistic or iconic)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_rejects_blank() {
        assert!(Topic::new("   ").is_err());
        assert_eq!(Topic::new("  § 223 StGB ").unwrap().as_str(), "§ 223 StGB");
    }

    #[test]
    fn test_length_mode_windows() {
        assert_eq!(LengthMode::Medium.word_range(), (2500, 3500));
        assert_eq!(LengthMode::Custom { words: 2500 }.word_range(), (2000, 3000));
        assert_eq!(LengthMode::Custom { words: 300 }.word_range(), (100, 800));
        assert_eq!(LengthMode::Custom { words: 9800 }.word_range(), (9300, 10_000));
    }

    #[test]
    fn test_length_mode_parse() {
        assert_eq!("short".parse::<LengthMode>().unwrap(), LengthMode::Short);
        assert_eq!("LONG".parse::<LengthMode>().unwrap(), LengthMode::Long);
        assert_eq!("1800".parse::<LengthMode>().unwrap(), LengthMode::Custom { words: 1800 });
        assert!("huge".parse::<LengthMode>().is_err());
    }

    #[test]
    fn test_image_options_parse() {
        assert_eq!("1792x1024".parse::<ImageSize>().unwrap(), ImageSize::Wide);
        assert!("800x600".parse::<ImageSize>().is_err());
        assert_eq!("HD".parse::<ImageQuality>().unwrap().as_str(), "hd");
        assert_eq!("iconic".parse::<ImageStyle>().unwrap(), ImageStyle::Iconic);
    }
}
