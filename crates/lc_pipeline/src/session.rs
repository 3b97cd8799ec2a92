use lc_core::{Error, KeywordSelection, LengthMode, Result, Topic};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five sequential pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Outline,
    Draft,
    LegalCorrection,
    SeoIntegration,
    Humanize,
}

impl Stage {
    pub const COUNT: usize = 5;

    /// One-based position in the pipeline.
    pub fn number(&self) -> usize {
        match self {
            Stage::Outline => 1,
            Stage::Draft => 2,
            Stage::LegalCorrection => 3,
            Stage::SeoIntegration => 4,
            Stage::Humanize => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Outline => "Outline",
            Stage::Draft => "Draft",
            Stage::LegalCorrection => "Legal correction",
            Stage::SeoIntegration => "SEO integration",
            Stage::Humanize => "Humanize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{} {}]", self.number(), Self::COUNT, self.label())
    }
}

/// Everything one article session produces or the user decides.
///
/// Owned by the caller and handed to the pipeline as `&mut`; nothing here
/// outlives the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub topic: Option<Topic>,
    keyword_topic: Option<String>,
    keyword_selection: Vec<KeywordSelection>,
    pub reference_information: Option<String>,
    pub length: Option<LengthMode>,
    generated_outline: Option<String>,
    edited_outline: Option<String>,
    pub outline: Option<String>,
    pub draft: Option<String>,
    pub corrected: Option<String>,
    pub seo: Option<String>,
    pub humanized: Option<String>,
    pub deep_humanized: bool,
    pub last_stage: Option<Stage>,
}

impl SessionContext {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic: Some(topic),
            ..Self::default()
        }
    }

    pub fn topic(&self) -> Result<&Topic> {
        self.topic
            .as_ref()
            .ok_or_else(|| Error::Pipeline("no topic set for this session".to_string()))
    }

    /// Search keywords for a different phrase than the article topic.
    pub fn set_keyword_topic(&mut self, keyword_topic: Option<String>) {
        self.keyword_topic = keyword_topic;
    }

    /// The phrase keyword research runs against: the override when set,
    /// otherwise the topic.
    pub fn keyword_search_topic(&self) -> Result<String> {
        match &self.keyword_topic {
            Some(override_topic) => {
                let trimmed = override_topic.trim();
                if trimmed.is_empty() {
                    return Err(Error::Pipeline("keyword topic must not be empty".to_string()));
                }
                Ok(trimmed.to_string())
            }
            None => Ok(self.topic()?.as_str().to_string()),
        }
    }

    /// Replace the curated list. Every phrase starts out included.
    pub fn set_curated_keywords(&mut self, phrases: Vec<String>) {
        self.keyword_selection = phrases
            .into_iter()
            .map(|phrase| KeywordSelection { phrase, included: true })
            .collect();
    }

    pub fn keyword_selection(&self) -> &[KeywordSelection] {
        &self.keyword_selection
    }

    pub fn set_keyword_included(&mut self, index: usize, included: bool) -> Result<()> {
        let count = self.keyword_selection.len();
        let entry = self.keyword_selection.get_mut(index).ok_or_else(|| {
            Error::Pipeline(format!("keyword index {} out of range ({} keywords)", index, count))
        })?;
        entry.included = included;
        Ok(())
    }

    /// Exclude every entry whose phrase matches, ignoring case.
    pub fn exclude_keyword(&mut self, phrase: &str) -> bool {
        let phrase = phrase.trim().to_lowercase();
        let mut found = false;
        for entry in &mut self.keyword_selection {
            if entry.phrase.to_lowercase() == phrase {
                entry.included = false;
                found = true;
            }
        }
        found
    }

    /// Included phrases, in curated order.
    pub fn selected_keywords(&self) -> Vec<String> {
        self.keyword_selection
            .iter()
            .filter(|entry| entry.included)
            .map(|entry| entry.phrase.clone())
            .collect()
    }

    pub fn set_generated_outline(&mut self, outline: String) {
        self.edited_outline = Some(outline.clone());
        self.generated_outline = Some(outline);
    }

    pub fn generated_outline(&self) -> Option<&str> {
        self.generated_outline.as_deref()
    }

    /// The outline the draft will be written against. Blank edits count as
    /// no edit.
    pub fn edited_outline(&self) -> Option<&str> {
        self.edited_outline.as_deref().filter(|outline| !outline.trim().is_empty())
    }

    /// Outlines are frozen once a draft exists. Clearing the outline makes
    /// the next run generate a fresh one.
    pub fn edit_outline(&mut self, outline: impl Into<String>) -> Result<()> {
        if self.draft.is_some() {
            return Err(Error::Pipeline("outline is frozen once the draft has been generated".to_string()));
        }
        let outline = outline.into();
        self.edited_outline = if outline.trim().is_empty() { None } else { Some(outline) };
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
