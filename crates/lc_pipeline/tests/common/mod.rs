use async_trait::async_trait;
use lc_core::{Error, GenerationRequest, Result, TextModel};
use lc_inference::prompts::{TEXT_CLOSE, TEXT_OPEN};
use std::sync::Mutex;

pub const OUTLINE: &str = "# Körperverletzung nach § 223 StGB\n## Tatbestand\n## Strafrahmen";

pub const DRAFT: &str = "# Körperverletzung nach § 223 StGB\n\n\
Wer eine andere Person körperlich misshandelt, macht sich nach § 223 StGB strafbar. \
Darüber hinaus kommt bei Waffen § 224 StGB in Betracht.\n\n\
## Strafrahmen\n\nDie Strafe reicht bis zu fünf Jahren Freiheitsstrafe.";

/// Answers by recognising which stage a prompt belongs to.
///
/// Rewrite stages echo the embedded text; humanization additionally swaps
/// stiff transitions so its output differs from its input.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    pub prompts: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl ScriptedModel {
    /// Fails every prompt containing `marker` with an API error.
    pub fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_on: Some(marker),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts_containing(&self, needle: &str) -> usize {
        self.prompts.lock().unwrap().iter().filter(|p| p.contains(needle)).count()
    }
}

fn embedded(prompt: &str) -> String {
    let start = prompt.find(TEXT_OPEN).map(|i| i + TEXT_OPEN.len()).unwrap_or(0);
    let end = prompt[start..].find(TEXT_CLOSE).map(|i| start + i).unwrap_or(prompt.len());
    prompt[start..end].trim().to_string()
}

#[async_trait]
impl TextModel for ScriptedModel {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let prompt = request.prompt.clone();
        self.prompts.lock().unwrap().push(prompt.clone());
        if self.fail_on.is_some_and(|marker| prompt.contains(marker)) {
            return Err(Error::Api {
                status: 500,
                message: "internal server error".to_string(),
            });
        }

        let reply = if prompt.contains("Erstelle eine vollständige Gliederung") {
            OUTLINE.to_string()
        } else if prompt.contains("Schreibe einen informativen") {
            DRAFT.to_string()
        } else if prompt.contains("Keywords mit Suchvolumen") {
            "Körperverletzung\nAnzeige Körperverletzung\nKörperverletzung Strafe".to_string()
        } else if prompt.contains("weniger nach KI klingt") {
            embedded(&prompt)
                .replace("Darüber hinaus kommt", "Und wer eine Waffe benutzt? Dann kommt")
                .replace("Die Strafe reicht", "Die Strafe kann reichen")
        } else if prompt.contains("Integriere die folgenden Keywords") {
            format!("{}\n\n**Keywords eingebaut.**", embedded(&prompt))
        } else {
            embedded(&prompt)
        };
        Ok(reply)
    }
}
