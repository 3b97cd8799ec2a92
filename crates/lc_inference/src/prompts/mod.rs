//! Prompt templates for every model call.
//!
//! Article text handed to a rewrite prompt is always wrapped in
//! [`TEXT_OPEN`]/[`TEXT_CLOSE`] so the model (and the offline dummy model)
//! can tell instructions and payload apart.

use lc_core::{KeywordCandidate, LengthMode};

pub mod style;

pub use style::{CLIENT_INTRO_EXAMPLE, REFERENCE_TONE_TEXT, STIFF_TRANSITIONS};

pub const TEXT_OPEN: &str = "<text>";
pub const TEXT_CLOSE: &str = "</text>";

/// Only this many characters of a reference source are sent for analysis.
pub const REFERENCE_CHAR_LIMIT: usize = 4000;

fn wrap_text(text: &str) -> String {
    format!("{}\n{}\n{}", TEXT_OPEN, text, TEXT_CLOSE)
}

pub fn outline_prompt(topic: &str) -> String {
    format!(
        r#"Du bist ein erfahrener Anwalt und SEO-Experte. Erstelle eine vollständige Gliederung mit H1- und H2-Überschriften zum Thema "{topic}".

Die Gliederung muss alle juristischen Aspekte abdecken, die ein Mandant kennen muss oder nach denen er suchen würde. Welche Fragen stellen Betroffene?

Behandle AUSSCHLIESSLICH rechtliche Inhalte zum Thema "{topic}". KEINE Abschnitte über Kontakt, Kanzlei oder "Über uns".

Format:
- # für H1-Überschriften (Hauptthemen)
- ## für H2-Überschriften (Unterthemen)

Beispiel:
# Hauptthema 1
## Unterthema 1.1
## Unterthema 1.2
# Hauptthema 2
## Unterthema 2.1

Gib nur die Gliederung zurück."#
    )
}

pub fn length_directive(length: LengthMode) -> String {
    let (min, max) = length.word_range();
    match length {
        LengthMode::Short => format!("LÄNGE: Maximal {}-{} Wörter. Konzentriere dich auf das Wesentliche.", min, max),
        LengthMode::Medium => format!("LÄNGE: Etwa {}-{} Wörter. Ausgewogene Tiefe und Übersichtlichkeit.", min, max),
        LengthMode::Long => format!("LÄNGE: Etwa {}-{} Wörter. Umfassende und detaillierte Behandlung.", min, max),
        LengthMode::Custom { .. } => format!("LÄNGE: Etwa {}-{} Wörter.", min, max),
    }
}

/// Everything the draft prompt is assembled from.
#[derive(Debug, Clone)]
pub struct DraftPrompt<'a> {
    pub topic: &'a str,
    pub outline: &'a str,
    pub length: Option<LengthMode>,
    pub reference_information: Option<&'a str>,
    pub tone_reference: &'a str,
}

pub fn draft_prompt(draft: &DraftPrompt<'_>) -> String {
    let topic = draft.topic;
    let mut prompt = format!(
        r#"Du bist ein professioneller Autor für SEO- und Rechtstexte mit Schwerpunkt Strafrecht.
Schreibe einen informativen, überzeugenden Text zum Thema "{topic}".

Verwende folgende Gliederung:
{outline}
"#,
        outline = draft.outline
    );

    if let Some(length) = draft.length {
        prompt.push('\n');
        prompt.push_str(&length_directive(length));
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        r#"
Anforderungen:
- Juristisch korrekt und vollständig
- Alle einschlägigen Paragraphen und Gesetze nennen
- Strafrahmen und Rechtsfolgen aufzeigen
- Für Laien verständlich, aber fachlich fundiert
- Komplexität und Risiken betonen, damit der Wert anwaltlicher Hilfe deutlich wird

FOKUS UND RELEVANZ:
- Bleibe STRENG beim Thema "{topic}", keine allgemeinen Rechtsbelehrungen
- Keine generischen Verteidigungsstrategien, die für jedes Delikt gelten
- Keine Abschnitte über allgemeine Rechtfertigungsgründe (Notwehr, Notstand)
- Jeder Absatz muss einen direkten Bezug zu "{topic}" haben

Stil: sachlich, kompetent, ansprechend. Verwende gelegentlich "wir"-Formulierungen ("Wir helfen Ihnen", "Gemeinsam entwickeln wir Ihre Verteidigung"). Vermeide akademische Ausschweifungen und Wiederholungen.
"#
    ));

    if let Some(reference) = draft.reference_information {
        prompt.push_str(&format!(
            "\nBerücksichtige diese Rechtsinformationen, beschränke dich aber nicht darauf:\n{}\n",
            reference
        ));
    }

    prompt.push_str(&format!(
        r#"
EINLEITUNG: Beginne den Artikel mit einer empathischen Mandanten-Einleitung nach diesem Muster (als Inspiration, nicht zum Kopieren):
{intro}
Passe Delikt, Paragraphen und Situation an "{topic}" an und variiere Formulierung und Aufbau.

TONALITÄT: Orientiere dich am Ton des folgenden Referenztextes. Übernimm NUR Ton und Stil, NICHT die rechtlichen Inhalte.
REFERENZTEXT:
{tone}
"#,
        intro = CLIENT_INTRO_EXAMPLE,
        tone = draft.tone_reference
    ));

    prompt
}

pub fn correction_prompt(topic: &str, text: &str) -> String {
    format!(
        r#"Prüfe den folgenden Rechtstext zum Thema "{topic}" auf Fehler und korrigiere sie DIREKT im Text.

{text}

PRÜFPUNKTE:
1. Paragraphen und Gesetze: falsche Nummern, falsches Gesetz, veraltete oder falsch zugeordnete Normen.
2. Definitionen: unvollständige Definitionen, fehlende Tatbestandsmerkmale, umgangssprachliche statt juristischer Begriffe.
3. Verhältnis der Delikte: falsche Abgrenzungen, falsche Konkurrenzen, verwechselte Straftatbestände.
4. Strafrahmen und Rechtsfolgen: falsche Mindest- oder Höchststrafen, fehlende Qualifikationen oder minder schwere Fälle.
5. Irrelevanter Inhalt: Abschnitte, die bei jedem Delikt stehen könnten, generische Verteidigungstipps, Wiederholungen.

BEI ZWEIFELN: Entferne unsichere Aussagen, statt zu raten. Lieber weniger Inhalt als falsche Informationen.

KORREKTUR:
- Fehler direkt an Ort und Stelle ersetzen oder streichen
- KEINE Kommentare, Fußnoten oder Erklärungen
- Ohne Fehler: Text unverändert zurückgeben

NICHT ÄNDERN: Stil, Tonalität, Struktur, Überschriften, Formatierung und korrekte Inhalte.

Gib nur den korrigierten Text zurück."#,
        text = wrap_text(text)
    )
}

pub fn seo_prompt(text: &str, keywords: &[String]) -> String {
    format!(
        r#"Du bist SEO-Experte. Integriere die folgenden Keywords in diesen juristisch korrekten Text.

KEYWORDS: {keywords}

NICHT ÄNDERN:
- Rechtliche Fakten
- Paragraphen (§§)
- Strafrahmen und Rechtsfolgen

ERLAUBT:
- Keywords natürlich in Überschriften und Fließtext einbauen
- Überschriftenstruktur verbessern (# für H1, ## für H2, ### für H3)
- Höchstens 3 bis 5 besonders wichtige Fakten **fett** hervorheben
- Redundanzen entfernen

{text}

Gib nur den überarbeiteten Text zurück."#,
        keywords = keywords.join(", "),
        text = wrap_text(text)
    )
}

pub fn humanize_prompt(text: &str, deep: bool) -> String {
    let mut prompt = format!(
        r#"Überarbeite diesen Text so, dass er weniger nach KI klingt, OHNE rechtliche Inhalte zu ändern.

{text}

TECHNIKEN:
1. Satzlängen mischen: kurze Sätze (5-10 Wörter) neben längeren (20-30 Wörter).
2. Steife Übergänge vermeiden ({transitions}); natürlichere Verbindungen und gelegentlich direkte Fragen an den Leser verwenden.
3. Aktiv statt passiv formulieren, wo es geht.
4. Gelegentliche Einschübe in Klammern oder Gedankenstriche, natürliche Betonungen.

ABSOLUT VERBOTEN ZU ÄNDERN:
- Paragraphen, Gesetze, Strafrahmen
- Rechtliche Definitionen und Fachbegriffe
- Faktische rechtliche Aussagen
- Eingebaute SEO-Keywords
"#,
        text = wrap_text(text),
        transitions = STIFF_TRANSITIONS.join(", ")
    );

    if deep {
        prompt.push_str(
            r#"
TIEFE ÜBERARBEITUNG: Der Text wird noch als maschinell erkannt. Formuliere jeden Absatz grundlegend neu, stelle Satzanfänge um, brich gleichförmige Absatzmuster auf und variiere den Rhythmus deutlich stärker. Die Verbote oben gelten unverändert.
"#,
        );
    }

    prompt.push_str("\nGib nur den überarbeiteten Text zurück.");
    prompt
}

pub fn keyword_grouping_prompt(topic: &str, candidates: &[KeywordCandidate], count: usize) -> String {
    let keyword_block = candidates
        .iter()
        .map(|c| format!("{} — {}", c.phrase, c.search_volume))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Keywords mit Suchvolumen zum Thema "{topic}":

{keyword_block}

Aufgabe:
1. Ähnliche Keywords gruppieren: Varianten, Tippfehler und Synonyme desselben Begriffs zu einem aussagekräftigen Keyword zusammenfassen.
2. Die {count} relevantesten Gruppen auswählen, die das Themengebiet vollständig abdecken. Juristisch präzise, beschreibende und häufig gesuchte Begriffe bevorzugen; Duplikate und zu allgemeine Begriffe vermeiden.

Ausgabe: genau {count} Keywords, eines pro Zeile, ohne Nummerierung und ohne Kommentar."#
    )
}

pub fn reference_prompt(topic: &str, content: &str) -> String {
    let excerpt: String = content.chars().take(REFERENCE_CHAR_LIMIT).collect();
    format!(
        r#"Extrahiere aus dem folgenden Text AUSSCHLIESSLICH Rechtsinformationen, die für das Thema "{topic}" relevant sind.

EXTRAHIERE:
- Einschlägige Paragraphen und Gesetze (§§)
- Rechtliche Definitionen
- Verfahrensschritte
- Strafen und Rechtsfolgen

IGNORIERE:
- Website-Technik, HTML, Meta-Angaben
- Werbung, Formatierung, Design-Elemente
- Alles ohne Bezug zu "{topic}"

{text}

Gib nur die relevanten Rechtsinformationen zurück."#,
        text = wrap_text(&excerpt)
    )
}

pub fn image_suggestion_prompt(topic: &str) -> String {
    format!(
        r#"List 5 simple, iconic visuals that instantly represent the legal concept of "{topic}".
Each should be a short phrase (1-4 words), like something you would see on an icon.
No full scenes, only clear symbolic objects.
Return only the 5 suggestions, one per line, without numbering or explanations."#
    )
}

pub fn realistic_image_prompt(visual: &str) -> String {
    format!(
        "Create a high-definition photograph of {visual} on a plain background. \
Use sharp clarity to highlight the object's key features and strong lighting that makes it the sole, dominant subject, \
casting bold shadows. The composition should be clean and powerful, an arresting focal point that conveys the essence instantly."
    )
}

pub fn iconic_image_prompt(visual: &str) -> String {
    format!(
        "A simple, minimalistic illustration symbolically representing the concept of {visual} (possibly a German word). \
No specific individuals and no detailed scenes. Use a clean palette with 1-2 accent colors on a plain dark background, \
no decorative elements. The image should be professional and communicate the key idea instantly."
    )
}
