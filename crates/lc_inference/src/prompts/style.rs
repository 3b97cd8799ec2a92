//! Fixed style material every draft is written against.

/// Tone sample. Only voice and register are taken from it, never the legal content.
pub const REFERENCE_TONE_TEXT: &str = "\
Anzeige wegen Körperverletzung erhalten?
Wir sind für Sie erreichbar, wenn es darauf ankommt. Unser Anspruch ist es, Sie gegen den Vorwurf der Körperverletzung nach §§ 223 ff. StGB wirksam zu verteidigen, damit Sie wieder zur Ruhe kommen. Unsere Strafverteidiger kennen dieses Rechtsgebiet aus zahlreichen Verfahren und setzen sich dafür ein, dass Ihre Rechte von Anfang an gewahrt bleiben.

Worauf es bei der Wahl Ihres Strafverteidigers ankommt
Dass Sie bei der Auswahl Ihres Verteidigers genau hinsehen, ist richtig. Wie bei Ärzten gibt es auch unter Strafverteidigern große Unterschiede in Erfahrung und Spezialisierung. Deshalb konzentrieren sich unsere Anwälte gezielt auf Verfahren wegen Körperverletzungsdelikten.

Die einfache Körperverletzung nach § 223 StGB
Eine einfache Körperverletzung liegt vor, wenn jemand eine andere Person vorsätzlich körperlich misshandelt oder an der Gesundheit schädigt. Eine Gesundheitsschädigung ist jedes Hervorrufen oder Steigern eines krankhaften Zustands, der über eine bloße Bagatelle hinausgeht. Typische Beispiele sind Prellungen, Knochenbrüche oder Blutergüsse.

Die schwere Körperverletzung nach § 226 StGB
Die schwere Körperverletzung knüpft an besonders gravierende und dauerhafte Folgen für das Opfer an. Für die Verteidigung ist hier vor allem der subjektive Tatbestand entscheidend: Was wusste oder wollte der Beschuldigte in Bezug auf die schwere Folge?

Kann das Verfahren eingestellt werden?
Ob eine Einstellung in Betracht kommt, hängt vom Einzelfall ab. Ein erfahrener Verteidiger prüft früh, welche Wege offenstehen, und setzt sich für die für Sie beste Lösung ein.
";

/// Pattern for the empathetic client introduction that opens each article.
pub const CLIENT_INTRO_EXAMPLE: &str = "\
Sie haben eine Vorladung wegen des Vorwurfs der Körperverletzung erhalten? Dann befinden Sie sich in einer Lage, die nicht nur belastend ist, sondern auch viele Fragen aufwirft. Ihnen stehen Polizei und Staatsanwaltschaft gegenüber. Gerade jetzt lohnt es sich, einen auf Körperverletzung spezialisierten Anwalt an Ihrer Seite zu haben, denn in dieser frühen Phase werden die Weichen für Ihre Verteidigung gestellt.

Anzeige wegen Körperverletzung?

Wir sind für Sie da, wenn Sie uns brauchen, und verteidigen Sie gegen den Vorwurf der Körperverletzung nach §§ 223 ff. StGB mit dem Ziel, dass Sie wieder ruhig schlafen können.
";

/// Connectives that make generated German text read as machine written.
pub const STIFF_TRANSITIONS: &[&str] = &[
    "Darüber hinaus",
    "Ferner",
    "Zudem",
    "Des Weiteren",
    "Außerdem",
    "Infolgedessen",
];
