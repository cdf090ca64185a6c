//! @ai:module:intent Extract a canonical answer choice from model output
//! @ai:module:layer domain
//! @ai:module:public_api AnswerParser, ParsedAnswer
//! @ai:module:stateless true

use regex::Regex;

/// @ai:intent Canonical outcome of parsing one model response
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedAnswer {
    A,
    B,
    C,
    D,
    /// Output contained no recognizable choice.
    Invalid,
    /// The inference call itself failed before producing output.
    Error,
}

impl ParsedAnswer {
    /// @ai:intent Convert answer to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsedAnswer::A => "A",
            ParsedAnswer::B => "B",
            ParsedAnswer::C => "C",
            ParsedAnswer::D => "D",
            ParsedAnswer::Invalid => "INVALID",
            ParsedAnswer::Error => "ERROR",
        }
    }

    /// @ai:intent Map an uppercased letter to a choice, if it is one
    /// @ai:effects pure
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "A" => Some(ParsedAnswer::A),
            "B" => Some(ParsedAnswer::B),
            "C" => Some(ParsedAnswer::C),
            "D" => Some(ParsedAnswer::D),
            _ => None,
        }
    }

    /// @ai:intent Whether this is one of the four real choices
    /// @ai:effects pure
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            ParsedAnswer::A | ParsedAnswer::B | ParsedAnswer::C | ParsedAnswer::D
        )
    }
}

impl std::fmt::Display for ParsedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Recovers a single choice letter from free-form model output
pub struct AnswerParser {
    /// Matches non-nested JSON-object-like substrings mentioning "answer"
    embedded_json_regex: Regex,
    /// "answer is X" / "antwort: X" style cues (EN/DE)
    answer_cue_regex: Regex,
    /// Conclusion markers followed by a letter ("therefore", "daher", ...)
    conclusion_cue_regex: Regex,
    /// A letter standing alone between whitespace/sentence boundaries
    isolated_letter_regex: Regex,
}

impl AnswerParser {
    /// @ai:intent Create a parser with all extraction patterns compiled
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            embedded_json_regex: Regex::new(r#"(?i)\{[^{}]*"answer"[^{}]*\}"#).unwrap(),
            answer_cue_regex: Regex::new(r"(?i)(?:answer|antwort)(?:\s*is\s*|\s*:\s*)([A-D])")
                .unwrap(),
            conclusion_cue_regex: Regex::new(
                r"(?i)(?:therefore|daher|deshalb|somit).*?([A-D])(?:\s|$|\.)",
            )
            .unwrap(),
            isolated_letter_regex: Regex::new(r"(?i)(?:^|\s)([A-D])(?:\s|$|\.)").unwrap(),
        }
    }

    /// @ai:intent Extract an answer choice, trying strategies in priority order
    /// @ai:effects logs a warning when nothing matches
    ///
    /// Order: whole-text JSON, embedded JSON fragments, bare letter,
    /// natural-language cues (last match of the first matching pattern),
    /// then a raw character scan. Structured signals always win over
    /// heuristic salvage.
    pub fn parse(&self, raw: &str) -> ParsedAnswer {
        let text = raw.trim();

        if let Some(answer) = Self::extract_from_json_text(text) {
            return answer;
        }

        if let Some(answer) = self.extract_from_embedded_json(text) {
            return answer;
        }

        if let Some(answer) = ParsedAnswer::from_letter(&text.to_uppercase()) {
            return answer;
        }

        if let Some(answer) = self.extract_from_cues(text) {
            return answer;
        }

        if let Some(answer) = Self::extract_last_letter(text) {
            return answer;
        }

        tracing::warn!("could not parse model response: {text}");
        ParsedAnswer::Invalid
    }

    /// @ai:intent Parse the whole text as a JSON object with an "answer" field
    /// @ai:effects pure
    fn extract_from_json_text(text: &str) -> Option<ParsedAnswer> {
        let value: serde_json::Value = serde_json::from_str(text).ok()?;
        Self::answer_field(&value)
    }

    /// @ai:intent Parse each embedded JSON candidate in order of appearance
    /// @ai:effects pure
    fn extract_from_embedded_json(&self, text: &str) -> Option<ParsedAnswer> {
        self.embedded_json_regex
            .find_iter(text)
            .filter_map(|m| serde_json::from_str::<serde_json::Value>(m.as_str()).ok())
            .find_map(|value| Self::answer_field(&value))
    }

    /// @ai:intent Read a valid A-D choice from a JSON object's "answer" field
    /// @ai:effects pure
    fn answer_field(value: &serde_json::Value) -> Option<ParsedAnswer> {
        let answer = value.as_object()?.get("answer")?.as_str()?;
        ParsedAnswer::from_letter(&answer.trim().to_uppercase())
    }

    /// @ai:intent Try the natural-language patterns in order; within the
    ///            first pattern that matches, the last match wins
    /// @ai:effects pure
    fn extract_from_cues(&self, text: &str) -> Option<ParsedAnswer> {
        let patterns = [
            &self.answer_cue_regex,
            &self.conclusion_cue_regex,
            &self.isolated_letter_regex,
        ];

        for pattern in patterns {
            let last = pattern
                .captures_iter(text)
                .filter_map(|cap| cap.get(1))
                .last();

            if let Some(m) = last {
                return ParsedAnswer::from_letter(&m.as_str().to_uppercase());
            }
        }

        None
    }

    /// @ai:intent Last resort: the last character anywhere that is a choice letter
    /// @ai:effects pure
    fn extract_last_letter(text: &str) -> Option<ParsedAnswer> {
        text.chars().rev().find_map(|c| match c.to_ascii_uppercase() {
            'A' => Some(ParsedAnswer::A),
            'B' => Some(ParsedAnswer::B),
            'C' => Some(ParsedAnswer::C),
            'D' => Some(ParsedAnswer::D),
            _ => None,
        })
    }
}

impl Default for AnswerParser {
    fn default() -> Self {
        Self::new()
    }
}
