use std::collections::BTreeMap;

use super::modifiers::Modifier;

/// One piece of a parsed alternative.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Segment {
    Literal(String),
    Symbol { key: String, modifiers: Vec<Modifier> },
}

/// Parse `"Yes, #animal.a# eats #guess#."` into literals and symbols.
pub(super) fn parse(text: &str) -> Result<Vec<Segment>, ParseFailure> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('#') {
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }
        let after = &rest[open + 1..];
        let close = after.find('#').ok_or(ParseFailure::Unterminated)?;
        let mut parts = after[..close].split('.');
        let key = parts.next().unwrap_or_default().trim();
        if key.is_empty() {
            return Err(ParseFailure::EmptySymbol);
        }
        let modifiers = parts
            .map(|name| name.parse::<Modifier>().map_err(ParseFailure::UnknownModifier))
            .collect::<Result<Vec<_>, _>>()?;
        segments.push(Segment::Symbol {
            key: key.to_string(),
            modifiers,
        });
        rest = &after[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
    Ok(segments)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ParseFailure {
    Unterminated,
    EmptySymbol,
    UnknownModifier(String),
}

/// Runtime values a template may reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateVar {
    /// The player's literal guess
    Guess,
    /// The mystery animal's name
    Animal,
    /// Questions used so far, spelled out for speech
    QuestionsAskedString,
    /// Questions remaining in the budget
    Remaining,
    /// A previously answered fact, resurfaced by a reminder
    AlreadyFound,
    /// A friendly category name to suggest asking about
    Suggestion,
    /// Description returned by the knowledge lookup
    Description,
    /// The question restated back to the player
    Question,
    /// The player's raw utterance
    Input,
    /// An already expanded "don't know" lead-in
    DontKnow,
}

impl TemplateVar {
    pub const ALL: [TemplateVar; 10] = [
        Self::Guess,
        Self::Animal,
        Self::QuestionsAskedString,
        Self::Remaining,
        Self::AlreadyFound,
        Self::Suggestion,
        Self::Description,
        Self::Question,
        Self::Input,
        Self::DontKnow,
    ];

    /// Name used inside `#...#` symbols.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Guess => "guess",
            Self::Animal => "animal",
            Self::QuestionsAskedString => "questionsAskedString",
            Self::Remaining => "remaining",
            Self::AlreadyFound => "alreadyFound",
            Self::Suggestion => "suggestion",
            Self::Description => "description",
            Self::Question => "question",
            Self::Input => "input",
            Self::DontKnow => "dontKnow",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|var| var.key() == key)
    }
}

/// Per-invocation bindings for [`TemplateVar`]s.
///
/// Bound values are inserted literally; they are never re-expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<TemplateVar, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding.
    pub fn with(mut self, var: TemplateVar, value: impl Into<String>) -> Self {
        self.set(var, value);
        self
    }

    pub fn set(&mut self, var: TemplateVar, value: impl Into<String>) {
        self.values.insert(var, value.into());
    }

    pub fn get(&self, var: TemplateVar) -> Option<&str> {
        self.values.get(&var).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_literals_and_symbols() {
        let segments = parse("Yes, #animal.a.capitalize# eats #guess#.").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("Yes, ".to_string()),
                Segment::Symbol {
                    key: "animal".to_string(),
                    modifiers: vec![Modifier::Article, Modifier::Capitalize],
                },
                Segment::Literal(" eats ".to_string()),
                Segment::Symbol {
                    key: "guess".to_string(),
                    modifiers: vec![],
                },
                Segment::Literal(".".to_string()),
            ]
        );
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(
            parse("Okay, bye!").unwrap(),
            vec![Segment::Literal("Okay, bye!".to_string())]
        );
    }

    #[test]
    fn rejects_malformed_symbols() {
        assert_eq!(parse("oops #guess"), Err(ParseFailure::Unterminated));
        assert_eq!(parse("##"), Err(ParseFailure::EmptySymbol));
        assert_eq!(
            parse("#guess.loud#"),
            Err(ParseFailure::UnknownModifier("loud".to_string()))
        );
    }

    #[test]
    fn template_var_keys_round_trip() {
        for var in TemplateVar::ALL {
            assert_eq!(TemplateVar::from_key(var.key()), Some(var));
        }
        assert_eq!(TemplateVar::from_key("yes"), None);
    }
}
