//! English post-processing modifiers applied as `#rule.modifier#`.

use std::str::FromStr;

/// A lexical modifier applied to an expanded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Upper-case the first character
    Capitalize,
    /// Upper-case the first character of every word
    CapitalizeAll,
    /// Prefix the indefinite article ("a cat", "an owl")
    Article,
    /// Pluralize
    Plural,
    /// Pluralize only the first word ("cat food" -> "cats food")
    FirstPlural,
    /// Simple past tense
    Past,
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capitalize" => Ok(Self::Capitalize),
            "capitalizeAll" => Ok(Self::CapitalizeAll),
            "a" => Ok(Self::Article),
            "s" => Ok(Self::Plural),
            "firstS" => Ok(Self::FirstPlural),
            "ed" => Ok(Self::Past),
            other => Err(other.to_string()),
        }
    }
}

impl Modifier {
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Capitalize => capitalize(text),
            Self::CapitalizeAll => text
                .split(' ')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            Self::Article => article(text),
            Self::Plural => plural(text),
            Self::FirstPlural => match text.split_once(' ') {
                Some((first, rest)) => format!("{} {}", plural(first), rest),
                None => plural(text),
            },
            Self::Past => past(text),
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn article(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut chars = lower.chars();
    let an = match chars.next() {
        // "a unicorn", "a uniform"
        Some('u') if lower.starts_with("uni") => false,
        Some(c) => is_vowel(c),
        None => false,
    };
    if an {
        format!("an {text}")
    } else {
        format!("a {text}")
    }
}

fn plural(text: &str) -> String {
    let mut chars = text.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('s' | 'h' | 'x'), _) => format!("{text}es"),
        (Some('y'), Some(prev)) if !is_vowel(prev) => {
            format!("{}ies", &text[..text.len() - 1])
        }
        _ => format!("{text}s"),
    }
}

fn past(text: &str) -> String {
    let mut chars = text.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('e'), _) => format!("{text}d"),
        (Some('y'), Some(prev)) if !is_vowel(prev) => {
            format!("{}ied", &text[..text.len() - 1])
        }
        _ => format!("{text}ed"),
    }
}
