//! Response grammar - weighted, recursive template expansion.
//!
//! A grammar document has two sections:
//!
//! ```json
//! {
//!   "scripts": { "win": ["You got it! I'm #animal.a#."], ... },
//!   "answers": { "diet": { "response_true": ["#yes# I eat #guess#."], ... } }
//! }
//! ```
//!
//! A rule is a single alternative or a list of them; an alternative is a
//! string or `{"text": ..., "weight": n}`. Alternatives reference other rules
//! or runtime [`Variables`] as `#key#`, optionally followed by modifiers
//! (`#animal.a.capitalize#`).
//!
//! Inside an answer topic, references resolve against the topic first and then
//! the scripts. Inside the scripts, only scripts are visible. Every reference,
//! modifier and cycle is checked when the document is loaded, so expansion
//! always terminates and can only fail on an unbound variable.

pub mod keys;
mod modifiers;
mod template;

pub use modifiers::Modifier;
pub use template::{TemplateVar, Variables};

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::category::Category;
use crate::random::pick_weighted;
use crate::AnswerResult;
use template::{ParseFailure, Segment};

/// Errors raised while loading or expanding a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Malformed grammar document: {0}")]
    Malformed(String),

    #[error("Unknown rule '{0}'")]
    UnknownRule(String),

    #[error("Rule '{rule}' uses unknown modifier '{modifier}'")]
    UnknownModifier { rule: String, modifier: String },

    #[error("Rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    #[error("Cyclic rule reference: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    #[error("Variable '{0}' is not bound")]
    MissingVariable(&'static str),

    #[error("No answers defined for category '{0}'")]
    MissingTopic(Category),
}

#[derive(Debug, Deserialize)]
struct RawGrammar {
    scripts: BTreeMap<String, RawRule>,
    #[serde(default)]
    answers: BTreeMap<String, BTreeMap<String, RawRule>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRule {
    One(RawAlternative),
    Many(Vec<RawAlternative>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAlternative {
    Text(String),
    Weighted { text: String, weight: u32 },
}

#[derive(Debug, Clone)]
struct Alternative {
    text: String,
    weight: u32,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
struct Rule {
    alternatives: Vec<Alternative>,
}

type RuleSet = HashMap<String, Rule>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Scope {
    Scripts,
    Topic(Category),
}

enum Target {
    Rule(Scope),
    Var(TemplateVar),
}

/// A validated response grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    scripts: RuleSet,
    answers: HashMap<Category, RuleSet>,
}

impl Grammar {
    /// Parse and validate a grammar document.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar =
            serde_json::from_str(json).map_err(|e| GrammarError::Malformed(e.to_string()))?;

        let scripts = build_rules(Scope::Scripts, raw.scripts)?;
        let mut answers = HashMap::new();
        for (topic, rules) in raw.answers {
            let category: Category = topic.parse().map_err(|_| {
                GrammarError::Malformed(format!("unknown answer topic '{topic}'"))
            })?;
            answers.insert(category, build_rules(Scope::Topic(category), rules)?);
        }

        let grammar = Self { scripts, answers };
        grammar.check_references()?;
        Ok(grammar)
    }

    pub fn has_script(&self, key: &str) -> bool {
        self.scripts.contains_key(key)
    }

    pub fn has_answer(&self, category: Category, result: AnswerResult) -> bool {
        self.answers
            .get(&category)
            .is_some_and(|rules| rules.contains_key(result.as_str()))
    }

    /// Expand a script.
    pub fn script<R>(&self, key: &str, vars: &Variables, roll: &mut R) -> Result<String, GrammarError>
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        self.expand(Scope::Scripts, key, vars, roll)
    }

    /// Expand the answer sentence for a judged question.
    pub fn answer<R>(
        &self,
        category: Category,
        result: AnswerResult,
        vars: &Variables,
        roll: &mut R,
    ) -> Result<String, GrammarError>
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        if !self.answers.contains_key(&category) {
            return Err(GrammarError::MissingTopic(category));
        }
        self.expand(Scope::Topic(category), result.as_str(), vars, roll)
    }

    /// The unexpanded alternatives of a script, in declared order.
    pub fn raw_script_array(&self, key: &str) -> Option<Vec<&str>> {
        self.scripts.get(key).map(|rule| {
            rule.alternatives
                .iter()
                .map(|alternative| alternative.text.as_str())
                .collect()
        })
    }

    fn rule(&self, scope: Scope, key: &str) -> Option<&Rule> {
        match scope {
            Scope::Scripts => self.scripts.get(key),
            Scope::Topic(category) => self.answers.get(&category)?.get(key),
        }
    }

    fn resolve(&self, scope: Scope, key: &str) -> Option<Target> {
        if let Some(var) = TemplateVar::from_key(key) {
            return Some(Target::Var(var));
        }
        if scope != Scope::Scripts && self.rule(scope, key).is_some() {
            return Some(Target::Rule(scope));
        }
        self.scripts
            .contains_key(key)
            .then_some(Target::Rule(Scope::Scripts))
    }

    fn expand<R>(
        &self,
        scope: Scope,
        key: &str,
        vars: &Variables,
        roll: &mut R,
    ) -> Result<String, GrammarError>
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        let rule = self
            .rule(scope, key)
            .ok_or_else(|| GrammarError::UnknownRule(label(scope, key)))?;
        let weights: Vec<u32> = rule.alternatives.iter().map(|a| a.weight).collect();
        let alternative = pick_weighted(roll, &weights)
            .and_then(|index| rule.alternatives.get(index))
            .ok_or_else(|| GrammarError::UnknownRule(label(scope, key)))?;

        let mut out = String::with_capacity(alternative.text.len());
        for segment in &alternative.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Symbol { key: child, modifiers } => {
                    let mut text = match self.resolve(scope, child) {
                        Some(Target::Var(var)) => vars
                            .get(var)
                            .ok_or(GrammarError::MissingVariable(var.key()))?
                            .to_string(),
                        Some(Target::Rule(child_scope)) => {
                            self.expand(child_scope, child, vars, roll)?
                        }
                        None => return Err(GrammarError::UnknownRule(child.clone())),
                    };
                    for modifier in modifiers {
                        text = modifier.apply(&text);
                    }
                    out.push_str(&text);
                }
            }
        }
        Ok(out)
    }

    fn check_references(&self) -> Result<(), GrammarError> {
        let mut done = HashSet::new();
        let mut path = Vec::new();

        let scripts = self.scripts.keys().map(|key| (Scope::Scripts, key));
        let topics = self.answers.iter().flat_map(|(category, rules)| {
            rules.keys().map(move |key| (Scope::Topic(*category), key))
        });
        for (scope, key) in scripts.chain(topics) {
            self.visit(scope, key, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        scope: Scope,
        key: &str,
        path: &mut Vec<(Scope, String)>,
        done: &mut HashSet<(Scope, String)>,
    ) -> Result<(), GrammarError> {
        let node = (scope, key.to_string());
        if done.contains(&node) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|visited| *visited == node) {
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|(scope, key)| label(*scope, key))
                .collect();
            cycle.push(label(scope, key));
            return Err(GrammarError::Cycle(cycle));
        }
        let rule = self
            .rule(scope, key)
            .ok_or_else(|| GrammarError::UnknownRule(label(scope, key)))?;

        path.push(node.clone());
        for segment in rule.alternatives.iter().flat_map(|a| a.segments.iter()) {
            let Segment::Symbol { key: child, .. } = segment else {
                continue;
            };
            match self.resolve(scope, child) {
                Some(Target::Var(_)) => {}
                Some(Target::Rule(child_scope)) => self.visit(child_scope, child, path, done)?,
                None => {
                    return Err(GrammarError::UnknownRule(format!(
                        "{child} (referenced from {})",
                        label(scope, key)
                    )))
                }
            }
        }
        path.pop();
        done.insert(node);
        Ok(())
    }
}

fn label(scope: Scope, key: &str) -> String {
    match scope {
        Scope::Scripts => key.to_string(),
        Scope::Topic(category) => format!("{category}.{key}"),
    }
}

fn build_rules(scope: Scope, raw: BTreeMap<String, RawRule>) -> Result<RuleSet, GrammarError> {
    let mut rules = RuleSet::with_capacity(raw.len());
    for (key, raw_rule) in raw {
        let name = label(scope, &key);
        let invalid = |message: &str| GrammarError::InvalidRule {
            rule: name.clone(),
            message: message.to_string(),
        };
        if TemplateVar::from_key(&key).is_some() {
            return Err(invalid("name is reserved for a runtime variable"));
        }

        let raw_alternatives = match raw_rule {
            RawRule::One(alternative) => vec![alternative],
            RawRule::Many(alternatives) => alternatives,
        };
        if raw_alternatives.is_empty() {
            return Err(invalid("has no alternatives"));
        }

        let mut alternatives = Vec::with_capacity(raw_alternatives.len());
        for raw_alternative in raw_alternatives {
            let (text, weight) = match raw_alternative {
                RawAlternative::Text(text) => (text, 1),
                RawAlternative::Weighted { text, weight } => (text, weight),
            };
            if weight == 0 {
                return Err(invalid("weights must be positive"));
            }
            let segments = template::parse(&text).map_err(|failure| match failure {
                ParseFailure::UnknownModifier(modifier) => GrammarError::UnknownModifier {
                    rule: name.clone(),
                    modifier,
                },
                ParseFailure::Unterminated => invalid("unterminated '#' symbol"),
                ParseFailure::EmptySymbol => invalid("empty '##' symbol"),
            })?;
            alternatives.push(Alternative {
                text,
                weight,
                segments,
            });
        }
        rules.insert(key, Rule { alternatives });
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grammar(doc: serde_json::Value) -> Result<Grammar, GrammarError> {
        Grammar::from_json(&doc.to_string())
    }

    fn first(_: i32, _: i32) -> i32 {
        0
    }

    fn last(_: i32, max: i32) -> i32 {
        max
    }

    #[test]
    fn expands_nested_rules_and_variables() {
        let g = grammar(json!({
            "scripts": {
                "win": "#cheer# It was #animal.a#!",
                "cheer": ["You got it!", "Amazing!"]
            }
        }))
        .unwrap();
        let vars = Variables::new().with(TemplateVar::Animal, "owl");

        assert_eq!(
            g.script("win", &vars, &mut first).unwrap(),
            "You got it! It was an owl!"
        );
        assert_eq!(
            g.script("win", &vars, &mut last).unwrap(),
            "Amazing! It was an owl!"
        );
    }

    #[test]
    fn answers_see_their_topic_and_the_scripts() {
        let g = grammar(json!({
            "scripts": { "yes": "Yes!" },
            "answers": {
                "diet": {
                    "response_true": "#yes# I eat #food#, like #guess#.",
                    "food": "plants"
                }
            }
        }))
        .unwrap();
        let vars = Variables::new().with(TemplateVar::Guess, "leaves");

        let text = g
            .answer(Category::Diet, AnswerResult::True, &vars, &mut first)
            .unwrap();
        assert_eq!(text, "Yes! I eat plants, like leaves.");
    }

    #[test]
    fn scripts_cannot_see_answer_topics() {
        let err = grammar(json!({
            "scripts": { "win": "#food#" },
            "answers": { "diet": { "food": "plants" } }
        }))
        .unwrap_err();
        assert!(matches!(err, GrammarError::UnknownRule(_)));
    }

    #[test]
    fn weights_bias_the_draw() {
        let g = grammar(json!({
            "scripts": {
                "greeting": [
                    { "text": "hi", "weight": 1 },
                    { "text": "hello", "weight": 3 }
                ]
            }
        }))
        .unwrap();
        let mut seen_bound = 0;
        let mut roll = |min: i32, max: i32| {
            seen_bound = max;
            min + 1
        };
        assert_eq!(g.script("greeting", &Variables::new(), &mut roll).unwrap(), "hello");
        assert_eq!(seen_bound, 3);
    }

    #[test]
    fn rejects_cycles_at_load_time() {
        let err = grammar(json!({
            "scripts": { "a": "#b#", "b": ["ok", "#a#"] }
        }))
        .unwrap_err();
        let GrammarError::Cycle(path) = err else {
            panic!("expected a cycle, got {err:?}");
        };
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn rejects_self_reference() {
        let err = grammar(json!({ "scripts": { "a": "again and #a#" } })).unwrap_err();
        assert_eq!(err, GrammarError::Cycle(vec!["a".to_string(), "a".to_string()]));
    }

    #[test]
    fn rejects_unknown_references_and_modifiers() {
        assert!(matches!(
            grammar(json!({ "scripts": { "a": "#nowhere#" } })).unwrap_err(),
            GrammarError::UnknownRule(_)
        ));
        assert_eq!(
            grammar(json!({ "scripts": { "a": "#guess.shout#" } })).unwrap_err(),
            GrammarError::UnknownModifier {
                rule: "a".to_string(),
                modifier: "shout".to_string()
            }
        );
    }

    #[test]
    fn rejects_rules_shadowing_variables() {
        let err = grammar(json!({ "scripts": { "guess": "x" } })).unwrap_err();
        assert!(matches!(err, GrammarError::InvalidRule { .. }));
    }

    #[test]
    fn rejects_unknown_topics_and_empty_rules() {
        assert!(grammar(json!({ "scripts": {}, "answers": { "wingspan": {} } })).is_err());
        assert!(grammar(json!({ "scripts": { "a": [] } })).is_err());
        assert!(grammar(json!({ "scripts": { "a": { "text": "x", "weight": 0 } } })).is_err());
    }

    #[test]
    fn unbound_variable_is_a_runtime_error() {
        let g = grammar(json!({ "scripts": { "win": "It was #animal#." } })).unwrap();
        let err = g.script("win", &Variables::new(), &mut first).unwrap_err();
        assert_eq!(err, GrammarError::MissingVariable("animal"));
    }

    #[test]
    fn missing_topic_is_reported() {
        let g = grammar(json!({ "scripts": {} })).unwrap();
        let err = g
            .answer(Category::Legs, AnswerResult::True, &Variables::new(), &mut first)
            .unwrap_err();
        assert_eq!(err, GrammarError::MissingTopic(Category::Legs));
    }

    #[test]
    fn raw_array_is_unexpanded_and_ordered() {
        let g = grammar(json!({
            "scripts": {
                "yes": "Yes",
                "noInput_noInfoFound": ["#yes#, one.", "two.", "three."]
            }
        }))
        .unwrap();
        assert_eq!(
            g.raw_script_array("noInput_noInfoFound"),
            Some(vec!["#yes#, one.", "two.", "three."])
        );
        assert_eq!(g.raw_script_array("missing"), None);
    }

    #[test]
    fn variable_values_are_not_reexpanded() {
        let g = grammar(json!({ "scripts": { "echo": "You said #input#" } })).unwrap();
        let vars = Variables::new().with(TemplateVar::Input, "#win#");
        assert_eq!(g.script("echo", &vars, &mut first).unwrap(), "You said #win#");
    }
}
