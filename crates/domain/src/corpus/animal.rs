use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;

use super::{looks_like_sentinel, AttributeValue, CorpusError, COMMONLY_FOUND};
use crate::category::{Category, EvaluationMode, Evaluator};
use crate::ids::AnimalIndex;
use crate::AnswerResult;

/// One mystery animal.
#[derive(Debug, Clone)]
pub struct AnimalProfile {
    name: String,
    mass_grams: f64,
    hints: Vec<String>,
    attributes: HashMap<Category, AttributeValue>,
}

impl AnimalProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass_grams(&self) -> f64 {
        self.mass_grams
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Correct answer for a category, following its attribute source.
    pub fn attribute(&self, category: Category) -> Option<&AttributeValue> {
        category
            .attribute_source()
            .and_then(|source| self.attributes.get(&source))
    }
}

#[derive(Debug, Deserialize)]
struct RawCorpus {
    animals: Vec<RawAnimal>,
}

#[derive(Debug, Deserialize)]
struct RawAnimal {
    animal: String,
    adultweightgrams: f64,
    hints: Vec<String>,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

/// The table of animal profiles, indexed `0..N`.
#[derive(Debug, Clone)]
pub struct AnimalCorpus {
    animals: Vec<AnimalProfile>,
}

impl AnimalCorpus {
    /// Parse and validate the animal table.
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let raw: RawCorpus =
            serde_json::from_str(json).map_err(|e| CorpusError::Malformed(e.to_string()))?;
        if raw.animals.is_empty() {
            return Err(CorpusError::Empty("animals"));
        }

        let animals = raw
            .animals
            .into_iter()
            .enumerate()
            .map(|(index, animal)| validate_animal(index, animal))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { animals })
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn get(&self, index: AnimalIndex) -> Option<&AnimalProfile> {
        self.animals.get(index.get())
    }
}

fn validate_animal(index: usize, raw: RawAnimal) -> Result<AnimalProfile, CorpusError> {
    let name = raw.animal.trim().to_string();
    if name.is_empty() {
        return Err(CorpusError::invalid(index, "?", "animal name is empty"));
    }
    if !(raw.adultweightgrams.is_finite() && raw.adultweightgrams > 0.0) {
        return Err(CorpusError::invalid(index, &name, "adultweightgrams must be positive"));
    }
    if raw.hints.iter().all(|hint| hint.trim().is_empty()) {
        return Err(CorpusError::invalid(index, &name, "at least one hint is required"));
    }

    let mut attributes = HashMap::new();
    for (key, value) in raw.attributes {
        let category: Category = key
            .parse()
            .map_err(|_| CorpusError::invalid(index, &name, format!("unknown attribute '{key}'")))?;
        if category.attribute_source() != Some(category) {
            return Err(CorpusError::invalid(
                index,
                &name,
                format!("'{key}' is not a stored attribute"),
            ));
        }
        let value = validate_attribute(category, value)
            .map_err(|message| CorpusError::invalid(index, &name, format!("'{key}': {message}")))?;
        attributes.insert(category, value);
    }

    if let Some(missing) = Category::ALL
        .into_iter()
        .filter(|category| category.attribute_source() == Some(*category))
        .find(|category| !attributes.contains_key(category))
    {
        return Err(CorpusError::invalid(
            index,
            &name,
            format!("missing attribute '{missing}'"),
        ));
    }

    Ok(AnimalProfile {
        name,
        mass_grams: raw.adultweightgrams,
        hints: raw.hints,
        attributes,
    })
}

fn validate_attribute(category: Category, value: Value) -> Result<AttributeValue, String> {
    let Evaluator::Guess(mode) = category.evaluator() else {
        return Err("category is not answered from the animal profile".to_string());
    };

    match (mode, value) {
        (EvaluationMode::YesNo, Value::Bool(flag)) => Ok(AttributeValue::Verdict(if flag {
            AnswerResult::True
        } else {
            AnswerResult::False
        })),
        (EvaluationMode::YesNo, Value::String(verdict)) => AnswerResult::from_verdict(&verdict)
            .map(AttributeValue::Verdict)
            .ok_or_else(|| format!("unrecognised verdict '{verdict}'")),
        (EvaluationMode::Count | EvaluationMode::CompareLegsNumber, Value::Number(number)) => {
            number
                .as_i64()
                .map(AttributeValue::Count)
                .ok_or_else(|| format!("expected a whole number, got {number}"))
        }
        (EvaluationMode::Countries, Value::String(text)) if text == COMMONLY_FOUND => {
            Ok(AttributeValue::CommonlyFound)
        }
        (
            EvaluationMode::Countries
            | EvaluationMode::Match
            | EvaluationMode::SpecialInfo
            | EvaluationMode::SpecialCategories,
            Value::String(text),
        ) => {
            if looks_like_sentinel(&text) {
                Err(format!("unmodeled sentinel '{text}'"))
            } else {
                Ok(AttributeValue::Text(text))
            }
        }
        (mode, other) => Err(format!(
            "value {other} does not fit evaluation mode '{}'",
            mode.as_str()
        )),
    }
}
