//! Shared builders for domain unit tests.

use serde_json::{json, Value};

use crate::category::Category;
use crate::game_data::phrased_results;
use crate::grammar::keys;

/// A complete animal entry in the corpus layout.
pub(crate) fn animal_json(name: &str, mass_grams: f64, legs: i64) -> Value {
    json!({
        "animal": name,
        "adultweightgrams": mass_grams,
        "hints": [format!("I rhyme with {name}.")],
        "diet": "leaves, fruit",
        "prey": "none",
        "predators": "lions, crocodiles",
        "behavior": "lives in herds",
        "migrate": "response_false",
        "hibernate": false,
        "poisonous": false,
        "endangered": "response_sometimes",
        "pet": false,
        "edible": "response_possible",
        "class": "mammal",
        "nocturnal": false,
        "layeggs": false,
        "friendlysizemass": "huge",
        "habitat": "savanna, grassland",
        "countries": "kenya, tanzania",
        "bodyparts": "long neck, hooves, ossicones, tail",
        "colors": "yellow, brown",
        "legs": legs,
    })
}

/// A grammar that defines every script and answer the game needs, each
/// expanding to its own key so tests can see which one was spoken.
pub(crate) fn full_grammar_json() -> Value {
    let mut scripts = serde_json::Map::new();
    for key in keys::all_keys() {
        scripts.insert(key.to_string(), json!(format!("[{key}]")));
    }

    let mut answers = serde_json::Map::new();
    for category in Category::ALL {
        let mut topic = serde_json::Map::new();
        for result in phrased_results(category) {
            topic.insert(
                result.as_str().to_string(),
                json!(format!("[{category}.{result}], #guess#")),
            );
        }
        answers.insert(category.as_str().to_string(), Value::Object(topic));
    }

    json!({ "scripts": scripts, "answers": answers })
}
