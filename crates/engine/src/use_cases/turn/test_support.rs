//! Small game data for turn tests: every script speaks its own key.

use serde_json::{json, Value};

use mystery_animal_domain::game_data::phrased_results;
use mystery_animal_domain::grammar::keys;
use mystery_animal_domain::{
    AnimalCorpus, Category, GameData, Grammar, KnowledgeTopic, Lexicon, SizeCorpus,
};

fn animal(name: &str, mass_grams: f64, legs: i64, hint: &str) -> Value {
    json!({
        "animal": name,
        "adultweightgrams": mass_grams,
        "hints": [hint],
        "diet": "leaves, fruit",
        "prey": "none",
        "predators": "lions",
        "behavior": "lives in herds",
        "migrate": false,
        "hibernate": false,
        "poisonous": false,
        "endangered": "response_sometimes",
        "pet": false,
        "edible": "response_possible",
        "class": "mammal",
        "nocturnal": false,
        "layeggs": false,
        "friendlysizemass": "huge",
        "habitat": "savanna",
        "countries": "kenya, tanzania",
        "bodyparts": "long neck, hooves",
        "colors": "yellow, brown",
        "legs": legs,
    })
}

fn grammar() -> Value {
    let mut scripts = serde_json::Map::new();
    for key in keys::all_keys() {
        scripts.insert(key.to_string(), json!(format!("[{key}]")));
    }
    let overrides = [
        (keys::WIN, "[win] #animal# #questionsAskedString#"),
        (keys::LOSE, "[lose] #animal#"),
        (keys::INCORRECT_GUESS, "[incorrectGuess] #guess#"),
        (keys::QUESTIONS_LEFT, "[questionsLeft] #remaining#"),
        (keys::DONT_KNOW_REPEAT, "[dontknow_repeat] #dontKnow# #input#"),
        (keys::DONT_KNOW_NO_REPEAT, "[dontknow_norepeat] #dontKnow#"),
        (keys::NO_INPUT_REMINDERS, "[noInput_reminders] #alreadyFound# #suggestion#"),
    ];
    for (key, text) in overrides {
        scripts.insert(key.to_string(), json!(text));
    }
    for topic in KnowledgeTopic::ALL {
        let key = topic.script_key();
        scripts.insert(key.to_string(), json!(format!("[{key}] #description#")));
    }
    scripts.insert(
        keys::NO_INPUT_NO_INFO_FOUND.to_string(),
        json!(["[noInfo 1]", "[noInfo 2]", "[noInfo 3]"]),
    );

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

/// Giraffe (index 0) and penguin (index 1); dogs and elephants for size questions.
pub(crate) fn game_data() -> GameData {
    let animals = AnimalCorpus::from_json(
        &json!({
            "animals": [
                animal("giraffe", 800_000.0, 4, "I have a very long neck."),
                animal("penguin", 20_000.0, 2, "I can't fly."),
            ]
        })
        .to_string(),
    )
    .unwrap();
    let sizes = SizeCorpus::from_json(
        &json!({
            "sizeData": [
                { "common_names": "Domestic Dog, Dog", "mass_average_g": 30000 },
                { "common_names": "African Elephant", "mass_average_g": 5000000 }
            ]
        })
        .to_string(),
    )
    .unwrap();
    let grammar = Grammar::from_json(&grammar().to_string()).unwrap();
    let lexicon = Lexicon::new(["who", "is", "what", "a"], ["darn"]);

    GameData::new(animals, sizes, grammar, lexicon).unwrap()
}
