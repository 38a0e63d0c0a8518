//! Loads the static corpora from a data directory.

use std::path::{Path, PathBuf};

use mystery_animal_domain::{AnimalCorpus, DomainError, GameData, Grammar, Lexicon, SizeCorpus};

pub const ANIMALS_FILE: &str = "animals.json";
pub const SIZES_FILE: &str = "sizes.json";
pub const RESPONSES_FILE: &str = "responses.json";
pub const STOP_WORDS_FILE: &str = "stop_words.json";
pub const PROFANITIES_FILE: &str = "profanities.json";

#[derive(Debug, thiserror::Error)]
pub enum CorpusLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid {file}: {source}")]
    Invalid {
        file: &'static str,
        source: DomainError,
    },
}

/// Read, parse and cross-check every corpus file in `dir`.
pub async fn load_game_data(dir: &Path) -> Result<GameData, CorpusLoadError> {
    let animals = read(dir, ANIMALS_FILE).await?;
    let sizes = read(dir, SIZES_FILE).await?;
    let responses = read(dir, RESPONSES_FILE).await?;
    let stop_words = read(dir, STOP_WORDS_FILE).await?;
    let profanities = read(dir, PROFANITIES_FILE).await?;

    parse_game_data(&animals, &sizes, &responses, &stop_words, &profanities)
}

/// Build [`GameData`] from the raw file contents.
pub fn parse_game_data(
    animals: &str,
    sizes: &str,
    responses: &str,
    stop_words: &str,
    profanities: &str,
) -> Result<GameData, CorpusLoadError> {
    let animals = AnimalCorpus::from_json(animals)
        .map_err(DomainError::from)
        .map_err(invalid(ANIMALS_FILE))?;
    let sizes = SizeCorpus::from_json(sizes)
        .map_err(DomainError::from)
        .map_err(invalid(SIZES_FILE))?;
    let grammar = Grammar::from_json(responses)
        .map_err(DomainError::from)
        .map_err(invalid(RESPONSES_FILE))?;
    let lexicon = Lexicon::from_json(stop_words, profanities)
        .map_err(DomainError::from)
        .map_err(invalid(STOP_WORDS_FILE))?;

    GameData::new(animals, sizes, grammar, lexicon).map_err(invalid(RESPONSES_FILE))
}

fn invalid(file: &'static str) -> impl Fn(DomainError) -> CorpusLoadError {
    move |source| CorpusLoadError::Invalid { file, source }
}

async fn read(dir: &Path, file: &str) -> Result<String, CorpusLoadError> {
    let path = dir.join(file);
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CorpusLoadError::Io { path, source })
}
