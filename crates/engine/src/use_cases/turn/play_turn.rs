//! Play turn use case - one utterance in, one spoken reply out.

use std::sync::Arc;
use std::time::Duration;

use mystery_animal_domain::grammar::keys;
use mystery_animal_domain::random::pick_index;
use mystery_animal_domain::{
    check_guess, compare_size, idle_prompts, reminder_lines, AnimalIndex, AnimalProfile,
    AnswerRecord, AnswerResult, Category, CompareWord, DomainError, Evaluator, GameData,
    GameSession, GuessOutcome, HintOutcome, MiscTopic, QuestionBudget, RoundEnded, RoundKind,
    SessionId, SessionPhase, SizeComparisonQuery, TemplateVar, Variables,
};
use mystery_animal_shared::{SoundCue, TurnIntent, TurnRequest, TurnResponse};

use super::fallback::KnowledgeFallback;
use super::reply::{join_sentences, Reply};
use crate::infrastructure::clock::dice;
use crate::infrastructure::ports::{
    GameLogRepo, KnowledgePort, QuestionLogEntry, RandomPort, SessionRepo,
};
use crate::infrastructure::ssml::SsmlRenderer;

/// Spoken when a script cannot be expanded.
pub const FALLBACK_LINE: &str = "Sorry, I got a little confused. Can you ask me another way?";
pub const GOODBYE_LINE: &str = "Thanks for playing, bye!";

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("Session id is empty")]
    MissingSessionId,
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Runs the game state machine for one turn.
///
/// Session state comes from the request or the session store and is written
/// back after every turn. Game log and session store failures are logged and
/// never reach the player.
pub struct PlayTurn {
    data: Arc<GameData>,
    sessions: Arc<dyn SessionRepo>,
    game_log: Arc<dyn GameLogRepo>,
    random: Arc<dyn RandomPort>,
    fallback: KnowledgeFallback,
    ssml: SsmlRenderer,
}

impl PlayTurn {
    pub fn new(
        data: Arc<GameData>,
        sessions: Arc<dyn SessionRepo>,
        game_log: Arc<dyn GameLogRepo>,
        knowledge: Arc<dyn KnowledgePort>,
        random: Arc<dyn RandomPort>,
        ssml: SsmlRenderer,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            data,
            sessions,
            game_log,
            random,
            fallback: KnowledgeFallback::new(knowledge, lookup_timeout),
            ssml,
        }
    }

    pub async fn execute(&self, request: TurnRequest) -> Result<TurnResponse, TurnError> {
        let TurnRequest {
            session_id,
            intent,
            raw_utterance,
            session_state,
        } = request;

        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(TurnError::MissingSessionId);
        }
        let session_id = SessionId::new(session_id);

        let mut session = self.resolve_session(&session_id, session_state).await;
        let intent_name = intent.name();
        let reply = self.dispatch(&mut session, intent, raw_utterance.trim()).await?;

        let idle_prompts = if reply.expect_more_input {
            self.idle_prompts(&session)
        } else {
            Vec::new()
        };
        let ssml = self.render(&reply);

        if let Err(e) = self.sessions.save(&session).await {
            tracing::warn!(session_id = %session_id, error = %e, "Failed to store session state");
        }

        tracing::debug!(
            session_id = %session_id,
            intent = intent_name,
            round = session.round(),
            questions_asked = session.questions_asked(),
            phase = ?session.phase(),
            "Turn played"
        );

        Ok(TurnResponse {
            spoken_text: reply.text,
            ssml,
            sound_cue: reply.cue,
            next_session_state: session,
            expect_more_input: reply.expect_more_input,
            idle_prompts,
        })
    }

    // =========================================================================
    // State machine
    // =========================================================================

    async fn dispatch(
        &self,
        session: &mut GameSession,
        intent: TurnIntent,
        raw: &str,
    ) -> Result<Reply, TurnError> {
        match session.phase() {
            SessionPhase::AwaitingStart | SessionPhase::SessionEnded => {
                return match intent {
                    TurnIntent::Quit => Ok(self.quit(session).await),
                    _ => self.start_round(session, RoundKind::FreshSession).await,
                };
            }
            // A turn died mid-lookup; the lookup is gone with it
            SessionPhase::AwaitingFallback => session.finish_fallback(),
            SessionPhase::RoundActive | SessionPhase::RoundOver => {}
        }

        if self.profile(session).is_none() {
            tracing::warn!(
                session_id = %session.session_id(),
                animal = ?session.animal(),
                "Session points at an unknown animal, starting over"
            );
            return self.start_round(session, RoundKind::FreshSession).await;
        }

        match intent {
            TurnIntent::Welcome => self.start_round(session, RoundKind::FreshSession).await,
            TurnIntent::NewRound => self.start_round(session, RoundKind::NextRound).await,
            TurnIntent::Quit => Ok(self.quit(session).await),
            TurnIntent::NoInput => Ok(self.no_input(session)),
            question => Ok(self.ask(session, question, raw).await),
        }
    }

    async fn start_round(
        &self,
        session: &mut GameSession,
        kind: RoundKind,
    ) -> Result<Reply, TurnError> {
        let started = {
            let mut roll = dice(self.random.as_ref());
            session.start_round(kind, self.data.animals().len(), &mut roll)?
        };

        if let Some(abandoned) = &started.abandoned {
            self.log_round_end(session.session_id(), abandoned).await;
        }
        if started.pool_recycled {
            tracing::info!(
                session_id = %session.session_id(),
                "Every animal has been played, refilling the pool"
            );
        }

        let animal = self.animal_name(started.animal);
        tracing::info!(
            session_id = %session.session_id(),
            round = started.round,
            animal,
            "Round started"
        );
        if let Err(e) = self
            .game_log
            .new_round(session.session_id(), started.round, animal)
            .await
        {
            tracing::warn!(session_id = %session.session_id(), error = %e, "Failed to log new round");
        }

        let key = if started.fresh_session {
            keys::INTRO
        } else {
            keys::NEW_ROUND
        };
        Ok(Reply::intro(self.speak(key, &Variables::new())))
    }

    /// Any turn that spends a question.
    async fn ask(&self, session: &mut GameSession, intent: TurnIntent, raw: &str) -> Reply {
        let was_over = session.round_over();

        let milestone = match session.consume_question() {
            QuestionBudget::RoundAlreadyOver => {
                return Reply::cued(
                    SoundCue::Idle,
                    self.speak(keys::ASK_PLAY_AGAIN, &Variables::new()),
                );
            }
            QuestionBudget::Exhausted(ended) => {
                let reply = self.closing_reply(session, ended);
                self.log_turn(session, raw, &reply.text, was_over).await;
                self.finish_reply(session, &reply).await;
                return reply;
            }
            QuestionBudget::Continue { milestone } => milestone
                .and_then(keys::milestone)
                .map(|key| self.speak(key, &Variables::new())),
        };

        let mut reply = match intent {
            TurnIntent::FindInfo { category, guess } => {
                self.find_info(session, category, guess.as_deref(), raw).await
            }
            TurnIntent::CompareSize {
                animal,
                compare_word,
            } => self.compare(session, animal.as_deref(), compare_word, raw).await,
            TurnIntent::Guess { animal } => self.guess(session, &animal),
            TurnIntent::Hint => self.hint(session),
            TurnIntent::QuestionsLeft => self.questions_left(session),
            TurnIntent::RemindMe => self.remind_me(session),
            TurnIntent::Misc { topic } => self.misc(session, topic, raw),
            TurnIntent::Combo { categories } => self.combo(session, &categories, raw).await,
            TurnIntent::Unknown
            | TurnIntent::Welcome
            | TurnIntent::NewRound
            | TurnIntent::NoInput
            | TurnIntent::Quit => self.knowledge_fallback(session, raw).await,
        };

        reply.append_milestone(milestone);
        self.log_turn(session, raw, &reply.text, was_over).await;
        self.finish_reply(session, &reply).await;
        reply
    }

    async fn quit(&self, session: &mut GameSession) -> Reply {
        if let Some(ended) = session.quit() {
            self.log_round_end(session.session_id(), &ended).await;
        }
        Reply::plain(GOODBYE_LINE).goodbye()
    }

    /// The platform heard nothing. Nothing is spent.
    fn no_input(&self, session: &GameSession) -> Reply {
        let text = self
            .idle_prompts(session)
            .into_iter()
            .next()
            .unwrap_or_else(|| self.speak(keys::ASK_PLAY_AGAIN, &Variables::new()));
        Reply::cued(SoundCue::Idle, text).without_milestone()
    }

    // =========================================================================
    // Questions
    // =========================================================================

    async fn find_info(
        &self,
        session: &mut GameSession,
        category: Category,
        guess: Option<&str>,
        raw: &str,
    ) -> Reply {
        let result = match (category.evaluator(), self.profile(session)) {
            (Evaluator::Guess(mode), Some(profile)) => profile
                .attribute(category)
                .map_or(AnswerResult::Unknown, |value| check_guess(mode, value, guess)),
            // Size questions arrive as their own intent
            (Evaluator::SizeComparison, _) | (_, None) => AnswerResult::Unknown,
        };
        if !result.is_answerable() {
            return self.knowledge_fallback(session, raw).await;
        }

        self.answer(session, category, guess.unwrap_or_default().trim(), result)
    }

    async fn compare(
        &self,
        session: &mut GameSession,
        challenger: Option<&str>,
        compare_word: CompareWord,
        raw: &str,
    ) -> Reply {
        let challenger = challenger.map(str::trim).filter(|name| !name.is_empty());
        let (Some(profile), Some(challenger)) = (self.profile(session), challenger) else {
            return self.knowledge_fallback(session, raw).await;
        };

        let query = SizeComparisonQuery {
            compare_word,
            challenger,
            target_name: profile.name(),
            target_mass_grams: profile.mass_grams(),
        };
        let result = compare_size(self.data.sizes(), &query);
        if !result.is_answerable() {
            return self.knowledge_fallback(session, raw).await;
        }

        self.answer(session, Category::CompareSize, &query.guess_text(), result)
    }

    /// Phrase a judged answer and remember it for reminders.
    fn answer(
        &self,
        session: &mut GameSession,
        category: Category,
        guess: &str,
        result: AnswerResult,
    ) -> Reply {
        let vars = Variables::new().with(TemplateVar::Guess, guess);
        let mut roll = dice(self.random.as_ref());
        let text = self
            .data
            .grammar()
            .answer(category, result, &vars, &mut roll)
            .unwrap_or_else(|e| {
                tracing::error!(category = %category, result = %result, error = %e, "Failed to phrase answer");
                FALLBACK_LINE.to_string()
            });

        session.record_answer(AnswerRecord {
            category,
            guess: guess.to_string(),
            result,
        });
        Reply::cued(SoundCue::for_result(result), text)
    }

    fn guess(&self, session: &mut GameSession, guess: &str) -> Reply {
        let animal_name = self
            .profile(session)
            .map(|profile| profile.name().to_string())
            .unwrap_or_default();

        match session.guess_animal(guess.trim(), &animal_name) {
            GuessOutcome::Correct(ended) => self.closing_reply(session, ended),
            GuessOutcome::Wrong => {
                let vars = Variables::new().with(TemplateVar::Guess, guess.trim());
                Reply::cued(
                    SoundCue::MissedGuess,
                    self.speak(keys::INCORRECT_GUESS, &vars),
                )
            }
        }
    }

    fn hint(&self, session: &mut GameSession) -> Reply {
        let text = match session.take_hint() {
            HintOutcome::Given => {
                let hint = self.pick_hint(session).unwrap_or_default();
                join_sentences(&self.speak(keys::GIVE_HINT, &Variables::new()), &hint)
            }
            HintOutcome::AlreadyGiven => self.speak(keys::NO_MORE_HINTS, &Variables::new()),
        };
        Reply::cued(SoundCue::Idle, text)
    }

    fn questions_left(&self, session: &mut GameSession) -> Reply {
        session.mark_neither();
        let vars = Variables::new().with(
            TemplateVar::Remaining,
            session.remaining_questions().to_string(),
        );
        Reply::cued(SoundCue::Idle, self.speak(keys::QUESTIONS_LEFT, &vars)).without_milestone()
    }

    fn remind_me(&self, session: &mut GameSession) -> Reply {
        session.mark_neither();
        let stuck = || {
            Reply::cued(SoundCue::Idle, self.speak(keys::MISC_STUCK, &Variables::new()))
                .without_milestone()
        };

        let mut roll = dice(self.random.as_ref());
        match reminder_lines(
            self.data.grammar(),
            session.answers_found(),
            session.category_history(),
            &mut roll,
        ) {
            Ok(Some([first, _, _])) => Reply::cued(SoundCue::Idle, first),
            Ok(None) => stuck(),
            Err(e) => {
                tracing::error!(session_id = %session.session_id(), error = %e, "Failed to build reminder");
                Reply::cued(SoundCue::Idle, FALLBACK_LINE)
            }
        }
    }

    fn misc(&self, session: &mut GameSession, topic: MiscTopic, raw: &str) -> Reply {
        session.mark_neither();
        let vars = Variables::new().with(TemplateVar::Guess, raw);
        Reply::cued(SoundCue::Idle, self.speak(topic.script_key(), &vars))
    }

    /// Several categories at once: ask for one at a time.
    async fn combo(&self, session: &mut GameSession, categories: &[Category], raw: &str) -> Reply {
        if categories.is_empty() {
            return self.knowledge_fallback(session, raw).await;
        }
        session.mark_neither();

        let mut names: Vec<&str> = Vec::new();
        for category in categories {
            let name = category.friendly_name().unwrap_or(category.as_str());
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Reply::cued(
            SoundCue::Idle,
            format!(
                "You asked, {raw}, try asking about my {} one at a time.",
                names.join(" or ")
            ),
        )
    }

    async fn knowledge_fallback(&self, session: &mut GameSession, raw: &str) -> Reply {
        session.mark_neither();
        let lexicon = self.data.lexicon();

        let text = match self.fallback.resolve(session, lexicon, raw).await {
            Some(answer) => {
                let vars = Variables::new()
                    .with(TemplateVar::Description, answer.description)
                    .with(TemplateVar::Question, raw);
                self.speak(answer.topic.script_key(), &vars)
            }
            None => {
                let dont_know = self.speak(keys::DONT_KNOWS, &Variables::new());
                let vars = Variables::new()
                    .with(TemplateVar::DontKnow, dont_know)
                    .with(TemplateVar::Input, raw);
                self.speak(lexicon.dont_know_script(raw), &vars)
            }
        };
        Reply::cued(SoundCue::Idle, text)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Win or lose line for a round that just ended.
    fn closing_reply(&self, session: &GameSession, ended: RoundEnded) -> Reply {
        let vars = Variables::new()
            .with(TemplateVar::Animal, self.animal_name(ended.animal))
            .with(
                TemplateVar::QuestionsAskedString,
                session.questions_asked_phrase(),
            );
        let (key, cue) = if ended.won {
            (keys::WIN, SoundCue::CorrectGuess)
        } else {
            (keys::LOSE, SoundCue::Lose)
        };
        Reply::closing_round(cue, self.speak(key, &vars), ended)
    }

    async fn finish_reply(&self, session: &GameSession, reply: &Reply) {
        if let Some(ended) = &reply.round_end {
            tracing::info!(
                session_id = %session.session_id(),
                round = ended.round,
                won = ended.won,
                questions_asked = ended.questions_asked,
                "Round ended"
            );
            self.log_round_end(session.session_id(), ended).await;
        }
    }

    async fn log_turn(&self, session: &GameSession, raw: &str, response: &str, round_over: bool) {
        let entry = QuestionLogEntry {
            session_id: session.session_id().clone(),
            round: session.round(),
            raw_input: raw.to_string(),
            response: response.to_string(),
            questions_asked: session.questions_asked(),
            round_over,
        };
        if let Err(e) = self.game_log.save(&entry).await {
            tracing::warn!(session_id = %entry.session_id, error = %e, "Failed to log turn");
        }
    }

    async fn log_round_end(&self, session_id: &SessionId, ended: &RoundEnded) {
        if let Err(e) = self
            .game_log
            .end_round(session_id, ended.round, ended.questions_asked, ended.won)
            .await
        {
            tracing::warn!(session_id = %session_id, error = %e, "Failed to log round end");
        }
    }

    async fn resolve_session(
        &self,
        session_id: &SessionId,
        state: Option<GameSession>,
    ) -> GameSession {
        match state {
            Some(state) if state.session_id() == session_id => return state,
            Some(_) => {
                tracing::warn!(session_id = %session_id, "Ignoring state from another session");
            }
            None => {}
        }

        match self.sessions.load(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => GameSession::new(session_id.clone()),
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to load session state");
                GameSession::new(session_id.clone())
            }
        }
    }

    fn idle_prompts(&self, session: &GameSession) -> Vec<String> {
        let mut roll = dice(self.random.as_ref());
        idle_prompts(session, self.data.grammar(), &mut roll).unwrap_or_else(|e| {
            tracing::error!(session_id = %session.session_id(), error = %e, "Failed to build idle prompts");
            Vec::new()
        })
    }

    fn render(&self, reply: &Reply) -> String {
        match reply.cue {
            Some(cue) if reply.intro => self.ssml.wrap_intro(cue, &reply.text),
            Some(cue) => self.ssml.wrap(cue, &reply.text),
            None => self.ssml.plain(&reply.text),
        }
    }

    fn speak(&self, key: &str, vars: &Variables) -> String {
        let mut roll = dice(self.random.as_ref());
        self.data
            .grammar()
            .script(key, vars, &mut roll)
            .unwrap_or_else(|e| {
                tracing::error!(key, error = %e, "Failed to expand script");
                FALLBACK_LINE.to_string()
            })
    }

    fn profile(&self, session: &GameSession) -> Option<&AnimalProfile> {
        session
            .animal()
            .and_then(|index| self.data.animals().get(index))
    }

    fn animal_name(&self, index: AnimalIndex) -> &str {
        self.data
            .animals()
            .get(index)
            .map(AnimalProfile::name)
            .unwrap_or_default()
    }

    fn pick_hint(&self, session: &GameSession) -> Option<String> {
        let hints: Vec<&String> = self
            .profile(session)?
            .hints()
            .iter()
            .filter(|hint| !hint.trim().is_empty())
            .collect();
        let mut roll = dice(self.random.as_ref());
        pick_index(&mut roll, hints.len())
            .and_then(|index| hints.get(index))
            .map(|hint| hint.to_string())
    }
}
