//! SQLite-backed game log: one row per round, one per answered turn.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use mystery_animal_domain::SessionId;

use crate::infrastructure::ports::{
    ClockPort, GameLogRepo, QuestionLogEntry, RandomPort, RepoError,
};

pub struct SqliteGameLog {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SqliteGameLog {
    pub async fn new(
        db_path: &str,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("game_log", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rounds (
                session_id TEXT NOT NULL,
                round INTEGER NOT NULL,
                animal TEXT NOT NULL,
                questions_asked INTEGER,
                won INTEGER,
                started_at TEXT NOT NULL,
                ended_at TEXT,
                PRIMARY KEY (session_id, round)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("game_log", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                round INTEGER NOT NULL,
                raw_input TEXT NOT NULL,
                response TEXT NOT NULL,
                questions_asked INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("game_log", e))?;

        Ok(Self {
            pool,
            clock,
            random,
        })
    }
}

#[async_trait]
impl GameLogRepo for SqliteGameLog {
    async fn new_round(
        &self,
        session_id: &SessionId,
        round: u32,
        animal: &str,
    ) -> Result<(), RepoError> {
        let now = self.clock.now().to_rfc3339();

        // A restarted session reuses round numbers
        sqlx::query(
            r#"
            INSERT INTO rounds (session_id, round, animal, started_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(session_id, round) DO UPDATE SET
                animal = excluded.animal,
                questions_asked = NULL,
                won = NULL,
                started_at = excluded.started_at,
                ended_at = NULL
            "#,
        )
        .bind(session_id.as_str())
        .bind(i64::from(round))
        .bind(animal)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("new_round", e))?;

        Ok(())
    }

    async fn save(&self, entry: &QuestionLogEntry) -> Result<(), RepoError> {
        if entry.round_over {
            return Ok(());
        }

        let id = self.random.gen_uuid().to_string();
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO questions (id, session_id, round, raw_input, response, questions_asked, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(entry.session_id.as_str())
        .bind(i64::from(entry.round))
        .bind(&entry.raw_input)
        .bind(&entry.response)
        .bind(i64::from(entry.questions_asked))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_question", e))?;

        Ok(())
    }

    async fn end_round(
        &self,
        session_id: &SessionId,
        round: u32,
        questions_asked: u32,
        won: bool,
    ) -> Result<(), RepoError> {
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            UPDATE rounds
            SET questions_asked = ?, won = ?, ended_at = ?
            WHERE session_id = ? AND round = ?
            "#,
        )
        .bind(i64::from(questions_asked))
        .bind(won)
        .bind(now)
        .bind(session_id.as_str())
        .bind(i64::from(round))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("end_round", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use chrono::{TimeZone, Utc};
    use sqlx::Row;

    async fn open(dir: &tempfile::TempDir) -> SqliteGameLog {
        let db_path = dir.path().join("game_log.db");
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        ));
        SqliteGameLog::new(
            db_path.to_str().expect("utf-8 path"),
            clock,
            Arc::new(FixedRandom(0)),
        )
        .await
        .expect("open game log")
    }

    fn entry(round_over: bool) -> QuestionLogEntry {
        QuestionLogEntry {
            session_id: SessionId::new("session-1"),
            round: 1,
            raw_input: "do you eat leaves".to_string(),
            response: "Yes, I do eat leaves".to_string(),
            questions_asked: 3,
            round_over,
        }
    }

    #[tokio::test]
    async fn records_a_round_from_start_to_end() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let log = open(&temp_dir).await;
        let session = SessionId::new("session-1");

        log.new_round(&session, 1, "giraffe").await.unwrap();
        log.save(&entry(false)).await.unwrap();
        log.end_round(&session, 1, 7, true).await.unwrap();

        let row = sqlx::query("SELECT animal, questions_asked, won FROM rounds WHERE session_id = ?")
            .bind("session-1")
            .fetch_one(&log.pool)
            .await
            .unwrap();
        assert_eq!(row.get::<String, _>("animal"), "giraffe");
        assert_eq!(row.get::<i64, _>("questions_asked"), 7);
        assert!(row.get::<bool, _>("won"));

        let questions: i64 = sqlx::query("SELECT COUNT(*) AS n FROM questions")
            .fetch_one(&log.pool)
            .await
            .unwrap()
            .get("n");
        assert_eq!(questions, 1);
    }

    #[tokio::test]
    async fn save_is_a_no_op_once_the_round_is_over() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let log = open(&temp_dir).await;

        log.save(&entry(true)).await.unwrap();

        let questions: i64 = sqlx::query("SELECT COUNT(*) AS n FROM questions")
            .fetch_one(&log.pool)
            .await
            .unwrap()
            .get("n");
        assert_eq!(questions, 0);
    }

    #[tokio::test]
    async fn restarting_a_session_overwrites_the_round_row() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let log = open(&temp_dir).await;
        let session = SessionId::new("session-1");

        log.new_round(&session, 1, "giraffe").await.unwrap();
        log.end_round(&session, 1, 20, false).await.unwrap();
        log.new_round(&session, 1, "penguin").await.unwrap();

        let row = sqlx::query("SELECT animal, won FROM rounds WHERE session_id = ? AND round = 1")
            .bind("session-1")
            .fetch_one(&log.pool)
            .await
            .unwrap();
        assert_eq!(row.get::<String, _>("animal"), "penguin");
        assert_eq!(row.get::<Option<bool>, _>("won"), None);
    }
}
