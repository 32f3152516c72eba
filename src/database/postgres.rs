use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::repository::{ResultStore, StatsStore, WordRepository};
use crate::error::Result;
use crate::models::quiz_answer::{AnswerWithWord, NewQuizAnswer};
use crate::models::quiz_result::{NewQuizResult, QuizResult};
use crate::models::word::{Word, WordFilter};
use crate::models::word_stats::{WeakWord, WordStats};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WordRepository for PgStore {
    async fn fetch_words(&self, filter: &WordFilter) -> Result<Vec<Word>> {
        let words = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, english, korean, part_of_speech, difficulty, is_active, created_at
            FROM words
            WHERE ($1 = FALSE OR is_active = TRUE)
              AND ($2::uuid[] IS NULL OR id = ANY($2))
              AND NOT (id = ANY($3::uuid[]))
            ORDER BY CASE WHEN $4 THEN random() ELSE 0.0 END, english
            LIMIT $5
            "#,
        )
        .bind(filter.active_only)
        .bind(filter.include_ids.clone())
        .bind(filter.exclude_ids.clone())
        .bind(filter.random_order)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(words)
    }
}

#[async_trait]
impl ResultStore for PgStore {
    async fn insert_result(&self, result: NewQuizResult) -> Result<QuizResult> {
        let row = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO quiz_results (score, total_questions, completed_at)
            VALUES ($1, $2, $3)
            RETURNING id, score, total_questions, completed_at
            "#,
        )
        .bind(result.score)
        .bind(result.total_questions)
        .bind(result.completed_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_answers(&self, answers: Vec<NewQuizAnswer>) -> Result<u64> {
        if answers.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO quiz_answers (quiz_result_id, word_id, user_answer, correct_answer, is_correct, answered_at) ",
        );
        qb.push_values(answers, |mut row, answer| {
            row.push_bind(answer.quiz_result_id)
                .push_bind(answer.word_id)
                .push_bind(answer.user_answer)
                .push_bind(answer.correct_answer)
                .push_bind(answer.is_correct)
                .push_bind(answer.answered_at);
        });
        let done = qb.build().execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    async fn recent_results(&self, limit: i64) -> Result<Vec<QuizResult>> {
        let rows = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, score, total_questions, completed_at
            FROM quiz_results
            ORDER BY completed_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_result(&self, id: Uuid) -> Result<Option<QuizResult>> {
        let row = sqlx::query_as::<_, QuizResult>(
            r#"SELECT id, score, total_questions, completed_at FROM quiz_results WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn answers_for_result(&self, result_id: Uuid) -> Result<Vec<AnswerWithWord>> {
        let rows = sqlx::query_as::<_, AnswerWithWord>(
            r#"
            SELECT a.id, a.quiz_result_id, a.word_id, a.user_answer, a.correct_answer,
                   a.is_correct, a.answered_at,
                   w.english, w.korean, w.part_of_speech
            FROM quiz_answers a
            JOIN words w ON w.id = a.word_id
            WHERE a.quiz_result_id = $1
            ORDER BY a.answered_at, a.seq
            "#,
        )
        .bind(result_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl StatsStore for PgStore {
    async fn find_by_word(&self, word_id: Uuid) -> Result<Option<WordStats>> {
        let row = sqlx::query_as::<_, WordStats>(
            r#"
            SELECT id, word_id, total_attempts, correct_attempts, accuracy_rate, last_updated
            FROM word_stats
            WHERE word_id = $1
            "#,
        )
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn record_attempt(&self, word_id: Uuid, is_correct: bool) -> Result<WordStats> {
        // Counters and rate are derived from the stored row inside one
        // statement, so concurrent sessions cannot overwrite each other.
        let row = sqlx::query_as::<_, WordStats>(
            r#"
            INSERT INTO word_stats (word_id, total_attempts, correct_attempts, accuracy_rate, last_updated)
            VALUES ($1, 1, $2, ($2 * 100)::float8, NOW())
            ON CONFLICT (word_id) DO UPDATE SET
                total_attempts = word_stats.total_attempts + 1,
                correct_attempts = word_stats.correct_attempts + EXCLUDED.correct_attempts,
                accuracy_rate = ((word_stats.correct_attempts + EXCLUDED.correct_attempts) * 100)::float8
                    / (word_stats.total_attempts + 1),
                last_updated = NOW()
            RETURNING id, word_id, total_attempts, correct_attempts, accuracy_rate, last_updated
            "#,
        )
        .bind(word_id)
        .bind(i32::from(is_correct))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn weakest(&self, min_attempts: i32, limit: i64) -> Result<Vec<WeakWord>> {
        let rows = sqlx::query_as::<_, WeakWord>(
            r#"
            SELECT s.id, s.word_id, s.total_attempts, s.correct_attempts, s.accuracy_rate,
                   s.last_updated, w.english, w.korean, w.part_of_speech
            FROM word_stats s
            JOIN words w ON w.id = s.word_id
            WHERE s.total_attempts >= $1
            ORDER BY s.accuracy_rate ASC, s.total_attempts DESC
            LIMIT $2
            "#,
        )
        .bind(min_attempts)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
