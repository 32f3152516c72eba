use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub public_rps: u32,
    pub session_ttl_minutes: i64,
    pub quiz: QuizSettings,
}

/// Tunables for question building, weak-word selection and history paging.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    pub default_question_count: usize,
    pub max_question_count: usize,
    pub distractor_sample_size: i64,
    pub weak_word_min_attempts: i32,
    pub weak_word_limit: i64,
    pub practice_word_limit: i64,
    pub recent_results_limit: i64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            default_question_count: 10,
            max_question_count: 50,
            distractor_sample_size: 20,
            weak_word_min_attempts: 2,
            weak_word_limit: 15,
            practice_word_limit: 10,
            recent_results_limit: 20,
        }
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = QuizSettings::default();
        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 50)?,
            session_ttl_minutes: get_env_parse_or("SESSION_TTL_MINUTES", 60)?,
            quiz: QuizSettings {
                default_question_count: get_env_parse_or(
                    "DEFAULT_QUESTION_COUNT",
                    defaults.default_question_count,
                )?,
                max_question_count: get_env_parse_or(
                    "MAX_QUESTION_COUNT",
                    defaults.max_question_count,
                )?,
                distractor_sample_size: get_env_parse_or(
                    "DISTRACTOR_SAMPLE_SIZE",
                    defaults.distractor_sample_size,
                )?,
                weak_word_min_attempts: get_env_parse_or(
                    "WEAK_WORD_MIN_ATTEMPTS",
                    defaults.weak_word_min_attempts,
                )?,
                weak_word_limit: get_env_parse_or("WEAK_WORD_LIMIT", defaults.weak_word_limit)?,
                practice_word_limit: get_env_parse_or(
                    "PRACTICE_WORD_LIMIT",
                    defaults.practice_word_limit,
                )?,
                recent_results_limit: get_env_parse_or(
                    "RECENT_RESULTS_LIMIT",
                    defaults.recent_results_limit,
                )?,
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
