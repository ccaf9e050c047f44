use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_guesses: u32,
    pub database_url: String,
    pub candidate_words_file: String,
    pub admin_code_file: String,
    pub dictionary_api_url: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("Invalid PORT"),
            max_guesses: env::var("MAX_GUESSES")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .expect("Invalid MAX_GUESSES"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://wordly.db?mode=rwc".to_string()),
            candidate_words_file: env::var("CANDIDATE_WORDS_FILE")
                .unwrap_or_else(|_| "./candidate_words.txt".to_string()),
            admin_code_file: env::var("ADMIN_CODE_FILE")
                .unwrap_or_else(|_| "./admin_code.txt".to_string()),
            dictionary_api_url: env::var("DICTIONARY_API_URL").unwrap_or_else(|_| {
                "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
