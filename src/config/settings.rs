use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub base_url: String,
    pub games: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    pub webdriver_url: String,
    pub wait_timeout_secs: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://olympics.com".to_string(),
            games: "tokyo-2020".to_string(),
            user_agent: "OlympicTies/0.1",
            timeout_secs: 30,
            rate_limit_ms: 500,
            webdriver_url: "http://localhost:9515".to_string(),
            wait_timeout_secs: 25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub schedule_path: PathBuf,
    pub results_path: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            schedule_path: PathBuf::from("schedule_cache.json"),
            results_path: PathBuf::from("results_cache.json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub output_path: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("README.md"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub cache: CacheSettings,
    pub report: ReportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            cache: CacheSettings::default(),
            report: ReportSettings::default(),
        }
    }

    pub fn with_games(mut self, games: Option<String>) -> Self {
        if let Some(games) = games {
            self.scraper.games = games;
        }
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        if let Some(path) = output {
            self.report.output_path = path;
        }
        self
    }

    pub fn with_webdriver_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.scraper.webdriver_url = url;
        }
        self
    }
}
