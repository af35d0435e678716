use std::sync::Arc;

use crate::auth::repo::{InMemoryUserRepo, UserRepository};
use crate::bias::random::{RandomSource, ThreadRandom};
use crate::bias::services::BiasAnalyzer;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub analyzer: BiasAnalyzer,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let users = Arc::new(InMemoryUserRepo::seeded()) as Arc<dyn UserRepository>;
        let rng = Arc::new(ThreadRandom) as Arc<dyn RandomSource>;
        Ok(Self::from_parts(config, users, rng))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepository>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            users,
            analyzer: BiasAnalyzer::new(rng),
        }
    }

    /// Seeded store, default config and a scripted random source.
    #[cfg(test)]
    pub fn fake(rng: crate::bias::random::fake::ScriptedRandom) -> Self {
        Self::from_parts(
            Arc::new(AppConfig::default()),
            Arc::new(InMemoryUserRepo::seeded()),
            Arc::new(rng),
        )
    }
}
