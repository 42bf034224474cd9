use std::sync::Arc;

use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::application::ports::token_codec::TokenCodec;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::crypto::JwtTokenCodec;
use crate::infrastructure::memory::{MemoryFishnikRepository, MemoryUserRepository};

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    fishnik_repo: Arc<dyn FishnikRepository>,
    token_codec: Arc<dyn TokenCodec>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        fishnik_repo: Arc<dyn FishnikRepository>,
        token_codec: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            user_repo,
            fishnik_repo,
            token_codec,
        }
    }

    /// Process-local stores with a JWT codec keyed by `jwt_secret`.
    pub fn in_memory(jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryFishnikRepository::new()),
            Arc::new(JwtTokenCodec::new(jwt_secret)),
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn fishnik_repo(&self) -> Arc<dyn FishnikRepository> {
        self.services.fishnik_repo.clone()
    }

    pub fn token_codec(&self) -> Arc<dyn TokenCodec> {
        self.services.token_codec.clone()
    }
}
