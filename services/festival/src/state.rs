use std::time::Duration;

use sea_orm::DatabaseConnection;

use lumiere_auth_types::identity::JwtSecretProvider;
use lumiere_core::cache::TtlCache;

use crate::domain::types::Event;
use crate::infra::db::{
    DbDiscountRepository, DbEventRepository, DbSubmissionRepository, DbTeamRepository,
    DbUserRepository,
};

/// How long a public event listing stays cached, keyed by category filter.
pub const EVENT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub events_cache: TtlCache<String, Vec<Event>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, jwt_secret: String, cookie_domain: String) -> Self {
        Self {
            db,
            jwt_secret,
            cookie_domain,
            events_cache: TtlCache::new(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn event_repo(&self) -> DbEventRepository {
        DbEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn submission_repo(&self) -> DbSubmissionRepository {
        DbSubmissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn team_repo(&self) -> DbTeamRepository {
        DbTeamRepository {
            db: self.db.clone(),
        }
    }

    pub fn discount_repo(&self) -> DbDiscountRepository {
        DbDiscountRepository {
            db: self.db.clone(),
        }
    }
}

impl JwtSecretProvider for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
