use crate::prelude::{Pace, PipelineResult};
use crate::store::KeyValueStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Key the signed-in athlete is kept under.
pub const USER_KEY: &str = "athleteHub_user";

const AUTH_ROUND_TRIP: Duration = Duration::from_millis(1000);
const DEFAULT_SPORT: &str = "Soccer";
const DEFAULT_TEAM: &str = "Local Team";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub sport: String,
    pub team: String,
}

/// Mock sign-in state, passed explicitly to whoever needs it.
///
/// Credentials are only checked for presence and the password is never stored.
pub struct SessionState<P: Pace> {
    store: Arc<dyn KeyValueStore>,
    pace: P,
    user: Option<User>,
}

impl<P: Pace> SessionState<P> {
    pub fn new(store: Arc<dyn KeyValueStore>, pace: P) -> Self {
        Self {
            store,
            pace,
            user: None,
        }
    }

    /// Restores the signed-in user from the store, if any.
    pub fn load(&mut self) -> PipelineResult<Option<&User>> {
        self.user = match self.store.get(USER_KEY)? {
            Some(raw) => Some(serde_json::from_str(&raw)?),
            None => None,
        };
        Ok(self.user.as_ref())
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> PipelineResult<bool> {
        self.pace.pause(AUTH_ROUND_TRIP).await;
        if email.is_empty() || password.is_empty() {
            return Ok(false);
        }
        self.persist(User {
            id: "1".into(),
            email: email.into(),
            sport: DEFAULT_SPORT.into(),
            team: DEFAULT_TEAM.into(),
        })?;
        Ok(true)
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        sport: &str,
        team: &str,
    ) -> PipelineResult<bool> {
        self.pace.pause(AUTH_ROUND_TRIP).await;
        if [email, password, sport, team].iter().any(|field| field.is_empty()) {
            return Ok(false);
        }
        self.persist(User {
            id: Utc::now().timestamp_millis().to_string(),
            email: email.into(),
            sport: sport.into(),
            team: team.into(),
        })?;
        Ok(true)
    }

    pub fn logout(&mut self) -> PipelineResult<()> {
        self.clear()
    }

    /// Teardown counterpart of [`SessionState::load`]: forgets and unpersists the user.
    pub fn clear(&mut self) -> PipelineResult<()> {
        self.user = None;
        self.store.remove(USER_KEY)
    }

    fn persist(&mut self, user: User) -> PipelineResult<()> {
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.user = Some(user);
        Ok(())
    }
}
