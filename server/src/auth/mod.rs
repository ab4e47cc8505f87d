mod crypto;
mod extractor;

pub use crypto::{generate_token, hash_password, hash_token, verify_password};
pub use extractor::{AuthError, AuthUser, MaybeAuthUser};

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::store::{Store, StoreResult};

/// How long a bearer token stays valid.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Start an auth session for `user_id` and return its bearer token.
pub fn create_session(store: &dyn Store, user_id: Uuid) -> StoreResult<String> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
    store.create_auth_session(user_id, &hash_token(&token), expires_at)?;
    Ok(token)
}
