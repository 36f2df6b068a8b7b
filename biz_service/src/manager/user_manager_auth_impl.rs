use crate::entitys::user_entity::UserInfo;
use crate::manager::user_manager_auth::{AccountError, AccountResult, AuthUser, LoginToken, UserManagerAuth, UserManagerAuthOpt};
use async_trait::async_trait;
use common::errors::RepoError;
use common::util::common_utils::{build_id, build_md5_with_key};
use common::util::date_util::now;
use common::util::validate::validate_username;
use log::info;

impl UserManagerAuth {
    fn digest(&self, salt: &str, password: &str) -> String {
        build_md5_with_key(&format!("{}:{}", salt, password), &self.md5_key)
    }

    async fn issue_token(&self, user: &UserInfo) -> AccountResult<LoginToken> {
        let token = build_id();
        self.sessions.put(&token, &user.id).await?;
        Ok(LoginToken { user_id: user.id.clone(), token })
    }
}

#[async_trait]
impl UserManagerAuthOpt for UserManagerAuth {
    async fn register(&self, username: &str, password: &str) -> AccountResult<LoginToken> {
        validate_username(username).map_err(|e| AccountError::Validation(e.code.to_string()))?;
        if password.is_empty() {
            return Err(AccountError::Validation("password.empty".to_string()));
        }

        let salt = build_id();
        let user = UserInfo {
            id: build_id(),
            username: username.to_string(),
            password: self.digest(&salt, password),
            salt,
            is_active: true,
            created_at: now(),
        };
        match self.users.insert_user(&user).await {
            Ok(()) => {}
            Err(RepoError::Duplicate) => return Err(AccountError::UsernameTaken),
            Err(e) => return Err(e.into()),
        }
        info!("user registered: {} ({})", user.username, user.id);
        self.issue_token(&user).await
    }

    async fn login(&self, username: &str, password: &str) -> AccountResult<LoginToken> {
        let user = self.users.find_by_name(username).await?.ok_or(AccountError::InvalidCredentials)?;
        if !user.is_active || user.password != self.digest(&user.salt, password) {
            return Err(AccountError::InvalidCredentials);
        }
        info!("user login: {}", user.id);
        self.issue_token(&user).await
    }

    async fn logout(&self, token: &str) -> AccountResult<()> {
        self.sessions.remove(token).await?;
        Ok(())
    }

    async fn authenticate(&self, token: &str) -> AccountResult<AuthUser> {
        let user_id = self.sessions.get(token).await?.ok_or(AccountError::Unauthenticated)?;
        let user = self.users.find_by_id(&user_id).await?.ok_or(AccountError::Unauthenticated)?;
        if !user.is_active {
            return Err(AccountError::Unauthenticated);
        }
        Ok(AuthUser { id: user.id, username: user.username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biz_service::session_service::LocalSessionService;
    use crate::store::memory_store::MemoryStore;
    use crate::store::{SessionStore, UserStore};
    use std::sync::Arc;

    fn manager() -> (UserManagerAuth, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let users: Arc<dyn UserStore> = store.clone();
        let sessions: Arc<dyn SessionStore> = Arc::new(LocalSessionService::new(60));
        (UserManagerAuth::new(users, sessions, "test-key"), store)
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let (auth, store) = manager();
        let login = auth.register("alice", "secret").await.unwrap();
        let user = auth.authenticate(&login.token).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.id, login.user_id);

        let stored = store.find_by_name("alice").await.unwrap().unwrap();
        assert_ne!(stored.password, "secret");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (auth, _) = manager();
        auth.register("alice", "secret").await.unwrap();
        assert!(matches!(auth.register("alice", "other").await, Err(AccountError::UsernameTaken)));
        // 用户名区分大小写
        auth.register("ALICE", "other").await.unwrap();
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let (auth, _) = manager();
        assert!(matches!(auth.register("", "secret").await, Err(AccountError::Validation(_))));
        assert!(matches!(auth.register("bob", "").await, Err(AccountError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let (auth, _) = manager();
        auth.register("alice", "secret").await.unwrap();
        assert!(matches!(auth.login("alice", "wrong").await, Err(AccountError::InvalidCredentials)));
        assert!(matches!(auth.login("nobody", "secret").await, Err(AccountError::InvalidCredentials)));
        let login = auth.login("alice", "secret").await.unwrap();
        assert!(auth.authenticate(&login.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_login() {
        let (auth, store) = manager();
        let salt = "s".to_string();
        let user = UserInfo {
            id: "u1".to_string(),
            username: "frozen".to_string(),
            password: auth.digest(&salt, "secret"),
            salt,
            is_active: false,
            created_at: 0,
        };
        store.insert_user(&user).await.unwrap();
        assert!(matches!(auth.login("frozen", "secret").await, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let (auth, _) = manager();
        let login = auth.register("alice", "secret").await.unwrap();
        auth.logout(&login.token).await.unwrap();
        assert!(matches!(auth.authenticate(&login.token).await, Err(AccountError::Unauthenticated)));
        // 重复注销不报错
        auth.logout(&login.token).await.unwrap();
        assert!(matches!(auth.authenticate("bogus").await, Err(AccountError::Unauthenticated)));
    }
}
