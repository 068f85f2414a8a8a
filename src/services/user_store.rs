//! Accounts for the management API
//!
//! Users live in the `user` namespace of the same [`KvStore`] as the links.
//! Only Root and Admin accounts may authenticate against `/api`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::config::AuthConfig;
use crate::errors::Result;
use crate::storage::KvStore;
use crate::storage::models::{USER_NAMESPACE, UserPermission, UserRecord, namespaced_key};
use crate::utils::password::{hash_password, is_argon2_hash, verify_password};

/// root 账号在未配置密码时使用的默认密码
pub const DEFAULT_ROOT_PASSWORD: &str = "DefaultRootPassW0rd!";

pub const ROOT_USERNAME: &str = "root";

/// Credential check used by the basic-auth middleware.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> bool;
}

pub struct UserStore {
    store: Arc<dyn KvStore>,
}

impl UserStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, username: &str) -> Result<Option<UserRecord>> {
        let key = namespaced_key(USER_NAMESPACE, username);
        match self.store.get(&key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Hash `password` and store the account, replacing any previous one.
    pub async fn upsert(
        &self,
        username: &str,
        password: &str,
        permission: UserPermission,
    ) -> Result<UserRecord> {
        let record = UserRecord {
            username: username.to_string(),
            password: hash_password(password)?,
            permission,
        };

        let key = namespaced_key(USER_NAMESPACE, username);
        self.store.set(&key, serde_json::to_value(&record)?).await?;
        Ok(record)
    }

    /// 启动时初始化 root / admin 账号
    ///
    /// root is rewritten on every start so a changed password takes effect.
    pub async fn seed_accounts(&self, auth: &AuthConfig) -> Result<()> {
        let root_password = match auth.root_password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => password,
            None => {
                warn!(
                    "Using '{}' as the root password. Set ROOT_PASSWORD (or auth.root_password) to change it.",
                    DEFAULT_ROOT_PASSWORD
                );
                DEFAULT_ROOT_PASSWORD
            }
        };
        self.upsert(ROOT_USERNAME, root_password, UserPermission::Root)
            .await?;
        info!("Root account ready");

        if let Some(admin_password) = auth.admin_password.as_deref().filter(|p| !p.is_empty()) {
            self.upsert(&auth.admin_username, admin_password, UserPermission::Admin)
                .await?;
            info!("Admin account '{}' ready", auth.admin_username);
        }

        Ok(())
    }
}

#[async_trait]
impl Authenticator for UserStore {
    async fn authenticate(&self, username: &str, password: &str) -> bool {
        let user = match self.get(username).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(e) => {
                error!("Failed to load user '{}': {}", username, e);
                return false;
            }
        };

        if !user.permission.can_manage_links() {
            return false;
        }

        if !is_argon2_hash(&user.password) {
            warn!("User '{}' has no usable password hash", username);
            return false;
        }

        // Argon2 是 CPU 密集操作，放到阻塞线程池，避免卡住 worker
        let password = password.to_string();
        let stored_hash = user.password;
        match tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await {
            Ok(Ok(valid)) => valid,
            Ok(Err(e)) => {
                error!("Password verification failed for '{}': {}", username, e);
                false
            }
            Err(e) => {
                error!("Password verification task for '{}' aborted: {}", username, e);
                false
            }
        }
    }
}
