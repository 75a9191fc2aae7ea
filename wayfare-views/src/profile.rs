use crate::error::{ViewError, ViewResult};
use crate::navigation::Navigator;
use crate::session::sign_out;
use std::sync::Arc;
use tracing::{info, warn};
use wayfare_core::api::{ApiError, FileUpload, ProfileApi};
use wayfare_core::profile::Profile;
use wayfare_core::Message;
use wayfare_store::{SessionStore, TokenSlot};

/// Profile page. Every successful call replaces the profile in the store.
pub struct ProfileView {
    api: Arc<dyn ProfileApi>,
    store: Arc<SessionStore>,
    token: Arc<TokenSlot>,
    navigator: Arc<dyn Navigator>,
    loading: bool,
}

impl ProfileView {
    pub fn new(
        api: Arc<dyn ProfileApi>,
        store: Arc<SessionStore>,
        token: Arc<TokenSlot>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            store,
            token,
            navigator,
            loading: false,
        }
    }

    pub fn profile(&self) -> Option<Profile> {
        self.store.profile()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A 401 means the token is dead: sign out and go to login.
    pub async fn load(&mut self) -> ViewResult<Profile> {
        if !self.token.is_present() {
            return Err(ViewError::LoginRequired);
        }
        self.loading = true;
        let result = self.api.fetch_profile().await;
        self.loading = false;

        match result {
            Ok(profile) => {
                self.store.set_profile(Some(profile.clone()));
                Ok(profile)
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Profile fetch rejected, signing out");
                sign_out(&self.store, &self.token, self.navigator.as_ref());
                Err(ViewError::LoginRequired)
            }
            Err(e) => Err(ViewError::api(e, Message::Generic)),
        }
    }

    pub async fn rename(&mut self, username: &str) -> ViewResult<Profile> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ViewError::Invalid(Message::ProfileUpdateFailed));
        }
        let result = self.api.update_username(username).await;
        self.adopt(result, Message::ProfileUpdateFailed)
    }

    pub async fn upload_avatar(&mut self, file: Option<FileUpload>) -> ViewResult<Profile> {
        let file = file.ok_or(ViewError::Invalid(Message::AvatarMissing))?;
        self.loading = true;
        let result = self.api.upload_avatar(file).await;
        self.loading = false;
        self.adopt(result, Message::AvatarUploadFailed)
    }

    fn adopt(&self, result: Result<Profile, ApiError>, fallback: Message) -> ViewResult<Profile> {
        let profile = result.map_err(|e| ViewError::api(e, fallback))?;
        info!("Profile {} updated", profile.id);
        self.store.set_profile(Some(profile.clone()));
        Ok(profile)
    }
}
