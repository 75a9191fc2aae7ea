use crate::error::{ViewError, ViewResult};
use crate::navigation::{Navigator, Route};
use std::sync::Arc;
use tracing::{info, warn};
use wayfare_core::api::{AuthApi, BookingApi, ProfileApi};
use wayfare_core::profile::{LoginRequest, RegisterRequest, Role};
use wayfare_core::Message;
use wayfare_shared::Masked;
use wayfare_store::{SessionStore, TokenSlot};

/// Drop the token and everything cached for the user, then go to login.
pub fn sign_out(store: &SessionStore, token: &TokenSlot, navigator: &dyn Navigator) {
    token.clear();
    store.clear();
    navigator.navigate(Route::Login);
}

pub struct LoginView {
    auth: Arc<dyn AuthApi>,
    profiles: Arc<dyn ProfileApi>,
    bookings: Arc<dyn BookingApi>,
    store: Arc<SessionStore>,
    token: Arc<TokenSlot>,
    navigator: Arc<dyn Navigator>,
    pub email: String,
    pub password: Masked<String>,
    loading: bool,
}

impl LoginView {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        profiles: Arc<dyn ProfileApi>,
        bookings: Arc<dyn BookingApi>,
        store: Arc<SessionStore>,
        token: Arc<TokenSlot>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            profiles,
            bookings,
            store,
            token,
            navigator,
            email: String::new(),
            password: Masked::from(""),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Operators land on the dashboard, everyone else on the hotel list.
    pub async fn submit(&mut self) -> ViewResult<Role> {
        let request = LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        self.loading = true;
        let result = self.auth.login(&request).await;
        self.loading = false;

        let response = result.map_err(|e| {
            warn!("Login failed for {}: {}", request.email, e);
            ViewError::api(e, Message::LoginFailed)
        })?;
        self.token.set(response.token);

        // The profile carries the favorite list and the bookings feed the
        // duplicate check; neither failing undoes the login
        let (profile, bookings) = tokio::join!(self.profiles.fetch_profile(), self.bookings.my_bookings());
        match profile {
            Ok(profile) => self.store.set_profile(Some(profile)),
            Err(e) => warn!("Signed in but profile fetch failed: {}", e),
        }
        match bookings {
            Ok(bookings) => self.store.set_bookings(bookings),
            Err(e) => warn!("Signed in but bookings fetch failed: {}", e),
        }

        info!("Signed in as {} ({:?})", request.email, response.role);
        let target = if response.role == Role::Operator { Route::Dashboard } else { Route::Hotels };
        self.navigator.navigate(target);
        Ok(response.role)
    }

    pub fn sign_out(&self) {
        sign_out(&self.store, &self.token, self.navigator.as_ref());
    }
}

pub struct RegisterView {
    auth: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    pub email: String,
    pub password: Masked<String>,
    pub username: String,
    /// Agency code for operator accounts; blank for regular users.
    pub sign_up_code: String,
    loading: bool,
}

impl RegisterView {
    pub fn new(auth: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            email: String::new(),
            password: Masked::from(""),
            username: String::new(),
            sign_up_code: String::new(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn submit(&mut self) -> ViewResult<()> {
        let non_blank = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        let request = RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            username: non_blank(&self.username),
            sign_up_code: non_blank(&self.sign_up_code),
        };

        self.loading = true;
        let result = self.auth.register(&request).await;
        self.loading = false;

        result.map_err(|e| ViewError::api(e, Message::RegisterFailed))?;
        info!("Registered {}", request.email);
        self.navigator.navigate(Route::Login);
        Ok(())
    }
}
