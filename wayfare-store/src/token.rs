use tokio::sync::watch;
use wayfare_shared::Masked;

/// In-memory home of the bearer token. Never written to disk.
pub struct TokenSlot {
    token: watch::Sender<Option<Masked<String>>>,
}

impl TokenSlot {
    pub fn new() -> Self {
        let (token, _) = watch::channel(None);
        Self { token }
    }

    pub fn set(&self, token: Masked<String>) {
        self.token.send_replace(Some(token));
    }

    pub fn clear(&self) {
        self.token.send_replace(None);
    }

    pub fn get(&self) -> Option<Masked<String>> {
        self.token.borrow().clone()
    }

    pub fn is_present(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// `Authorization` header value, if signed in.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .borrow()
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose()))
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Masked<String>>> {
        self.token.subscribe()
    }
}

impl Default for TokenSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let slot = TokenSlot::new();
        assert!(slot.bearer().is_none());
        slot.set(Masked::from("abc"));
        assert_eq!(slot.bearer().as_deref(), Some("Bearer abc"));
        slot.clear();
        assert!(!slot.is_present());
    }
}
