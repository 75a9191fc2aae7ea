/// Two-phase optimistic write: `apply` a tentative value, then resolve with
/// exactly one of `commit` (server result wins) or `rollback` (prior value
/// restored). Consuming `self` on resolution makes double resolution a
/// compile error.
#[must_use = "an optimistic update must be committed or rolled back"]
#[derive(Debug)]
pub struct Optimistic<T> {
    prior: T,
    tentative: T,
}

impl<T: Clone> Optimistic<T> {
    /// Start an update from a snapshot the caller will publish itself.
    pub fn begin(prior: T, tentative: T) -> Self {
        Self { prior, tentative }
    }

    /// Write `tentative` into `slot` and remember what was there.
    pub fn apply(slot: &mut T, tentative: T) -> Self {
        let prior = std::mem::replace(slot, tentative.clone());
        Self { prior, tentative }
    }

    pub fn prior(&self) -> &T {
        &self.prior
    }

    pub fn tentative(&self) -> &T {
        &self.tentative
    }

    /// The server answered; its value replaces the tentative one.
    pub fn commit(self, confirmed: T) -> T {
        confirmed
    }

    pub fn commit_into(self, slot: &mut T, confirmed: T) {
        *slot = confirmed;
    }

    /// The request failed; hand back the pre-update value.
    pub fn rollback(self) -> T {
        self.prior
    }

    pub fn rollback_into(self, slot: &mut T) {
        *slot = self.prior;
    }
}
