//! # Session Gate
//!
//! Derives which navigation affordances a visitor sees from two persisted
//! flags. This is presentation gating only; the identity provider enforces
//! real access control.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

use crate::error::{AppError, Result};
use crate::traits::SessionStore;

pub const SIGNED_IN_KEY: &str = "isUserSignedIn";
pub const PREFERENCES_SET_KEY: &str = "userProfilePreferencesSet";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_EMAIL_KEY: &str = "userEmail";
pub const USER_PROFILE_DATA_KEY: &str = "userProfileData";

/// Everything sign-out removes.
pub const SESSION_KEYS: [&str; 5] = [
    SIGNED_IN_KEY,
    PREFERENCES_SET_KEY,
    USER_NAME_KEY,
    USER_EMAIL_KEY,
    USER_PROFILE_DATA_KEY,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFlags {
    pub signed_in: bool,
    pub preferences_set: bool,
}

impl SessionFlags {
    /// A flag is set only when stored as the exact string "true".
    pub fn read(store: &dyn SessionStore) -> Self {
        let is_true = |key| store.get(key).as_deref() == Some("true");
        Self {
            signed_in: is_true(SIGNED_IN_KEY),
            preferences_set: is_true(PREFERENCES_SET_KEY),
        }
    }

    pub fn can_access_main_features(self) -> bool {
        self.signed_in && self.preferences_set
    }

    pub fn state(self) -> SessionState {
        match (self.signed_in, self.preferences_set) {
            (false, _) => SessionState::Anonymous,
            (true, false) => SessionState::Onboarding,
            (true, true) => SessionState::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Anonymous,
    /// Signed in, profile preferences not yet filled in
    Onboarding,
    Active,
}

impl SessionState {
    pub fn nav_items(self) -> &'static [NavItem] {
        use NavItem::*;
        match self {
            Self::Anonymous => &[SignIn, SignUp],
            Self::Onboarding => &[CompleteProfile, SignOut],
            Self::Active => &[
                Discover,
                Profile,
                Groups,
                CreateTrip,
                Messages,
                Notifications,
                SignOut,
            ],
        }
    }

    /// The "Complete Your Profile!" banner on the discover surface.
    pub fn shows_profile_banner(self) -> bool {
        self == Self::Onboarding
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NavItem {
    Discover,
    Profile,
    CompleteProfile,
    Groups,
    CreateTrip,
    Messages,
    Notifications,
    SignIn,
    SignUp,
    SignOut,
}

impl NavItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Discover => "Discover",
            Self::Profile => "Profile",
            Self::CompleteProfile => "Complete Profile",
            Self::Groups => "Groups",
            Self::CreateTrip => "Create Trip",
            Self::Messages => "Messages",
            Self::Notifications => "Notifications",
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
            Self::SignOut => "Sign Out",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            Self::Discover => "/discover",
            Self::Profile | Self::CompleteProfile => "/profile",
            Self::Groups => "/groups",
            Self::CreateTrip => "/create-trip",
            Self::Messages => "/messages",
            Self::Notifications => "/notifications",
            Self::SignIn => "/auth/sign-in",
            Self::SignUp => "/auth/sign-up",
            Self::SignOut => "/sign-out",
        }
    }

    /// Sign-out mutates state, so it is submitted rather than followed.
    pub fn is_action(self) -> bool {
        self == Self::SignOut
    }
}

/// Reads, watches, and clears the session flags held by a `SessionStore`.
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn flags(&self) -> SessionFlags {
        SessionFlags::read(self.store.as_ref())
    }

    pub fn state(&self) -> SessionState {
        self.flags().state()
    }

    /// Picks up changes made elsewhere, e.g. when a view regains focus.
    pub fn refresh(&self) -> Result<SessionState> {
        self.store
            .reload()
            .map_err(|e| AppError::Internal(format!("session reload failed: {e:#}")))?;
        Ok(self.state())
    }

    /// Removes every session key in one write.
    pub fn sign_out(&self) -> Result<SessionState> {
        self.store
            .remove(&SESSION_KEYS)
            .map_err(|e| AppError::Internal(format!("sign-out failed: {e:#}")))?;
        log::info!("Session cleared");
        Ok(SessionState::Anonymous)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// Waits for the next store change and returns the state it produced.
    /// `None` once the store is gone.
    pub async fn next_change(&self, rx: &mut watch::Receiver<u64>) -> Option<SessionState> {
        rx.changed().await.ok()?;
        Some(self.state())
    }
}

/// Process-local `SessionStore`; nothing survives a restart.
pub struct InMemorySessionStore {
    values: RwLock<HashMap<String, String>>,
    version: watch::Sender<u64>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            version: watch::channel(0).0,
        }
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .write()
            .map_err(|_| anyhow::anyhow!("session map poisoned"))?
            .insert(key.to_string(), value.to_string());
        self.version.send_modify(|v| *v += 1);
        Ok(())
    }

    fn remove(&self, keys: &[&'static str]) -> anyhow::Result<()> {
        {
            let mut values = self
                .values
                .write()
                .map_err(|_| anyhow::anyhow!("session map poisoned"))?;
            for key in keys {
                values.remove(*key);
            }
        }
        self.version.send_modify(|v| *v += 1);
        Ok(())
    }

    fn reload(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockSessionStore;

    fn gate_with(pairs: &[(&str, &str)]) -> (SessionGate, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        for (k, v) in pairs {
            store.set(k, v).unwrap();
        }
        (SessionGate::new(store.clone()), store)
    }

    #[test]
    fn anonymous_sees_only_entry_points() {
        let (gate, _) = gate_with(&[]);
        assert_eq!(gate.state(), SessionState::Anonymous);
        assert_eq!(gate.state().nav_items(), &[NavItem::SignIn, NavItem::SignUp]);
        assert!(!gate.state().shows_profile_banner());
    }

    #[test]
    fn preferences_without_sign_in_is_still_anonymous() {
        let (gate, _) = gate_with(&[(PREFERENCES_SET_KEY, "true")]);
        assert_eq!(gate.state(), SessionState::Anonymous);
        assert!(!gate.flags().can_access_main_features());
    }

    #[test]
    fn onboarding_is_restricted_and_shows_banner() {
        let (gate, _) = gate_with(&[(SIGNED_IN_KEY, "true")]);
        let state = gate.state();
        assert_eq!(state, SessionState::Onboarding);
        assert_eq!(state.nav_items(), &[NavItem::CompleteProfile, NavItem::SignOut]);
        assert!(state.shows_profile_banner());
    }

    #[test]
    fn only_the_exact_string_true_counts() {
        let (gate, _) = gate_with(&[(SIGNED_IN_KEY, "TRUE"), (PREFERENCES_SET_KEY, "1")]);
        assert_eq!(gate.flags(), SessionFlags::default());
    }

    #[test]
    fn active_gets_the_full_surface() {
        let (gate, _) = gate_with(&[(SIGNED_IN_KEY, "true"), (PREFERENCES_SET_KEY, "true")]);
        assert!(gate.flags().can_access_main_features());
        let items = gate.state().nav_items();
        assert!(items.contains(&NavItem::Messages));
        assert!(items.contains(&NavItem::Notifications));
        assert!(!items.contains(&NavItem::SignIn));
    }

    #[test]
    fn sign_out_clears_every_key_at_once() {
        let (gate, store) = gate_with(&[
            (SIGNED_IN_KEY, "true"),
            (PREFERENCES_SET_KEY, "true"),
            (USER_NAME_KEY, "Ada"),
            (USER_EMAIL_KEY, "ada@example.com"),
            (USER_PROFILE_DATA_KEY, "{}"),
        ]);
        let mut rx = gate.subscribe();
        rx.mark_unchanged();

        assert_eq!(gate.sign_out().unwrap(), SessionState::Anonymous);
        assert_eq!(gate.state(), SessionState::Anonymous);
        for key in SESSION_KEYS {
            assert!(store.get(key).is_none(), "{key} survived sign-out");
        }
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn subscribers_observe_external_sign_in() {
        let (gate, store) = gate_with(&[]);
        let mut rx = gate.subscribe();
        rx.mark_unchanged();

        store.set(SIGNED_IN_KEY, "true").unwrap();
        assert_eq!(gate.next_change(&mut rx).await, Some(SessionState::Onboarding));
    }

    #[test]
    fn failing_reload_surfaces_as_internal_error() {
        let mut store = MockSessionStore::new();
        store
            .expect_reload()
            .returning(|| Err(anyhow::anyhow!("disk gone")));
        let gate = SessionGate::new(Arc::new(store));
        assert!(matches!(gate.refresh(), Err(AppError::Internal(_))));
    }
}
