//! Configuration-based user service implementation.
//!
//! Reads the user's nickname from config.toml and writes changes back.

use crate::storage::ConfigStorage;
use hakone_core::error::Result;
use hakone_core::user::{UserProfile, UserService};
use std::sync::{PoisonError, RwLock};

/// User service backed by the `[user_profile]` section of config.toml.
///
/// The profile is read once at construction and cached.
pub struct ConfigBasedUserService {
    storage: ConfigStorage,
    profile: RwLock<UserProfile>,
}

impl ConfigBasedUserService {
    /// Loads the profile from `storage`.
    pub fn load(storage: ConfigStorage) -> Result<Self> {
        let profile = storage.load()?.user_profile;
        Ok(Self {
            storage,
            profile: RwLock::new(profile),
        })
    }

    /// Changes the nickname and persists it.
    ///
    /// Other sections of config.toml are preserved.
    pub fn set_nickname(&self, nickname: impl Into<String>) -> Result<()> {
        let mut config = self.storage.load()?;
        config.user_profile.nickname = nickname.into();
        self.storage.save(&config)?;

        *self.profile.write().unwrap_or_else(PoisonError::into_inner) = config.user_profile;
        Ok(())
    }
}

impl UserService for ConfigBasedUserService {
    fn get_user_profile(&self) -> UserProfile {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
