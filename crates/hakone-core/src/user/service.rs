//! User service for retrieving user information.

use super::model::UserProfile;

/// Service for retrieving user information.
///
/// The conversation session asks it for the nickname when seeding a greeting.
pub trait UserService: Send + Sync {
    /// Returns the current user's display name.
    fn get_user_name(&self) -> String {
        self.get_user_profile().nickname
    }

    /// Returns the complete user profile.
    fn get_user_profile(&self) -> UserProfile;
}

/// Default implementation that returns the default profile.
///
/// # Example
///
/// ```
/// use hakone_core::user::{UserService, DefaultUserService};
///
/// let service = DefaultUserService;
/// assert_eq!(service.get_user_name(), "Rookie");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultUserService;

impl UserService for DefaultUserService {
    fn get_user_profile(&self) -> UserProfile {
        UserProfile::default()
    }
}
