use async_trait::async_trait;

use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::UserCredentials;

/// Read access to user accounts for login.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve login credentials by email address.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    ///
    /// # Returns
    /// Optional credentials (None if no account uses this email)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<UserCredentials>, UserError>;
}
