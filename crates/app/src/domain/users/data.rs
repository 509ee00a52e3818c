//! User Data

use crate::domain::users::records::Role;

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub organization: String,
    pub role: Role,

    /// Opening balance. `None` leaves the balance unset, which reads as zero.
    pub credits: Option<u64>,
}
