//! User Model

use serde::{Deserialize, Serialize};

/// User who opened a service request.
///
/// The backend also sends a `password` field on this object; it is never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub role: String,
}
