use serde::{Deserialize, Serialize};

pub const DEFAULT_EMAIL: &str = "testuser@example.com";
pub const DEFAULT_PASSWORD: &str = "securepassword123";
pub const DEFAULT_ID: &str = "12345";

/// Body of `POST /users`. Fields are sent as given; nothing is validated
/// client-side, and `id` is sent even though the server may assign its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub email: String,
    pub password: String,
    pub id: String,
}

impl UserPayload {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            id: id.into(),
        }
    }
}

impl Default for UserPayload {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL, DEFAULT_PASSWORD, DEFAULT_ID)
    }
}
