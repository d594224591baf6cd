use serde::{Deserialize, Serialize};

/// Request body for login. Credentials are transient; nothing here is
/// persisted or logged.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Fixed confirmation returned by registration; the token comes from a
/// separate login call.
#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub message: String,
}

impl RegisteredResponse {
    pub fn new() -> Self {
        Self {
            message: "Registered successfully!".to_string(),
        }
    }
}

impl Default for RegisteredResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut complaints = Vec::new();

        if self.email.trim().is_empty() {
            complaints.push("email - The field must not be empty!".to_string());
        }
        if self.password.is_empty() {
            complaints.push("password - The field must not be empty!".to_string());
        }

        if complaints.is_empty() {
            Ok(())
        } else {
            Err(complaints)
        }
    }
}
