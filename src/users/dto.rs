use crate::config::PasswordPolicy;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for user creation and registration. Any role supplied by
/// the client is ignored; creation always forces `USER`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub birthdate: String,
}

impl CreateUserRequest {
    pub fn validate(&self, policy: &PasswordPolicy) -> Result<(), Vec<String>> {
        let mut complaints = Vec::new();

        if self.email.trim().is_empty() {
            complaints.push("email - The field must not be empty!".to_string());
        } else if !is_valid_email(self.email.trim()) {
            complaints.push("email - invalid email".to_string());
        }

        if self.password.len() < policy.min_len || self.password.len() > policy.max_len {
            complaints.push(format!(
                "password - must be between {} and {} characters",
                policy.min_len, policy.max_len
            ));
        }

        if self.name.trim().is_empty() {
            complaints.push("name - The field must not be empty!".to_string());
        }

        if self.birthdate.trim().is_empty() {
            complaints.push("birthdate - The field must not be empty!".to_string());
        }

        if complaints.is_empty() {
            Ok(())
        } else {
            Err(complaints)
        }
    }
}

/// Request body for user updates; only name and birthdate are mutable.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub birthdate: String,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut complaints = Vec::new();

        if self.name.trim().is_empty() {
            complaints.push("name - The field must not be empty!".to_string());
        }

        if self.birthdate.trim().is_empty() {
            complaints.push("birthdate - The field must not be empty!".to_string());
        }

        if complaints.is_empty() {
            Ok(())
        } else {
            Err(complaints)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy {
            min_len: 5,
            max_len: 14,
        }
    }

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            email: "a@x.com".into(),
            password: "Passw0rd".into(),
            name: "John".into(),
            birthdate: "20.11.88".into(),
        }
    }

    #[test]
    fn accepts_valid_request() {
        assert!(valid_request().validate(&policy()).is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        let mut req = valid_request();
        req.email = "not-an-email".into();
        let complaints = req.validate(&policy()).unwrap_err();
        assert_eq!(complaints, vec!["email - invalid email".to_string()]);
    }

    #[test]
    fn password_length_complaint_reflects_configured_bounds() {
        let mut req = valid_request();
        req.password = "abc".into();
        let complaints = req.validate(&policy()).unwrap_err();
        assert_eq!(
            complaints,
            vec!["password - must be between 5 and 14 characters".to_string()]
        );

        req.password = "a".repeat(15);
        assert!(req.validate(&policy()).is_err());

        let wide = PasswordPolicy {
            min_len: 8,
            max_len: 64,
        };
        req.password = "abc".into();
        let complaints = req.validate(&wide).unwrap_err();
        assert_eq!(
            complaints,
            vec!["password - must be between 8 and 64 characters".to_string()]
        );
    }

    #[test]
    fn collects_complaints_in_field_order() {
        let req = CreateUserRequest {
            email: "".into(),
            password: "".into(),
            name: " ".into(),
            birthdate: "".into(),
        };
        let complaints = req.validate(&policy()).unwrap_err();
        assert_eq!(complaints.len(), 4);
        assert!(complaints[0].starts_with("email"));
        assert!(complaints[1].starts_with("password"));
        assert!(complaints[2].starts_with("name"));
        assert!(complaints[3].starts_with("birthdate"));
    }

    #[test]
    fn update_requires_both_fields() {
        let req = UpdateUserRequest {
            name: "".into(),
            birthdate: "20.11.88".into(),
        };
        let complaints = req.validate().unwrap_err();
        assert_eq!(
            complaints,
            vec!["name - The field must not be empty!".to_string()]
        );
    }

    #[test]
    fn email_regex_basics() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user example@x.com"));
    }
}
