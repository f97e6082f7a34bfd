use crate::error::GatewayError;
use std::fmt;

/// Merchant profile credentials issued by the processor.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    login: String,
    password: String,
    test: bool,
}

impl Credentials {
    /// Both the profile id (`login`) and profile key (`password`) are required.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        test: bool,
    ) -> Result<Self, GatewayError> {
        let login = login.into();
        let password = password.into();
        if login.trim().is_empty() {
            return Err(GatewayError::ConfigurationError(
                "Missing required credential: login".to_string(),
            ));
        }
        if password.trim().is_empty() {
            return Err(GatewayError::ConfigurationError(
                "Missing required credential: password".to_string(),
            ));
        }
        Ok(Self {
            login,
            password,
            test,
        })
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_test(&self) -> bool {
        self.test
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .field("test", &self.test)
            .finish()
    }
}
