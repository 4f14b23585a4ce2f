use serde::Deserialize;
use validator::Validate;

// Credenciales del formulario de login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Informe o email."))]
    pub email: String,
    #[validate(length(min = 1, message = "Informe a senha."))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Cuerpo `application/x-www-form-urlencoded` esperado por `/auth/token`
    pub fn form_fields(&self) -> [(&'static str, &str); 2] {
        [("username", self.email.as_str()), ("password", self.password.as_str())]
    }
}
