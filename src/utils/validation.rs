//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para la validación de formularios
//! antes de enviar cualquier request. Los mensajes van en portugués porque
//! se muestran tal cual al operador.

use chrono::{NaiveDate, NaiveTime};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::{AppError, AppResult};
use crate::utils::masks::unmask;

/// Acumulador de errores por campo para formularios con reglas cruzadas
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: ValidationErrors,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: &'static str) {
        let mut error = ValidationError::new("form");
        error.message = Some(Cow::Borrowed(message));
        self.errors.add(field, error);
    }

    /// Registrar el error de `check` bajo `field`, si lo hay
    pub fn check(&mut self, field: &'static str, check: Result<(), ValidationError>) {
        if let Err(error) = check {
            self.errors.add(field, error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.errors().is_empty()
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

fn error_with_message(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error.add_param("value".into(), &value.to_string());
    error
}

/// Validar UF brasileña: exactamente 2 letras
pub fn validate_uf(value: &str) -> Result<(), ValidationError> {
    let uf = value.trim();
    if uf.chars().count() != 2 || !uf.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(error_with_message("uf", "UF deve conter 2 caracteres.", value));
    }
    Ok(())
}

/// Validar CEP: 8 dígitos una vez quitada la máscara
pub fn validate_cep(value: &str) -> Result<(), ValidationError> {
    let digits = unmask(value);
    if digits.len() != 8 {
        return Err(error_with_message("cep", "CEP inválido.", value));
    }
    Ok(())
}

/// Validar CPF: 11 dígitos una vez quitada la máscara
pub fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    if unmask(value).len() != 11 {
        return Err(error_with_message("cpf", "CPF deve conter 11 dígitos.", value));
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ())
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = error_with_message("date", "Informe uma data válida.", value);
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar hora en formato HH:MM
pub fn validate_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|_| ())
        .map_err(|_| {
            let mut error = error_with_message("time", "Horário inválido.", value);
            error.add_param("format".into(), &"HH:MM".to_string());
            error
        })
}

/// Validar día de la semana (0 = lunes ... 6 = domingo, como el backend)
pub fn validate_weekday(value: i32) -> Result<(), ValidationError> {
    if !(0..=6).contains(&value) {
        let mut error = ValidationError::new("weekday");
        error.message = Some(Cow::Borrowed("Dia da semana inválido."));
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let valid = trimmed
        .split_once('@')
        .map(|(user, domain)| !user.is_empty() && domain.contains('.') && !domain.ends_with('.'))
        .unwrap_or(false);
    if !valid {
        return Err(error_with_message("email", "Email inválido.", value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uf() {
        assert!(validate_uf("SP").is_ok());
        assert!(validate_uf(" rj ").is_ok());
        assert!(validate_uf("S").is_err());
        assert!(validate_uf("SPA").is_err());
        assert!(validate_uf("1A").is_err());
    }

    #[test]
    fn test_validate_cep() {
        assert!(validate_cep("01310-100").is_ok());
        assert!(validate_cep("01310100").is_ok());
        assert!(validate_cep("0131-01").is_err());
    }

    #[test]
    fn test_validate_cpf() {
        assert!(validate_cpf("123.456.789-09").is_ok());
        assert!(validate_cpf("123.456.789").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("07:30").is_ok());
        assert!(validate_time("25:00").is_err());
        assert!(validate_time("7h").is_err());
    }

    #[test]
    fn test_validate_weekday() {
        assert!(validate_weekday(0).is_ok());
        assert!(validate_weekday(6).is_ok());
        assert!(validate_weekday(7).is_err());
        assert!(validate_weekday(-1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@empresa.com.br").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
        assert!(validate_email("@dominio.com").is_err());
    }

    #[test]
    fn test_form_errors_accumulate() {
        let mut errors = FormErrors::new();
        assert!(errors.is_empty());

        errors.add("nome", "Informe o nome.");
        errors.check("estado", validate_uf("S"));
        errors.check("cep", validate_cep("01310-100"));

        match errors.into_result() {
            Err(AppError::Validation(errors)) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("nome"));
                assert!(fields.contains_key("estado"));
                assert!(!fields.contains_key("cep"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
