//! Máscaras de entrada para documentos brasileños (CPF, teléfono, CEP)
//!
//! Cada máscara aplica sus sustituciones una sola vez y en orden, de modo
//! que `mask(unmask(mask(x))) == mask(x)` para cualquier entrada.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"\D").expect("valid regex");
    static ref THREE_THEN_DIGIT: Regex = Regex::new(r"(\d{3})(\d)").expect("valid regex");
    static ref CPF_CHECK_DIGITS: Regex = Regex::new(r"(\d{3})(\d{1,2})").expect("valid regex");
    static ref CPF_TRAILING: Regex = Regex::new(r"(-\d{2})\d+?$").expect("valid regex");
    static ref MOBILE_PHONE: Regex = Regex::new(r"^(\d\d)(\d{5})(\d{4}).*").expect("valid regex");
    static ref LANDLINE_PHONE: Regex = Regex::new(r"^(\d\d)(\d{4})(\d{0,4}).*").expect("valid regex");
    static ref CEP_PREFIX: Regex = Regex::new(r"^(\d{5})(\d)").expect("valid regex");
    static ref CEP_TRAILING: Regex = Regex::new(r"(-\d{3})\d+?$").expect("valid regex");
}

/// Quitar todo lo que no sea dígito
pub fn unmask(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

/// `000.000.000-00`
pub fn mask_cpf(value: &str) -> String {
    let digits = unmask(value);
    let step = THREE_THEN_DIGIT.replacen(&digits, 1, "${1}.${2}");
    let step = THREE_THEN_DIGIT.replacen(&step, 1, "${1}.${2}");
    let step = CPF_CHECK_DIGITS.replacen(&step, 1, "${1}-${2}");
    CPF_TRAILING.replacen(&step, 1, "${1}").into_owned()
}

/// `(00) 0000-0000` o `(00) 00000-0000` para celulares
pub fn mask_phone(value: &str) -> String {
    let digits = unmask(value);

    if digits.len() > 10 {
        return MOBILE_PHONE.replacen(&digits, 1, "(${1}) ${2}-${3}").into_owned();
    }

    LANDLINE_PHONE.replacen(&digits, 1, "(${1}) ${2}-${3}").into_owned()
}

/// `00000-000`
pub fn mask_cep(value: &str) -> String {
    let digits = unmask(value);
    let step = CEP_PREFIX.replacen(&digits, 1, "${1}-${2}");
    CEP_TRAILING.replacen(&step, 1, "${1}").into_owned()
}
