//! Phone hand-off and contact form validation.

use std::collections::BTreeMap;

use crate::error::ShopError;

/// Digits and `+` only, suitable for a `tel:` link.
pub fn sanitize_tel(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

/// Digits only with leading zeros removed, as `wa.me` expects.
pub fn sanitize_for_whatsapp(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.trim_start_matches('0').to_string()
}

/// `tel:` target for a configured number.
pub fn tel_target(raw: &str) -> Result<String, ShopError> {
    let number = sanitize_tel(raw);
    if number.is_empty() {
        return Err(ShopError::InvalidPhoneNumber(raw.to_string()));
    }
    Ok(number)
}

/// External messaging URL for a configured number.
pub fn whatsapp_url(raw: &str) -> Result<String, ShopError> {
    let number = sanitize_for_whatsapp(raw);
    if number.is_empty() {
        return Err(ShopError::InvalidPhoneNumber(raw.to_string()));
    }
    Ok(format!("https://wa.me/{}", number))
}

/// A submitted contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Build from form fields, trimming whitespace.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Self {
        let field = |key: &str| {
            fields
                .get(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        Self {
            name: field("name"),
            email: field("email"),
            message: field("message"),
        }
    }

    pub fn validate(&self) -> Result<(), ShopError> {
        if self.name.is_empty() {
            return Err(ShopError::InvalidContactForm("name is required".into()));
        }
        if self.message.is_empty() {
            return Err(ShopError::InvalidContactForm("message is required".into()));
        }
        if !is_plausible_email(&self.email) {
            return Err(ShopError::InvalidContactForm(format!(
                "invalid email: {:?}",
                self.email
            )));
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
