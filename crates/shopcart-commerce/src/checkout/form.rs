//! Checkout form fields and validation.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A field of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    FullName,
    Email,
    Address,
    City,
    ZipCode,
    CardName,
    CardNumber,
    ExpMonth,
    ExpYear,
    Cvv,
}

impl CheckoutField {
    /// Every field, in form order.
    pub const ALL: [CheckoutField; 10] = [
        CheckoutField::FullName,
        CheckoutField::Email,
        CheckoutField::Address,
        CheckoutField::City,
        CheckoutField::ZipCode,
        CheckoutField::CardName,
        CheckoutField::CardNumber,
        CheckoutField::ExpMonth,
        CheckoutField::ExpYear,
        CheckoutField::Cvv,
    ];

    /// Form field name (e.g., "zipCode").
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutField::FullName => "fullName",
            CheckoutField::Email => "email",
            CheckoutField::Address => "address",
            CheckoutField::City => "city",
            CheckoutField::ZipCode => "zipCode",
            CheckoutField::CardName => "cardName",
            CheckoutField::CardNumber => "cardNumber",
            CheckoutField::ExpMonth => "expMonth",
            CheckoutField::ExpYear => "expYear",
            CheckoutField::Cvv => "cvv",
        }
    }

    /// Human label (e.g., "ZIP Code").
    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutField::FullName => "Full Name",
            CheckoutField::Email => "Email",
            CheckoutField::Address => "Address",
            CheckoutField::City => "City",
            CheckoutField::ZipCode => "ZIP Code",
            CheckoutField::CardName => "Name on Card",
            CheckoutField::CardNumber => "Card Number",
            CheckoutField::ExpMonth => "Exp Month",
            CheckoutField::ExpYear => "Exp Year",
            CheckoutField::Cvv => "CVV",
        }
    }

    /// Whether the value should be masked when echoed back.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, CheckoutField::CardNumber | CheckoutField::Cvv)
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CheckoutField {
    type Err = CommerceError;

    /// Accepts the form name ("zipCode") or a snake/kebab spelling ("zip_code", "zip-code").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        CheckoutField::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == normalized)
            .ok_or_else(|| CommerceError::UnknownCheckoutField(s.to_string()))
    }
}

/// Contact, shipping and card details collected at checkout.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub card_name: String,
    pub card_number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field's value.
    pub fn get(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::FullName => &self.full_name,
            CheckoutField::Email => &self.email,
            CheckoutField::Address => &self.address,
            CheckoutField::City => &self.city,
            CheckoutField::ZipCode => &self.zip_code,
            CheckoutField::CardName => &self.card_name,
            CheckoutField::CardNumber => &self.card_number,
            CheckoutField::ExpMonth => &self.exp_month,
            CheckoutField::ExpYear => &self.exp_year,
            CheckoutField::Cvv => &self.cvv,
        }
    }

    /// Set a field's value.
    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::FullName => &mut self.full_name,
            CheckoutField::Email => &mut self.email,
            CheckoutField::Address => &mut self.address,
            CheckoutField::City => &mut self.city,
            CheckoutField::ZipCode => &mut self.zip_code,
            CheckoutField::CardName => &mut self.card_name,
            CheckoutField::CardNumber => &mut self.card_number,
            CheckoutField::ExpMonth => &mut self.exp_month,
            CheckoutField::ExpYear => &mut self.exp_year,
            CheckoutField::Cvv => &mut self.cvv,
        };
        *slot = value.into();
    }

    /// Set a field by its form name.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), CommerceError> {
        let field = name.parse::<CheckoutField>()?;
        self.set(field, value);
        Ok(())
    }

    /// Fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<CheckoutField> {
        CheckoutField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Check that every field is filled in and the email looks like one.
    ///
    /// The error lists every offending field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut problems: Vec<&str> = self
            .missing_fields()
            .iter()
            .map(CheckoutField::as_str)
            .collect();

        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            problems.push("email (invalid address)");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(problems.join(", ")))
        }
    }
}

impl fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("CheckoutForm");
        for field in CheckoutField::ALL {
            let value = self.get(field);
            if field.is_sensitive() && !value.is_empty() {
                out.field(field.as_str(), &"***");
            } else {
                out.field(field.as_str(), &value);
            }
        }
        out.finish()
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
