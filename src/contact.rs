use log::info;
use serde::Serialize;
use std::collections::HashMap;

pub const THANK_YOU_MESSAGE: &str = "Thank you for your message! We will get back to you shortly.";

/// Fields the rendered contact form offers.
pub const CONTACT_FIELDS: [&str; 4] = ["name", "email", "organization", "message"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub fields: HashMap<String, String>,
    pub message: String,
}

/// Handles the contact form. The form keeps no values between renders,
/// so after a submission it is shown empty again.
#[derive(Debug, Clone, Default)]
pub struct ContactDesk;

impl ContactDesk {
    pub fn new() -> Self {
        Self
    }

    /// Fields as rendered, all blank.
    pub fn form(&self) -> Vec<ContactField> {
        CONTACT_FIELDS.iter()
            .map(|name| ContactField {
                name: name.to_string(),
                value: String::new(),
            })
            .collect()
    }

    /// Accepts whatever was submitted and logs it. Repeated keys keep the last value.
    pub fn submit(&self, submitted: Vec<(String, String)>) -> ContactReceipt {
        let fields: HashMap<String, String> = submitted.into_iter().collect();
        info!(
            "Contact form submitted: {}",
            serde_json::to_string(&fields).unwrap_or_default()
        );

        ContactReceipt {
            fields,
            message: THANK_YOU_MESSAGE.to_string(),
        }
    }
}
