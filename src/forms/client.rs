use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{ClientName, CompanyId, EmailAddress, NonEmptyString};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for adding or editing a client.
pub struct ClientForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    /// Optional contact email; blank means none.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientPayload {
    pub name: ClientName,
    pub email: Option<EmailAddress>,
    pub industry: Option<NonEmptyString>,
}

impl ClientPayload {
    pub fn into_new(self, company_id: CompanyId) -> NewClient {
        NewClient::new(company_id, self.name, self.email, self.industry)
    }

    pub fn into_update(self) -> UpdateClient {
        UpdateClient::new(self.name, self.email, self.industry)
    }
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = match form.email.trim() {
            "" => None,
            email => Some(EmailAddress::new(email).map_err(|err| FormError::field("email", err))?),
        };

        Ok(Self {
            name: ClientName::new(form.name).map_err(|err| FormError::field("name", err))?,
            email,
            industry: NonEmptyString::new(form.industry).ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_become_none() {
        let payload = ClientPayload::try_from(ClientForm {
            name: "Acme".to_string(),
            email: "  ".to_string(),
            industry: String::new(),
        })
        .unwrap();

        assert_eq!(payload.email, None);
        assert_eq!(payload.industry, None);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = ClientPayload::try_from(ClientForm {
            name: "Acme".to_string(),
            email: "acme".to_string(),
            industry: "Retail".to_string(),
        })
        .unwrap_err();

        assert!(err.field_errors().contains_key("email"));
    }
}
