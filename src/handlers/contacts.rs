use axum::{extract::State, Json};
use serde::Serialize;

use crate::{handlers::AppState, lead::Lead};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub domain: String,
    pub phone_display: String,
    /// Greeting-only WhatsApp link for pages without a calculation
    pub whatsapp: Lead,
}

/// GET /api/contacts
pub async fn get_contacts(State(state): State<AppState>) -> Json<ContactsResponse> {
    let config = state.config.load();
    let contacts = &config.contacts;

    Json(ContactsResponse {
        domain: contacts.domain.clone(),
        phone_display: contacts.phone_display.clone(),
        whatsapp: Lead::greeting(contacts),
    })
}
