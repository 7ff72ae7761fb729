use recall_domain::{Client, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientDTO {
    pub id: ID,
    pub name: String,
    pub user_id: ID,
    pub created_at: i64,
}

impl ClientDTO {
    pub fn new(client: Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name,
            user_id: client.user_id.clone(),
            created_at: client.created_at,
        }
    }
}
