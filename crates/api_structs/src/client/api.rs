use crate::dtos::ClientDTO;
use recall_domain::{Client, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub client: ClientDTO,
}

impl ClientResponse {
    pub fn new(client: Client) -> Self {
        Self {
            client: ClientDTO::new(client),
        }
    }
}

pub mod create_client {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        /// Defaults to the calling user; only admins may assign others
        pub user_id: Option<ID>,
    }

    pub type APIResponse = ClientResponse;
}

pub mod get_client {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    pub type APIResponse = ClientResponse;
}

pub mod get_clients {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub clients: Vec<ClientDTO>,
    }

    impl APIResponse {
        pub fn new(clients: Vec<Client>) -> Self {
            Self {
                clients: clients.into_iter().map(ClientDTO::new).collect(),
            }
        }
    }
}
