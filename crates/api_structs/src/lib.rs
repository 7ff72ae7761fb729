mod client;
mod follow_up;
mod notification;
mod status;
mod user;

pub mod dtos {
    pub use crate::client::dtos::*;
    pub use crate::follow_up::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::client::api::*;
pub use crate::follow_up::api::*;
pub use crate::notification::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
