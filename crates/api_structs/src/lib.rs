mod reminder;
mod shared;
mod status;
mod subscription;

pub mod dtos {
    pub use crate::reminder::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::shared::*;
pub use crate::status::api::*;
pub use crate::subscription::api::*;
