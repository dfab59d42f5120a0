//! Message-related types (`Msg`, `Reply`).

mod msg;
mod reply;

pub use msg::Msg;
pub use reply::Reply;
