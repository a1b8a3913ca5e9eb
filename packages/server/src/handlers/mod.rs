pub mod account;
pub mod events;

use crate::reply::Reply;

/// CORS preflight. Answers before any authentication or parsing.
pub async fn preflight() -> Reply {
    Reply::Preflight
}
