//! Direct-messaging endpoints

pub mod conversations;
pub mod messages;
