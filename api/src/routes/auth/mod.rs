//! Registration, login and password-reset endpoints

pub mod login;
pub mod password;
pub mod register;
