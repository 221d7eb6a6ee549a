//! External catalogue integrations

pub mod openlibrary;
