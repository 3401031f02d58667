//! Modal popup components: contact form and help screen

pub mod contact;
pub mod help;
