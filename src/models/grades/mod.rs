pub mod aggregate;
pub mod entities;
pub mod requests;
pub mod responses;
