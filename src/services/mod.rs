pub mod assignments;
pub mod grades;
pub mod teams;

pub(crate) mod access;
