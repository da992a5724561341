pub mod approval;
pub mod project;
