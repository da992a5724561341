mod approval_repo;
mod project_repo;

pub use approval_repo::ApprovalRepo;
pub use project_repo::ProjectRepo;
