//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod compliance_repo;
pub mod contractor_repo;
pub mod document_repo;
pub mod insurance_repo;
pub mod onboarding_repo;
pub mod safety_repo;
pub mod team_repo;

pub use assignment_repo::AssignmentRepo;
pub use compliance_repo::ComplianceRepo;
pub use contractor_repo::ContractorRepo;
pub use document_repo::DocumentRepo;
pub use insurance_repo::InsuranceRepo;
pub use onboarding_repo::OnboardingRepo;
pub use safety_repo::SafetyRepo;
pub use team_repo::TeamRepo;
