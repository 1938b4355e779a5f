//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod invitation_repo;
pub mod response_repo;

pub use invitation_repo::InvitationRepo;
pub use response_repo::ResponseRepo;
