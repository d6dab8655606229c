pub mod error;
pub mod invitation;
pub mod project;
pub mod team;

pub use error::TeamFeatureError;
pub use invitation::InvitationService;
pub use project::ProjectService;
pub use team::TeamService;
