pub mod auth;
pub mod error;
pub mod invitation;
pub mod postgres;
pub mod project;
pub mod team;
pub mod user;
pub mod validation;

#[cfg(feature = "test-support")]
pub mod memory;

pub use auth::{Provider, Role, TOKEN_PAYLOAD_SCHEMA, TokenPayload};
pub use error::{DomainError, ErrorCode, ErrorContract, StoreError, classify};
pub use invitation::{
    INVITATION_DATA_SCHEMA, INVITATION_SCHEMA, Invitation, InvitationData, InvitationStatus,
    InvitationStore,
};
pub use project::{PROJECT_DATA_SCHEMA, PROJECT_SCHEMA, Project, ProjectData, ProjectStore};
pub use team::{
    TEAM_DATA_SCHEMA, TEAM_MEMBER_DATA_SCHEMA, TEAM_MEMBER_SCHEMA, TEAM_SCHEMA, Team, TeamData,
    TeamMember, TeamMemberData, TeamRole, TeamStore,
};
pub use user::{
    NewUser, REGISTER_SCHEMA, RENAME_SCHEMA, RegisterUser, RenameUser, USER_SCHEMA, User,
    UserStore,
};
pub use validation::{Schema, ValidationFailure, Violation, validate};
