pub mod error;
pub mod service;

pub use error::UserFeatureError;
pub use service::UserService;
