pub mod id;
pub mod state;

pub use id::SessionIdGenerator;
pub use state::{SessionState, User, USER_KEY};
