//! The authentication session: state, restore-from-storage, and the
//! reducer orchestrating login, registration and profile calls.

mod reducer;
mod types;

pub use reducer::{AvatarUpload, SessionAction, SessionReducer};
pub use types::SessionState;
