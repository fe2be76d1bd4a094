pub mod issue;
pub mod user;
pub mod status;
pub mod search;
pub mod worklog;

pub use issue::*;
pub use user::*;
pub use status::*;
pub use search::*;
pub use worklog::*;
