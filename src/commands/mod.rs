pub mod add;
pub mod find;
pub mod init;
pub mod list;
pub mod remove;
pub mod status;

pub use add::*;
pub use find::*;
pub use init::*;
pub use list::*;
pub use remove::*;
pub use status::*;
