mod reddit;
pub use reddit::*;

mod collect;
pub use collect::*;

mod session;
pub use session::*;

mod config;
pub use config::Credentials;

mod init;
pub use init::init_tracing;
