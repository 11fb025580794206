pub mod handlers;
pub mod server;
pub mod types;

pub use handlers::{dispatch, RpcState};
pub use server::RpcServer;
