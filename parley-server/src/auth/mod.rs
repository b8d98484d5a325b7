mod auth_gate;
mod credential;
mod middleware;

pub use auth_gate::*;
pub use credential::*;
pub use middleware::*;
