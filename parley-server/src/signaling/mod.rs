mod app_state;
mod router;
mod ws_handler;

pub use app_state::*;
pub use router::*;
pub use ws_handler::*;
