pub use parley_core::model::{SignalMessage, UserId};

pub mod model {
    pub use parley_core::model::*;
    pub use parley_core::DecodeError;
}

#[cfg(feature = "server")]
pub mod server {
    pub use parley_server::*;
}
