mod payload;
mod peer;
mod signaling;

pub use payload::{
    CallMode, CallPayload, CallQuality, CallResponsePayload, ErrorPayload, IceCandidatePayload,
    JoinPayload, Payload, SdpPayload, UserListPayload,
};
pub use peer::UserId;
pub use signaling::SignalMessage;
