use crate::model::peer::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Identity announcement carried by the first frame of every connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPayload {
    #[serde(rename = "userId", default)]
    pub user_id: UserId,
}

/// Which media path the caller is willing to use.
///
/// Matched case-insensitively. Values this relay does not know are kept as
/// [`CallMode::Other`] so a newer client is never rejected over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallMode {
    #[default]
    Auto,
    P2pOnly,
    RelayOnly,
    Other(String),
}

impl CallMode {
    pub fn as_str(&self) -> &str {
        match self {
            CallMode::Auto => "auto",
            CallMode::P2pOnly => "p2p_only",
            CallMode::RelayOnly => "relay_only",
            CallMode::Other(mode) => mode,
        }
    }
}

impl From<String> for CallMode {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "auto" => CallMode::Auto,
            "p2p_only" => CallMode::P2pOnly,
            "relay_only" => CallMode::RelayOnly,
            _ => CallMode::Other(value),
        }
    }
}

impl From<CallMode> for String {
    fn from(mode: CallMode) -> Self {
        match mode {
            CallMode::Other(mode) => mode,
            known => known.as_str().to_owned(),
        }
    }
}

/// Same matching rules as [`CallMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallQuality {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl CallQuality {
    pub fn as_str(&self) -> &str {
        match self {
            CallQuality::Low => "low",
            CallQuality::Medium => "medium",
            CallQuality::High => "high",
            CallQuality::Other(quality) => quality,
        }
    }
}

impl From<String> for CallQuality {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "low" => CallQuality::Low,
            "medium" => CallQuality::Medium,
            "high" => CallQuality::High,
            _ => CallQuality::Other(value),
        }
    }
}

impl From<CallQuality> for String {
    fn from(quality: CallQuality) -> Self {
        match quality {
            CallQuality::Other(quality) => quality,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPayload {
    #[serde(default)]
    pub mode: CallMode,
    #[serde(default)]
    pub quality: CallQuality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResponsePayload {
    pub accepted: bool,
}

/// Session description for `offer` and `answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdpPayload {
    pub sdp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceCandidatePayload {
    pub candidate: String,
    #[serde(rename = "sdpMid", default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(
        rename = "sdpMLineIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sdp_m_line_index: Option<Number>,
}

impl IceCandidatePayload {
    /// `sdpMLineIndex` as an index. Some clients send it as a float (`0.0`).
    pub fn m_line_index(&self) -> Option<u32> {
        let index = self.sdp_m_line_index.as_ref()?;
        match index.as_u64() {
            Some(index) => u32::try_from(index).ok(),
            None => index
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        }
    }
}

/// Server → client only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListPayload {
    pub users: Vec<UserId>,
}

/// Server → client only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// One case per message `type`. The tag alone decides which payload shape is
/// meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Join(JoinPayload),
    /// Client asks the relay to drop its connection.
    Leave,
    Call(CallPayload),
    CallResponse(CallResponsePayload),
    Offer(SdpPayload),
    Answer(SdpPayload),
    IceCandidate(IceCandidatePayload),
    Hangup,
    UserList(UserListPayload),
    Error(ErrorPayload),
    /// A `type` this relay does not know. Kept so it can be logged.
    Unknown(String),
}

impl Payload {
    pub const JOIN: &'static str = "join";
    pub const LEAVE: &'static str = "leave";
    pub const CALL: &'static str = "call";
    pub const CALL_RESPONSE: &'static str = "call_response";
    pub const OFFER: &'static str = "offer";
    pub const ANSWER: &'static str = "answer";
    pub const ICE_CANDIDATE: &'static str = "ice_candidate";
    pub const HANGUP: &'static str = "hangup";
    pub const USER_LIST: &'static str = "user_list";
    pub const ERROR: &'static str = "error";

    /// Wire value of the `type` tag.
    pub fn kind(&self) -> &str {
        match self {
            Payload::Join(_) => Self::JOIN,
            Payload::Leave => Self::LEAVE,
            Payload::Call(_) => Self::CALL,
            Payload::CallResponse(_) => Self::CALL_RESPONSE,
            Payload::Offer(_) => Self::OFFER,
            Payload::Answer(_) => Self::ANSWER,
            Payload::IceCandidate(_) => Self::ICE_CANDIDATE,
            Payload::Hangup => Self::HANGUP,
            Payload::UserList(_) => Self::USER_LIST,
            Payload::Error(_) => Self::ERROR,
            Payload::Unknown(kind) => kind,
        }
    }

    /// Types that are forwarded peer-to-peer and therefore need a `to`.
    pub fn is_directed(&self) -> bool {
        matches!(
            self,
            Payload::Call(_)
                | Payload::CallResponse(_)
                | Payload::Offer(_)
                | Payload::Answer(_)
                | Payload::IceCandidate(_)
                | Payload::Hangup
        )
    }
}
