use crate::error::DecodeError;
use crate::model::payload::{
    CallPayload, ErrorPayload, JoinPayload, Payload, UserListPayload,
};
use crate::model::peer::UserId;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Envelope of every signaling frame.
///
/// `from` is optional on the way in; the relay overwrites it with the
/// sender's registered identity before forwarding. `to` names the recipient
/// of directed types.
///
/// `payload` is the typed view used for validation. A decoded message also
/// keeps the payload exactly as the sender wrote it, and that is what gets
/// encoded again, so relayed payloads reach the recipient untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct SignalMessage {
    pub from: Option<UserId>,
    pub to: Option<UserId>,
    pub payload: Payload,
    origin: Origin,
}

/// Where a message's wire payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Origin {
    /// Built locally; the payload is serialized from [`Payload`].
    Built,
    /// Decoded from a frame; the payload is written back as received.
    Received(Option<Value>),
}

impl SignalMessage {
    pub fn new(payload: Payload) -> Self {
        Self {
            from: None,
            to: None,
            payload,
            origin: Origin::Built,
        }
    }

    pub fn with_from(mut self, from: impl Into<UserId>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_to(mut self, to: impl Into<UserId>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn user_list(users: Vec<UserId>) -> Self {
        Self::new(Payload::UserList(UserListPayload { users }))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Payload::Error(ErrorPayload {
            message: message.into(),
        }))
    }

    pub fn decode(frame: &str) -> Result<Self, DecodeError> {
        let raw: RawEnvelope = serde_json::from_str(frame)?;
        raw.try_into()
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn kind(&self) -> &str {
        self.payload.kind()
    }

    /// Recipient of a directed message. A blank `to` counts as absent.
    pub fn target(&self) -> Option<&UserId> {
        self.to.as_ref().filter(|to| !to.is_blank())
    }

    /// The payload as received, if this message was decoded from a frame.
    pub fn raw_payload(&self) -> Option<&Value> {
        match &self.origin {
            Origin::Received(payload) => payload.as_ref(),
            Origin::Built => None,
        }
    }

    /// Identity claimed by a `join`, if it is one and the identity is usable.
    pub fn join_identity(&self) -> Option<&UserId> {
        match &self.payload {
            Payload::Join(join) if !join.user_id.is_blank() => Some(&join.user_id),
            _ => None,
        }
    }
}

/// Untyped shape of a frame, before `type` has picked the payload variant.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    from: Option<UserId>,
    #[serde(default)]
    to: Option<UserId>,
    #[serde(default)]
    payload: Option<Value>,
}

impl TryFrom<RawEnvelope> for SignalMessage {
    type Error = DecodeError;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        let RawEnvelope {
            kind,
            from,
            to,
            payload,
        } = raw;

        let raw_payload = payload.filter(|v| !v.is_null());
        let payload = raw_payload.clone();

        let payload = match kind.as_str() {
            Payload::JOIN => {
                let mut join: JoinPayload = optional_payload(&kind, payload)?;
                // Older clients announce themselves through `from` only.
                if join.user_id.is_blank() {
                    if let Some(from) = &from {
                        join.user_id = from.clone();
                    }
                }
                Payload::Join(join)
            }
            Payload::LEAVE => Payload::Leave,
            Payload::CALL => Payload::Call(optional_payload::<CallPayload>(&kind, payload)?),
            Payload::CALL_RESPONSE => Payload::CallResponse(required_payload(&kind, payload)?),
            Payload::OFFER => Payload::Offer(required_payload(&kind, payload)?),
            Payload::ANSWER => Payload::Answer(required_payload(&kind, payload)?),
            Payload::ICE_CANDIDATE => Payload::IceCandidate(required_payload(&kind, payload)?),
            Payload::HANGUP => Payload::Hangup,
            Payload::USER_LIST => Payload::UserList(required_payload(&kind, payload)?),
            Payload::ERROR => Payload::Error(required_payload(&kind, payload)?),
            _ => Payload::Unknown(kind),
        };

        Ok(Self {
            from,
            to,
            payload,
            origin: Origin::Received(raw_payload),
        })
    }
}

fn required_payload<T: DeserializeOwned>(kind: &str, value: Option<Value>) -> Result<T, DecodeError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| DecodeError::MissingPayload(kind.to_owned()))?;
    serde_json::from_value(value).map_err(|source| DecodeError::InvalidPayload {
        kind: kind.to_owned(),
        source,
    })
}

fn optional_payload<T: DeserializeOwned + Default>(
    kind: &str,
    value: Option<Value>,
) -> Result<T, DecodeError> {
    match value.filter(|v| !v.is_null()) {
        Some(value) => required_payload(kind, Some(value)),
        None => Ok(T::default()),
    }
}

impl Serialize for SignalMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.payload.kind())?;
        if let Some(from) = &self.from {
            map.serialize_entry("from", from)?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("to", to)?;
        }
        if let Origin::Received(raw) = &self.origin {
            if let Some(raw) = raw {
                map.serialize_entry("payload", raw)?;
            }
            return map.end();
        }
        match &self.payload {
            Payload::Join(p) => map.serialize_entry("payload", p)?,
            Payload::Call(p) => map.serialize_entry("payload", p)?,
            Payload::CallResponse(p) => map.serialize_entry("payload", p)?,
            Payload::Offer(p) | Payload::Answer(p) => map.serialize_entry("payload", p)?,
            Payload::IceCandidate(p) => map.serialize_entry("payload", p)?,
            Payload::UserList(p) => map.serialize_entry("payload", p)?,
            Payload::Error(p) => map.serialize_entry("payload", p)?,
            Payload::Leave | Payload::Hangup | Payload::Unknown(_) => {}
        }
        map.end()
    }
}
