//! Protocol messages
//!
//! Every exchange produces a fresh [`Message`]: a round counter, a payload of
//! residues and a [`Status`] naming who acts next. The meaning of the payload
//! depends on the round's parity and on which party sent it:
//!
//! | Round | Sender | Payload |
//! |-------|--------|---------|
//! | 0 | prover | public key `I_1..I_k` (announcement) |
//! | odd | prover | commitment `x = r²` |
//! | odd | verifier | challenge bits as residues 0/1 |
//! | even, non-zero | prover | response `y` |
//! | even, non-zero | verifier | empty |

#[cfg(feature = "serde")]
use ffs_bigint::BigInteger;
use ffs_bigint::{ModInt, Modulus};

/// Who acts next, or how the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The verifier waits for the prover's next message
    Continue,
    /// Sent by the prover; the verifier must act
    ProverTurn,
    /// Prover accepted (terminal)
    Success,
    /// Prover rejected (terminal)
    Failed,
}

impl Status {
    /// Returns true for `Success` and `Failed`
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

/// One protocol message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    round: u64,
    payload: Vec<ModInt>,
    status: Status,
}

impl Message {
    /// Create a message
    #[must_use]
    pub fn new(round: u64, payload: Vec<ModInt>, status: Status) -> Self {
        Self { round, payload, status }
    }

    /// The message that opens every session: round 0, empty, `Continue`
    #[must_use]
    pub fn opening() -> Self {
        Self::new(0, Vec::new(), Status::Continue)
    }

    /// Round counter
    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Payload values
    #[must_use]
    pub fn payload(&self) -> &[ModInt] {
        &self.payload
    }

    /// Status tag
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Payload read as challenge bits (non-zero is one)
    #[must_use]
    pub fn challenge_bits(&self) -> Vec<bool> {
        self.payload.iter().map(|bit| !bit.is_zero()).collect()
    }
}

/// Challenge bits encoded as residues 0/1
#[must_use]
pub fn encode_bits(bits: &[bool], modulus: &Modulus) -> Vec<ModInt> {
    bits.iter().map(|&bit| if bit { modulus.one() } else { modulus.zero() }).collect()
}

/// Transport form of a [`Message`] with payload values as decimal strings
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WireMessage {
    /// Round counter
    pub round: u64,
    /// Payload representatives in `[0, N)`
    pub payload: Vec<BigInteger>,
    /// Status tag
    pub status: Status,
}

#[cfg(feature = "serde")]
impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            round: message.round,
            payload: message.payload.iter().map(|value| value.value().clone()).collect(),
            status: message.status,
        }
    }
}

#[cfg(feature = "serde")]
impl WireMessage {
    /// Rebuild the message, reducing every payload value modulo `modulus`.
    #[must_use]
    pub fn into_message(self, modulus: &Modulus) -> Message {
        let payload = self.payload.into_iter().map(|value| ModInt::new(value, modulus)).collect();
        Message::new(self.round, payload, self.status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ffs_bigint::BigInteger;

    fn modulus() -> Modulus {
        Modulus::new(BigInteger::from(35)).unwrap()
    }

    #[test]
    fn test_opening_message() {
        let opening = Message::opening();
        assert_eq!(opening.round(), 0);
        assert!(opening.payload().is_empty());
        assert_eq!(opening.status(), Status::Continue);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(Status::Success.is_terminal());
        assert!(Status::Failed.is_terminal());
        assert!(!Status::Continue.is_terminal());
        assert!(!Status::ProverTurn.is_terminal());
    }

    #[test]
    fn test_challenge_bits_round_trip() {
        let bits = vec![true, false, false, true, true];
        let message = Message::new(3, encode_bits(&bits, &modulus()), Status::Continue);
        assert_eq!(message.challenge_bits(), bits);
        assert_eq!(message.payload()[0].value(), &BigInteger::one());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_form() {
        let n = modulus();
        let message = Message::new(5, vec![n.reduce(&BigInteger::from(9))], Status::ProverTurn);
        let json = serde_json::to_string(&WireMessage::from(&message)).unwrap();
        assert_eq!(json, r#"{"round":5,"payload":["9"],"status":"ProverTurn"}"#);
        let wire: WireMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(wire.into_message(&n), message);
    }
}
