//! The capability shared by both protocol roles

use crate::message::Message;

/// A protocol participant
///
/// Provers and verifiers differ only in what they put into messages. The
/// [`Channel`](crate::channel::Channel) is generic over any prover that
/// implements this trait, so dishonest provers plug in the same way as the
/// honest one.
pub trait Party {
    /// First message of the session.
    ///
    /// For a prover this is the public-key announcement; for the verifier it
    /// is [`Message::opening`].
    fn initial_message(&mut self) -> Message;

    /// Answer the other party's last message
    fn respond(&mut self, message: &Message) -> Message;
}
