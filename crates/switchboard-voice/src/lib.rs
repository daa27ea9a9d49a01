//! Media and telephony infrastructure for the Switchboard platform.
//!
//! Production implementations of the transfer core's capability traits,
//! built on the LiveKit server APIs: room lifecycle and scoped join
//! tokens ([`rooms`]), SIP dial-out and participant migration over the
//! Twirp JSON endpoints ([`sip`], [`migrate`]), background hold-audio
//! playback ([`playback`]), the local agent session leg ([`session`]),
//! and the per-session speech pipeline factory ([`pipeline`]).
//!
//! The transfer core itself never sees any of these types directly; it
//! talks to them through the traits in `switchboard_transfer::traits`.

pub mod config;
pub mod consult;
pub mod error;
pub mod migrate;
pub mod pipeline;
pub mod playback;
pub mod rooms;
pub mod session;
pub mod sip;
mod twirp;

pub use config::{MediaConfig, TelephonyConfig};
pub use consult::ConsultFactory;
pub use error::MediaError;
pub use migrate::MigrationClient;
pub use pipeline::{PipelineConfig, PipelineFactory, SttEngine, TtsEngine, VoicePipeline};
pub use playback::BackgroundAudio;
pub use rooms::RoomService;
pub use session::AgentSessionHandle;
pub use sip::TelephonyClient;
