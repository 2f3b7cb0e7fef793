//! Device management protocol model for `ltexporter`.
//!
//! - **[`Command`]** — a menu path plus `=name=value` attribute words.
//! - **[`Reply`] / [`Record`]** — the `!re` sentences a command produced, with
//!   a lookup-with-default accessor that treats empty values as missing.
//! - **[`Session`]** — an already-connected, authenticated session. Callers
//!   borrow it; nothing here opens or closes connections.
//! - **[`ReplaySession`]** — a session answering from a recorded JSON fixture.

pub mod command;
pub mod error;
pub mod replay;
pub mod reply;
pub mod session;

pub use command::Command;
pub use error::Error;
pub use replay::ReplaySession;
pub use reply::{Record, Reply};
pub use session::Session;
