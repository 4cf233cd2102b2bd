//! Connection and registration handlers.
//!
//! Handles PASS, NICK, USER, PING, PONG, QUIT commands.

mod nick;
mod pass;
mod ping;
mod quit;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use pass::PassHandler;
pub use ping::{PingHandler, PongHandler};
pub use quit::{QuitHandler, disconnect};
pub use user::UserHandler;
