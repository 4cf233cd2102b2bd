//! PASS command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use crate::state::RegistrationState;
use tinyirc_proto::MessageRef;

/// Handler for PASS command.
///
/// The password is only stored here; it is checked when registration
/// completes.
pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let password = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let client = ctx.client_mut()?;

        match client.state {
            RegistrationState::Unregistered => {
                client.password = Some(password.to_string());
                client.state = RegistrationState::PassAccepted;
            }
            RegistrationState::FullyRegistered => {
                client.password = Some(password.to_string());
            }
            RegistrationState::PassAccepted | RegistrationState::NickAssigned => {
                return Err(HandlerError::AlreadyRegistered);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testbed::{TestBed, has_numeric};

    #[test]
    fn pass_after_nick_is_rejected() {
        let mut bed = TestBed::new();
        let uid = bed.connect();
        bed.send(uid, "NICK alice");

        bed.send(uid, "PASS late");

        assert!(has_numeric(&bed.take(uid), "462"));
    }

    #[test]
    fn arity_is_enforced() {
        let mut bed = TestBed::new();
        let uid = bed.connect();

        bed.send(uid, "PASS");
        bed.send(uid, "PASS a b");

        assert_eq!(
            bed.take(uid),
            vec![
                ":irc.tinyircd.local 461 * PASS :Not enough parameters",
                ":irc.tinyircd.local 400 * PASS :Too many parameters",
            ]
        );
    }
}
