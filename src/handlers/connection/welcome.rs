//! Registration completion and the welcome burst (001-004).

use super::super::{Context, HandlerError, HandlerResult};
use crate::state::RegistrationState;
use tinyirc_proto::Response;
use tracing::{info, warn};

/// User modes advertised in RPL_MYINFO. None are implemented.
const USER_MODES: &str = "*";
/// Channel modes advertised in RPL_MYINFO.
const CHANNEL_MODES: &str = "biklot";

/// Finish registration once both NICK and USER are in.
///
/// With a server password the stored PASS value is compared first. On a
/// mismatch the client drops back to `Unregistered`, releasing its nick, so it
/// can retry.
pub(super) fn complete_registration(ctx: &mut Context<'_>) -> HandlerResult {
    if let Some(expected) = ctx.matrix.server_info.password.clone()
        && ctx.client()?.password.as_deref() != Some(expected.as_str())
    {
        warn!(uid = %ctx.uid, "Registration rejected: password mismatch");
        ctx.matrix.clients.release_nick(ctx.uid);
        let client = ctx.client_mut()?;
        client.state = RegistrationState::Unregistered;
        client.password = None;
        return Err(HandlerError::PasswdMismatch);
    }

    ctx.client_mut()?.state = RegistrationState::FullyRegistered;
    send_welcome_burst(ctx)?;
    Ok(())
}

fn send_welcome_burst(ctx: &mut Context<'_>) -> HandlerResult {
    let client = ctx.client()?;
    let nick = client.nick_or_star().to_string();
    let mask = client.prefix().to_string();
    let realname = client.realname.clone().unwrap_or_default();
    let info = ctx.matrix.server_info.clone();

    ctx.reply(
        Response::RPL_WELCOME,
        vec![
            nick.clone(),
            format!("Welcome to the {} IRC Network {}", info.network, mask),
        ],
    );
    ctx.reply(
        Response::RPL_YOURHOST,
        vec![
            nick.clone(),
            format!("Your host is {}, running version {}", info.name, info.version),
        ],
    );
    ctx.reply(
        Response::RPL_CREATED,
        vec![
            nick.clone(),
            format!(
                "This server was created {}",
                info.created.format("%Y-%m-%d %H:%M:%S UTC")
            ),
        ],
    );
    ctx.reply(
        Response::RPL_MYINFO,
        vec![
            nick.clone(),
            info.name,
            info.version,
            USER_MODES.to_string(),
            CHANNEL_MODES.to_string(),
        ],
    );

    info!(uid = %ctx.uid, nick = %nick, mask = %mask, realname = %realname, "Client registered");
    Ok(())
}
