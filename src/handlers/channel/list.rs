//! LIST command handler.

use super::super::{Context, Handler, HandlerResult};
use crate::state::{Channel, Matrix};
use tinyirc_proto::{MessageRef, Response};

/// Handler for LIST command.
///
/// `LIST [<channel>{,<channel>}]`. Unknown channels in the filter are skipped.
pub struct ListHandler;

impl Handler for ListHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let nick = ctx.nick();
        let matrix: &Matrix = ctx.matrix;

        let entries: Vec<Vec<String>> = match msg.arg(0).filter(|f| !f.is_empty()) {
            Some(filter) => filter
                .split(',')
                .filter_map(|name| matrix.channels.get(name))
                .map(|chan| list_entry(matrix, chan, &nick))
                .collect(),
            None => matrix
                .channels
                .iter()
                .map(|chan| list_entry(matrix, chan, &nick))
                .collect(),
        };

        for entry in entries {
            ctx.reply(Response::RPL_LIST, entry);
        }
        ctx.reply(Response::RPL_LISTEND, vec![nick, "End of /LIST".to_string()]);
        Ok(())
    }
}

/// `<nick> <channel> <count> :[op @<operator>, limit <n>|unlimited] <topic>`
fn list_entry(matrix: &Matrix, chan: &Channel, nick: &str) -> Vec<String> {
    let limit = chan
        .limit()
        .map_or_else(|| "unlimited".to_string(), |n| n.to_string());
    let topic = chan.topic().map_or("", |t| t.text.as_str());
    let info = format!(
        "[op @{}, limit {}] {}",
        matrix.nick_of(chan.operator()),
        limit,
        topic
    );

    vec![
        nick.to_string(),
        chan.name().to_string(),
        chan.member_count().to_string(),
        info.trim_end().to_string(),
    ]
}
