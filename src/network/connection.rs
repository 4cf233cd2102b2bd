//! Connection handling.
//!
//! One task per client. The task owns the socket: it frames inbound bytes
//! into lines and forwards them to the Matrix actor, and drains the client's
//! mailbox into the socket. It never looks at server state.
//!
//! The mailbox closes when the actor drops its sender (QUIT or SendQ
//! exceeded); the task then flushes what is queued and exits, closing the
//! socket.

use crate::config::LimitsConfig;
use crate::state::{MatrixEvent, Uid};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tinyirc_proto::{DecodedLine, LineCodec, Message};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, instrument, warn};

/// A client connection handler.
pub struct Connection {
    uid: Uid,
    stream: TcpStream,
    addr: SocketAddr,
    events: mpsc::Sender<MatrixEvent>,
    max_line_len: usize,
    sendq: usize,
}

impl Connection {
    /// Create a new connection handler.
    pub fn new(
        uid: Uid,
        stream: TcpStream,
        addr: SocketAddr,
        events: mpsc::Sender<MatrixEvent>,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            uid,
            stream,
            addr,
            events,
            max_line_len: limits.max_line_length,
            sendq: limits.sendq,
        }
    }

    /// Run the connection until either side closes it.
    #[instrument(skip(self), fields(uid = %self.uid, addr = %self.addr), name = "connection")]
    pub async fn run(self) {
        let Self {
            uid,
            stream,
            addr,
            events,
            max_line_len,
            sendq,
        } = self;

        let (mailbox_tx, mut mailbox_rx) = mpsc::channel::<Message>(sendq);
        if events
            .send(MatrixEvent::Connect {
                uid,
                addr,
                sender: mailbox_tx,
            })
            .await
            .is_err()
        {
            return;
        }

        let (read_half, write_half) = stream.into_split();
        let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(max_line_len));
        let mut writer = FramedWrite::new(write_half, LineCodec::with_max_len(max_line_len));
        let mut reading = true;

        loop {
            tokio::select! {
                frame = reader.next(), if reading => {
                    let event = match frame {
                        Some(Ok(DecodedLine::Text(line))) => MatrixEvent::Line { uid, line },
                        Some(Ok(DecodedLine::Overlong { length })) => MatrixEvent::LineTooLong { uid, length },
                        Some(Ok(DecodedLine::Illegal { ch })) => MatrixEvent::IllegalLine { uid, ch },
                        Some(Err(e)) => {
                            debug!(error = %e, "Read error");
                            reading = false;
                            MatrixEvent::Disconnect { uid, reason: e.to_string() }
                        }
                        None => {
                            debug!("Client closed connection");
                            reading = false;
                            MatrixEvent::Disconnect { uid, reason: "Connection closed".to_string() }
                        }
                    };
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
                outgoing = mailbox_rx.recv() => {
                    match outgoing {
                        Some(msg) => {
                            if let Err(e) = writer.send(msg).await {
                                warn!(error = %e, "Write error");
                                if reading {
                                    let _ = events
                                        .send(MatrixEvent::Disconnect { uid, reason: e.to_string() })
                                        .await;
                                }
                                break;
                            }
                        }
                        None => {
                            let _ = writer.flush().await;
                            break;
                        }
                    }
                }
            }
        }

        debug!("Connection task finished");
    }
}
