//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listening socket and spawns a Connection task for
//! each incoming client.

use crate::config::LimitsConfig;
use crate::network::Connection;
use crate::state::{MatrixEvent, UidGenerator};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    events: mpsc::Sender<MatrixEvent>,
    limits: LimitsConfig,
    uid_gen: UidGenerator,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(
        addr: SocketAddr,
        events: mpsc::Sender<MatrixEvent>,
        limits: LimitsConfig,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Listener bound");

        Ok(Self {
            listener,
            events,
            limits,
            uid_gen: UidGenerator::new(),
        })
    }

    /// Run the accept loop. Only returns if the listener itself fails.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let uid = self.uid_gen.next();
                    info!(uid = %uid, %addr, "Connection accepted");

                    let connection = Connection::new(uid, stream, addr, self.events.clone(), &self.limits);
                    tokio::spawn(async move {
                        connection.run().await;
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
