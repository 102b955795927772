#![cfg(feature = "std")]

use std::sync::Arc;

use anyhow::anyhow;
use tokio::net::TcpListener;

use crate::core::{FireResult, GameError, GameView, PlacementResult, Player, ShipSpec};
use crate::protocol::{Message, Request, Response, PROTOCOL_VERSION};
use crate::registry::GameId;
use crate::service::GameService;
use crate::transport::{tcp::TcpTransport, Transport};

/// Answer requests from one peer until it disconnects.
///
/// The first frame must be a `Hello` carrying [`PROTOCOL_VERSION`]; the
/// server echoes its own version either way and drops the connection on a
/// mismatch.
pub async fn serve_connection<T: Transport>(
    service: Arc<GameService>,
    mut transport: T,
) -> anyhow::Result<()> {
    match transport.recv().await? {
        Message::Hello { version } => {
            transport
                .send(Message::Hello {
                    version: PROTOCOL_VERSION,
                })
                .await?;
            if version != PROTOCOL_VERSION {
                log::warn!(
                    "peer speaks protocol {} (expected {}), closing",
                    version,
                    PROTOCOL_VERSION
                );
                return Err(anyhow!(
                    "Protocol version mismatch: peer {} local {}",
                    version,
                    PROTOCOL_VERSION
                ));
            }
        }
        other => return Err(anyhow!("Expected handshake, got {:?}", other)),
    }

    while let Ok(msg) = transport.recv().await {
        let reply = match msg {
            Message::Request { seq, body } => {
                log::trace!("request {}: {:?}", seq, body);
                Message::Response {
                    seq,
                    body: service.handle(body),
                }
            }
            Message::Hello { .. } => Message::Hello {
                version: PROTOCOL_VERSION,
            },
            Message::Response { seq, .. } => {
                return Err(anyhow!("Unexpected response frame from client (seq {})", seq));
            }
        };
        transport.send(reply).await?;
    }
    log::debug!("peer disconnected");
    Ok(())
}

/// Accept TCP connections forever, one task per peer.
pub async fn serve(listener: TcpListener, service: Arc<GameService>) -> anyhow::Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        log::info!("connection from {}", addr);
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_connection(service, TcpTransport::new(stream)).await {
                log::warn!("connection {} ended with error: {}", addr, e);
            }
        });
    }
}

/// Client side of the protocol. Game-level rejections come back as
/// `anyhow` errors wrapping a [`GameError`].
pub struct RemoteGame<T: Transport> {
    transport: T,
    next_seq: u32,
}

impl<T: Transport> RemoteGame<T> {
    /// Perform the version handshake over `transport`.
    pub async fn connect(mut transport: T) -> anyhow::Result<Self> {
        transport
            .send(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => Ok(Self {
                transport,
                next_seq: 0,
            }),
            Message::Hello { version } => Err(anyhow!(
                "Protocol version mismatch: server {} local {}",
                version,
                PROTOCOL_VERSION
            )),
            _ => Err(anyhow!("Unexpected message")),
        }
    }

    async fn call(&mut self, body: Request) -> anyhow::Result<Response> {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.transport.send(Message::Request { seq, body }).await?;
        match self.transport.recv().await? {
            Message::Response { seq: got, body } if got == seq => match body {
                Response::Error(e) => Err(e.into()),
                body => Ok(body),
            },
            Message::Response { seq: got, .. } => {
                Err(anyhow!("Out of order response: expected {} got {}", seq, got))
            }
            _ => Err(anyhow!("Unexpected message")),
        }
    }

    pub async fn new_game(&mut self) -> anyhow::Result<(GameId, Player)> {
        match self.call(Request::NewGame).await? {
            Response::NewGame {
                game_id,
                current_player,
            } => Ok((game_id, current_player)),
            other => Err(unexpected(other)),
        }
    }

    pub async fn place_ships(
        &mut self,
        game_id: GameId,
        player: u8,
        ships: Vec<ShipSpec>,
    ) -> anyhow::Result<PlacementResult> {
        let reply = self
            .call(Request::PlaceShips {
                game_id,
                player,
                ships,
            })
            .await?;
        placement(reply)
    }

    pub async fn auto_place(&mut self, game_id: GameId, player: u8) -> anyhow::Result<PlacementResult> {
        let reply = self.call(Request::AutoPlace { game_id, player }).await?;
        placement(reply)
    }

    pub async fn fire(&mut self, game_id: GameId, player: u8, x: u8, y: u8) -> anyhow::Result<FireResult> {
        match self
            .call(Request::Fire {
                game_id,
                player,
                x,
                y,
            })
            .await?
        {
            Response::Fired(result) => Ok(result),
            other => Err(unexpected(other)),
        }
    }

    pub async fn state(&mut self, game_id: GameId, viewer: u8) -> anyhow::Result<GameView> {
        match self.call(Request::State { game_id, viewer }).await? {
            Response::State(view) => Ok(view),
            other => Err(unexpected(other)),
        }
    }

    pub async fn end_game(&mut self, game_id: GameId) -> anyhow::Result<()> {
        match self.call(Request::EndGame { game_id }).await? {
            Response::Ended => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

fn placement(reply: Response) -> anyhow::Result<PlacementResult> {
    match reply {
        Response::Placed { both_placed, .. } => Ok(PlacementResult { both_placed }),
        other => Err(unexpected(other)),
    }
}

fn unexpected(reply: Response) -> anyhow::Error {
    anyhow!("Unexpected response: {:?}", reply)
}

/// Extract the game-level rejection from a client error, if that is what it was.
pub fn game_error(err: &anyhow::Error) -> Option<&GameError> {
    err.downcast_ref::<GameError>()
}
