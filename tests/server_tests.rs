use std::sync::Arc;

use broadside::{
    game_error, serve_connection, Coord, GameError, GameService, InMemoryTransport, Message,
    Phase, RemoteGame, Request, Response, ShipSpec, TcpTransport, Transport, PROTOCOL_VERSION,
    SHIPS, TOTAL_SHIP_CELLS,
};
use tokio::net::TcpListener;

fn standard_fleet() -> Vec<ShipSpec> {
    SHIPS
        .iter()
        .enumerate()
        .map(|(i, def)| ShipSpec::line(*def, Coord::new(i * 2, 0), true))
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_game_over_in_memory_transport() -> anyhow::Result<()> {
    let service = Arc::new(GameService::default());
    let (server_transport, client_transport) = InMemoryTransport::pair();
    let server = tokio::spawn(serve_connection(service.clone(), server_transport));

    let mut client = RemoteGame::connect(client_transport).await?;
    let (game_id, current) = client.new_game().await?;
    assert_eq!(current.index(), 0);

    let placed = client.place_ships(game_id, 0, standard_fleet()).await?;
    assert!(!placed.both_placed);
    let placed = client.place_ships(game_id, 1, standard_fleet()).await?;
    assert!(placed.both_placed);

    let targets: Vec<Coord> = standard_fleet().into_iter().flat_map(|s| s.coords).collect();
    let mut last = None;
    for t in &targets {
        last = Some(client.fire(game_id, 0, t.x as u8, t.y as u8).await?);
    }
    let last = last.unwrap();
    assert!(last.game_over);
    assert_eq!(last.winner.map(|p| p.index()), Some(0));

    let view = client.state(game_id, 0).await?;
    assert_eq!(view.phase, Phase::Finished);
    let hits = view.boards[1]
        .iter()
        .flatten()
        .filter(|c| c.symbol() == 'X')
        .count();
    assert_eq!(hits, TOTAL_SHIP_CELLS);

    client.end_game(game_id).await?;
    assert!(service.registry().is_empty());

    drop(client);
    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn game_errors_reach_the_client() -> anyhow::Result<()> {
    let service = Arc::new(GameService::default());
    let (server_transport, client_transport) = InMemoryTransport::pair();
    tokio::spawn(serve_connection(service, server_transport));

    let mut client = RemoteGame::connect(client_transport).await?;
    let (game_id, _) = client.new_game().await?;

    let err = client.fire(game_id, 0, 0, 0).await.unwrap_err();
    assert_eq!(game_error(&err), Some(&GameError::NotReady));

    client.auto_place(game_id, 0).await?;
    client.auto_place(game_id, 1).await?;

    let err = client.fire(game_id, 7, 0, 0).await.unwrap_err();
    assert_eq!(game_error(&err), Some(&GameError::UnknownPlayer(7)));

    let err = client.fire(game_id, 0, 10, 0).await.unwrap_err();
    assert_eq!(game_error(&err), Some(&GameError::OutOfBounds));

    client.fire(game_id, 0, 3, 3).await?;
    let err = client.fire(game_id, 0, 3, 3).await.unwrap_err();
    assert_eq!(game_error(&err), Some(&GameError::AlreadyFired));

    let err = client.auto_place(game_id, 0).await.unwrap_err();
    assert_eq!(game_error(&err), Some(&GameError::AlreadyPlaced));

    client.end_game(game_id).await?;
    let err = client.state(game_id, 0).await.unwrap_err();
    assert_eq!(game_error(&err), Some(&GameError::NotFound));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn version_mismatch_closes_the_connection() -> anyhow::Result<()> {
    let service = Arc::new(GameService::default());
    let (server_transport, mut client_transport) = InMemoryTransport::pair();
    let server = tokio::spawn(serve_connection(service, server_transport));

    client_transport
        .send(Message::Hello {
            version: PROTOCOL_VERSION + 1,
        })
        .await?;
    let reply = client_transport.recv().await?;
    assert_eq!(
        reply,
        Message::Hello {
            version: PROTOCOL_VERSION
        }
    );
    assert!(server.await?.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn request_before_handshake_is_rejected() -> anyhow::Result<()> {
    let service = Arc::new(GameService::default());
    let (server_transport, mut client_transport) = InMemoryTransport::pair();
    let server = tokio::spawn(serve_connection(service, server_transport));

    client_transport
        .send(Message::Request {
            seq: 0,
            body: Request::NewGame,
        })
        .await?;
    assert!(server.await?.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn responses_echo_the_request_sequence() -> anyhow::Result<()> {
    let service = Arc::new(GameService::default());
    let (server_transport, mut client_transport) = InMemoryTransport::pair();
    tokio::spawn(serve_connection(service, server_transport));

    client_transport
        .send(Message::Hello {
            version: PROTOCOL_VERSION,
        })
        .await?;
    client_transport.recv().await?;

    client_transport
        .send(Message::Request {
            seq: 41,
            body: Request::NewGame,
        })
        .await?;
    match client_transport.recv().await? {
        Message::Response {
            seq: 41,
            body: Response::NewGame { .. },
        } => {}
        other => panic!("unexpected reply {:?}", other),
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_game_over_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let service = Arc::new(GameService::default());

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        serve_connection(service, TcpTransport::new(stream)).await
    });

    let transport = TcpTransport::connect(addr).await?;
    let mut client = RemoteGame::connect(transport).await?;
    let (game_id, _) = client.new_game().await?;
    client.auto_place(game_id, 0).await?;
    let placed = client.auto_place(game_id, 1).await?;
    assert!(placed.both_placed);

    let result = client.fire(game_id, 0, 4, 4).await?;
    assert_eq!(result.agent_shots.len(), 1);
    assert_eq!(result.current_player.index(), 0);

    drop(client);
    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_frame_is_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        let mut transport = TcpTransport::new(stream);
        transport.recv().await
    });

    let mut client = TcpTransport::connect(addr).await?;
    client.send_raw(&(64u32 << 20).to_be_bytes()).await?;

    let err = server.await?.unwrap_err();
    assert!(err.to_string().contains("too large"));
    Ok(())
}
