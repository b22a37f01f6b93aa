use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use leaderboard_shared::{CompetitionSnapshot, Identifier};
use leaderboard_viewer::ws::TungsteniteTransport;
use leaderboard_viewer::{Changed, ConnectionManager, ReconnectPolicy, RenderSink, Synchronizer};

/// Each render call: the competitions drawn and the highlighted cells.
type Renders = Arc<Mutex<Vec<(Vec<CompetitionSnapshot>, Option<Changed>)>>>;

#[derive(Clone, Default)]
struct RecordingSink {
    renders: Renders,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, snapshots: &[&CompetitionSnapshot], changed: Option<&Changed>) {
        self.renders.lock().unwrap().push((
            snapshots.iter().map(|s| (*s).clone()).collect(),
            changed.cloned(),
        ));
    }
}

/// Every connection gets one snapshot where user "a" has the connection's
/// sequence number as score, one garbage frame, then a close.
async fn ws_handler(ws: WebSocketUpgrade, State(connections): State<Arc<AtomicUsize>>) -> Response {
    let n = connections.fetch_add(1, Ordering::SeqCst) + 1;
    ws.on_upgrade(move |socket| push_and_close(socket, n))
}

async fn push_and_close(mut socket: WebSocket, n: usize) {
    let snapshot = serde_json::json!({
        "CompetitionID": 42,
        "Users": [
            { "id": "a", "score": n.to_string() },
            { "id": "b", "score": 5 },
        ]
    });
    let _ = socket.send(Message::Text(snapshot.to_string().into())).await;
    let _ = socket.send(Message::Text("{not json".into())).await;
    let _ = socket.send(Message::Close(None)).await;
}

/// Helper: start an actual TCP server for WebSocket testing.
/// Returns the address and the connection counter.
async fn start_ws_server() -> (SocketAddr, Arc<AtomicUsize>) {
    let connections = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(connections.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, connections)
}

#[tokio::test]
async fn viewer_reconnects_and_highlights_changes_across_connections() {
    let (addr, connections) = start_ws_server().await;
    let sink = RecordingSink::default();
    let renders = sink.renders.clone();

    let mut manager = ConnectionManager::new(
        format!("ws://{addr}/ws"),
        TungsteniteTransport,
        ReconnectPolicy::fixed(Duration::from_millis(50)),
        Synchronizer::new(sink),
    );
    let handle = tokio::spawn(async move { manager.run().await });

    // Initial empty render plus one render per connection.
    tokio::time::timeout(Duration::from_secs(10), async {
        while renders.lock().unwrap().len() < 4 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("viewer should keep reconnecting");

    assert!(!handle.is_finished());
    handle.abort();
    assert!(connections.load(Ordering::SeqCst) >= 3);

    let renders = renders.lock().unwrap().clone();
    assert!(renders[0].0.is_empty());
    assert_eq!(renders[0].1, None);

    // First snapshot draws the table with nothing highlighted.
    assert_eq!(renders[1].0.len(), 1);
    assert_eq!(renders[1].0[0].competition_id, Identifier::from(42u64));
    assert_eq!(renders[1].1, None);

    // After each reconnect only "a" changed; "b" kept its score.
    for (snapshots, changed) in &renders[2..4] {
        assert_eq!(snapshots.len(), 1);
        let changed = changed.as_ref().expect("score of a changed");
        assert_eq!(changed.competition_id, Identifier::from(42u64));
        assert!(changed.user_ids.contains(&Identifier::from("a")));
        assert!(!changed.user_ids.contains(&Identifier::from("b")));
    }
}
