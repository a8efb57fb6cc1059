use actix_web::{rt, web, HttpRequest, HttpResponse};
use actix_ws::{Message, MessageStream, Session};
use futures_util::StreamExt;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use tokio::sync::broadcast;

/// Fan-out hub for admin notifications. Best-effort only: no delivery
/// guarantee, no replay, lagged sessions skip messages.
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<BroadcastMessage>,
}

#[derive(Clone, Debug)]
pub struct BroadcastMessage {
    pub channel: String,
    pub data: Value,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastMessage> {
        self.tx.subscribe()
    }

    pub fn broadcast(&self, channel: &str, data: Value) {
        // A send error just means no session is connected
        let _ = self.tx.send(BroadcastMessage {
            channel: channel.to_string(),
            data,
        });
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize, Debug)]
struct ClientEnvelope {
    #[serde(rename = "type")]
    kind: String,
    channel: Option<String>,
}

fn wants(subscriptions: &HashSet<String>, msg: &BroadcastMessage) -> bool {
    subscriptions.contains(&msg.channel)
}

pub async fn ws_route(
    req: HttpRequest,
    body: web::Payload,
    hub: web::Data<Broadcaster>,
) -> actix_web::Result<HttpResponse> {
    let (response, session, msg_stream) = actix_ws::handle(&req, body)?;
    rt::spawn(run_session(session, msg_stream, hub.get_ref().clone()));
    Ok(response)
}

async fn run_session(mut session: Session, mut stream: MessageStream, hub: Broadcaster) {
    let mut rx = hub.subscribe();
    // Channels this client opted into; nothing is delivered before a subscribe
    let mut subscriptions: HashSet<String> = HashSet::new();

    loop {
        tokio::select! {
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ClientEnvelope>(&text) {
                        Ok(envelope) => match (envelope.kind.as_str(), envelope.channel) {
                            ("subscribe", Some(channel)) => {
                                debug!("ws client subscribed to {}", channel);
                                subscriptions.insert(channel);
                            }
                            ("unsubscribe", Some(channel)) => {
                                subscriptions.remove(&channel);
                            }
                            (other, _) => {
                                debug!("ignoring ws message of type {}", other);
                            }
                        },
                        Err(e) => {
                            debug!("Malformed ws message: {}", e);
                        }
                    }
                }
                Some(Ok(Message::Ping(bytes))) => {
                    if session.pong(&bytes).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("ws protocol error: {}", e);
                    break;
                }
            },
            result = rx.recv() => match result {
                Ok(msg) => {
                    if wants(&subscriptions, &msg) {
                        let envelope = json!({
                            "type": "notification",
                            "channel": msg.channel,
                            "data": msg.data,
                        });
                        if session.text(envelope.to_string()).await.is_err() {
                            break;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("ws session lagged, skipped {} messages", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    let _ = session.close(None).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsubscribed_session_filters_everything() {
        let subscriptions = HashSet::new();
        let msg = BroadcastMessage {
            channel: "scholarships".to_string(),
            data: json!({"action": "create", "id": 1}),
        };
        assert!(!wants(&subscriptions, &msg));
    }

    #[test]
    fn only_subscribed_channels_pass() {
        let mut subscriptions = HashSet::new();
        subscriptions.insert("jobs".to_string());
        let jobs = BroadcastMessage { channel: "jobs".to_string(), data: json!(1) };
        let blog = BroadcastMessage { channel: "blog_posts".to_string(), data: json!(1) };
        assert!(wants(&subscriptions, &jobs));
        assert!(!wants(&subscriptions, &blog));
    }

    #[test]
    fn broadcast_without_receivers_does_not_panic() {
        let hub = Broadcaster::new();
        hub.broadcast("scholarships", json!({"action": "delete", "id": 9}));
    }

    #[actix_rt::test]
    async fn subscribed_receiver_sees_message() {
        let hub = Broadcaster::new();
        let mut rx = hub.subscribe();
        hub.broadcast("partners", json!({"action": "update", "id": 3}));
        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.channel, "partners");
        assert_eq!(msg.data["id"], 3);
    }

    #[test]
    fn client_envelope_parses_subscribe() {
        let envelope: ClientEnvelope =
            serde_json::from_str(r#"{"type":"subscribe","channel":"scholarships"}"#).unwrap();
        assert_eq!(envelope.kind, "subscribe");
        assert_eq!(envelope.channel.as_deref(), Some("scholarships"));
    }
}
