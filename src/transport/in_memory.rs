use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::yield_now;

use crate::protocol::Message;
use crate::transport::Transport;

/// Pair of queues standing in for a connection, for tests and local play.
pub struct InMemoryTransport {
    recv_queue: Arc<Mutex<VecDeque<Message>>>,
    send_queue: Arc<Mutex<VecDeque<Message>>>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }

    fn pop(&self) -> Option<Message> {
        self.recv_queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        if Arc::strong_count(&self.send_queue) == 1 {
            return Err(anyhow::anyhow!("Channel closed"));
        }
        let mut queue = self.send_queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.push_back(msg);
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            if let Some(msg) = self.pop() {
                return Ok(msg);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                // the peer may have pushed a last frame just before dropping
                return self.pop().ok_or_else(|| anyhow::anyhow!("Channel closed"));
            }
            yield_now().await;
        }
    }
}
