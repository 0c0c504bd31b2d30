#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stub_relay_domain::{Header, Question, CLASS_IN};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const UPSTREAM_ID: u16 = 0xAAAA;

#[derive(Clone, Copy)]
pub enum Behaviour {
    /// Answer with one A record, upstream id and every rewritten field set.
    Answer,
    /// Swallow queries without replying.
    Silent,
    /// Reply with a datagram shorter than a header.
    Garbage,
    /// Reply with a datagram larger than the relay reads.
    Oversized,
}

pub struct MockUpstreamServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstreamServer {
    pub async fn start(behaviour: Behaviour) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(behaviour, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_response(behaviour: Behaviour, query: &[u8]) -> Option<Vec<u8>> {
        match behaviour {
            Behaviour::Silent => None,
            Behaviour::Garbage => Some(vec![0xAA, 0xAA, 0x81]),
            Behaviour::Oversized => {
                let mut response = Self::answer(query)?;
                response.resize(2000, 0);
                Some(response)
            }
            Behaviour::Answer => Self::answer(query),
        }
    }

    fn answer(query: &[u8]) -> Option<Vec<u8>> {
        let query_header = Header::decode(query).ok()?;

        let header = Header {
            id: UPSTREAM_ID,
            query_response: true,
            authoritative_answer: true,
            recursion_available: true,
            reserved: 1,
            answer_count: 1,
            authority_count: 1,
            additional_count: 1,
            ..query_header
        };

        let mut response = header.encode().to_vec();
        response.extend_from_slice(&query[12..]);
        response.extend_from_slice(&[
            0xc0, 0x0c,
            0x00, 0x01,
            0x00, 0x01,
            0x00, 0x00, 0x00, 0x3c,
            0x00, 0x04,
            127, 0, 0, 1,
        ]);
        Some(response)
    }
}

impl Drop for MockUpstreamServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn query(id: u16, opcode: u8, name: &str) -> Vec<u8> {
    let header = Header {
        id,
        opcode,
        recursion_desired: true,
        question_count: 1,
        ..Header::default()
    };
    let mut buf = header.encode().to_vec();
    buf.extend(Question::new(name, 1, CLASS_IN).encode().unwrap());
    buf
}
