//! Scripted transport for lifecycle tests. Each accepted connect hands the
//! test the driving side of the link so it can inject frames, errors, and
//! closes without a network stack.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};

use super::{TransportEvent, TransportFactory, TransportLink};
use crate::types::{RealtimeError, Result};

const CHANNEL_CAPACITY: usize = 64;

pub(crate) struct MockLink {
    pub events: mpsc::Sender<TransportEvent>,
    pub outbound: Option<mpsc::Receiver<String>>,
    pub shutdown: Option<oneshot::Receiver<()>>,
}

pub(crate) struct MockFactory {
    /// Scripted outcomes per connect attempt, front first; `true` accepts.
    /// An exhausted script accepts everything.
    outcomes: Mutex<VecDeque<bool>>,
    links: Mutex<Vec<MockLink>>,
    connects: AtomicUsize,
    unidirectional: bool,
}

impl MockFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(VecDeque::new()),
            links: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            unidirectional: false,
        })
    }

    pub fn unidirectional() -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(VecDeque::new()),
            links: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            unidirectional: true,
        })
    }

    /// Queue `n` rejected connect attempts ahead of the next accept.
    pub fn reject_next(&self, n: usize) {
        let mut outcomes = self.outcomes.lock().unwrap();
        for _ in 0..n {
            outcomes.push_back(false);
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Event injector for the `i`-th accepted connection.
    pub fn events(&self, i: usize) -> mpsc::Sender<TransportEvent> {
        self.links.lock().unwrap()[i].events.clone()
    }

    /// Takes the outbound frame receiver of the `i`-th accepted connection.
    pub fn take_outbound(&self, i: usize) -> mpsc::Receiver<String> {
        self.links.lock().unwrap()[i].outbound.take().unwrap()
    }

    /// Takes the shutdown receiver of the `i`-th accepted connection.
    pub fn take_shutdown(&self, i: usize) -> oneshot::Receiver<()> {
        self.links.lock().unwrap()[i].shutdown.take().unwrap()
    }

    pub fn accepted(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

impl TransportFactory for MockFactory {
    fn connect(&self, _url: &str) -> BoxFuture<'static, Result<TransportLink>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let accept = self.outcomes.lock().unwrap().pop_front().unwrap_or(true);
        if !accept {
            return Box::pin(async { Err(RealtimeError::Connection("connection refused".into())) });
        }

        let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (outbound_tx, outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        self.links.lock().unwrap().push(MockLink {
            events: event_tx,
            outbound: Some(outbound_rx),
            shutdown: Some(shutdown_rx),
        });

        let sender = if self.unidirectional {
            None
        } else {
            Some(outbound_tx)
        };
        Box::pin(async move {
            Ok(TransportLink {
                sender,
                shutdown: Some(shutdown_tx),
                events: event_rx,
            })
        })
    }
}
