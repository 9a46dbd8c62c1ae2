//! Scripted transport and fixtures for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::{json, Value};
use store::{Credential, MemoryStore, Role};

use crate::error::ApiError;
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

enum Reply {
    Status(u16, Value),
    Network,
    Gated(oneshot::Receiver<(u16, Value)>),
}

#[derive(Default)]
struct Script {
    replies: HashMap<(Method, String), VecDeque<Reply>>,
    sent: Vec<ApiRequest>,
}

/// Transport answering from a per-route queue of canned replies.
///
/// Unscripted routes answer 404.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.script
            .borrow_mut()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, Reply::Status(status, body));
        self
    }

    pub fn fail(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Reply::Network);
        self
    }

    /// Hold the reply until the returned sender fires.
    pub fn gate(&self, method: Method, path: &str) -> oneshot::Sender<(u16, Value)> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Reply::Gated(rx));
        tx
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.script.borrow().sent.clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.script
            .borrow()
            .sent
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let reply = {
            let mut script = self.script.borrow_mut();
            script.sent.push(request.clone());
            script
                .replies
                .get_mut(&(request.method, request.path.clone()))
                .and_then(VecDeque::pop_front)
        };
        match reply {
            None => Ok(ApiResponse {
                status: 404,
                body: json!({ "detail": "Not found." }),
            }),
            Some(Reply::Status(status, body)) => Ok(ApiResponse { status, body }),
            Some(Reply::Network) => Err(ApiError::Transport("connection refused".into())),
            Some(Reply::Gated(rx)) => match rx.await {
                Ok((status, body)) => Ok(ApiResponse { status, body }),
                Err(_) => Err(ApiError::Transport("reply dropped".into())),
            },
        }
    }
}

pub async fn logged_in(role: Role) -> Session<MemoryStore> {
    let session = Session::new(MemoryStore::new());
    session
        .establish(&Credential::new("token-1", "refresh-1", Some(role)))
        .await;
    session
}

pub fn logged_out() -> Session<MemoryStore> {
    Session::new(MemoryStore::new())
}
