use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::config::ClientConfig;
use crate::connect_fetch::{ApiClient, ApiRequest, ApiResponse, Transport};
use crate::error::FetchError;
use crate::state::AppState;
use crate::storage::TokenStore;

pub const TEST_API_BASE: &str = "http://api.test/api/";

/// Records every request and answers from a queue, in order.
#[derive(Default)]
pub struct MockTransport {
    requests: RefCell<Vec<ApiRequest>>,
    replies: RefCell<VecDeque<Result<ApiResponse, FetchError>>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(ApiResponse { status, body: body.to_string() }));
    }

    pub fn fail(&self, err: FetchError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, FetchError>> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no reply queued".to_string())));
        future::ready(reply).boxed_local()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    token: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        Self { token: RefCell::new(Some(token.to_string())) }
    }

    pub fn stored(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.stored()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

pub struct Fixture {
    pub state: AppState,
    pub client: ApiClient,
    pub transport: Rc<MockTransport>,
    pub store: Rc<MemoryStore>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(MemoryStore::default())
    }

    pub fn with_token(token: &str) -> Self {
        Self::build(MemoryStore::with_token(token))
    }

    fn build(store: MemoryStore) -> Self {
        let config = ClientConfig {
            api_base: TEST_API_BASE.to_string(),
            ..ClientConfig::default()
        };
        let transport = Rc::new(MockTransport::default());
        let store = Rc::new(store);
        let state = AppState::new(&config, transport.clone(), store.clone());
        let client = ApiClient::new(&config.api_base, transport.clone(), state.session.clone());
        Self { state, client, transport, store }
    }
}
