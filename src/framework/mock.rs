//! # Mock Clients
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of by a running actor. Use it to test one actor
//! against scripted neighbours, e.g. the order actor's checkout against a user actor that
//! returns a fixed cart and a product actor that runs out of stock.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, scripted replies | real store |
//! | **Error injection** | `return_err` | needs a matching state |
//! | **Use case** | logic *around* a client | the actor itself or the full platform |
//!
//! Expectations are answered strictly in the order they were registered. A request that
//! does not match the next expectation (wrong kind or wrong id) panics the mock task,
//! which the caller observes as [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use storefront::framework::mock::MockClient;
//! use storefront::framework::FrameworkError;
//! use storefront::model::{User, UserId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<User>::new();
//!     mock.expect_get(UserId(1)).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(UserId(1)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For asserting on the request payloads themselves, [`create_mock_client`] returns the
//! raw receiver and the `expect_*` helpers pull typed requests off it.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// An expected request and the reply to give it.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;
type ActionLog<T> = Arc<Mutex<Vec<(<T as ActorEntity>::Id, <T as ActorEntity>::Action)>>>;

fn lock<V>(shared: &Mutex<V>) -> MutexGuard<'_, V> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn reply<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

/// A client backed by scripted replies.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    actions: ActionLog<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();
        let actions: ActionLog<T> = Arc::new(Mutex::new(Vec::new()));
        let log = actions.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Get for unexpected id");
                        reply(respond_to, response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        reply(respond_to, response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        reply(respond_to, response);
                    }
                    (
                        ResourceRequest::Action {
                            id,
                            action,
                            respond_to,
                        },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Action for unexpected id");
                        lock(&log).push((id, action));
                        reply(respond_to, response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            actions,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Drains the actions received so far, oldest first, for asserting on payloads.
    pub fn take_actions(&self) -> Vec<(T::Id, T::Action)> {
        std::mem::take(&mut *lock(&self.actions))
    }

    /// Panics if any expectation is still pending.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        assert!(
            remaining == 0,
            "Not all expectations were met. {remaining} remaining"
        );
    }
}

/// Completes an expectation with the reply the mock should give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T>>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        lock(&self.expectations).push_back(expectation);
    }
}

/// Creates a client and the receiver its requests land on.
///
/// Lower level than [`MockClient`]: the test pulls each request off the receiver with
/// one of the `expect_*` helpers, asserts on it, and answers it by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size.max(1));
    (ResourceClient::new(sender), receiver)
}

/// Next request if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u32,
        label: String,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Count,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("shelf error")]
    struct ShelfError;

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = u32;
        type Create = String;
        type Update = ();
        type Action = ShelfAction;
        type ActionResult = usize;
        type Context = ();
        type Error = ShelfError;

        fn from_create_params(id: u32, label: String) -> Result<Self, Self::Error> {
            Ok(Self { id, label })
        }

        async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _action: ShelfAction, _ctx: &()) -> Result<usize, Self::Error> {
            Ok(0)
        }
    }

    fn shelf(id: u32, label: &str) -> Shelf {
        Shelf {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client_replies_in_registration_order() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_create().return_ok(7);
        mock.expect_get(7).return_ok(Some(shelf(7, "top")));
        mock.expect_action(7).return_ok(3);
        mock.expect_list().return_ok(vec![shelf(7, "top")]);

        let client = mock.client();
        assert_eq!(client.create("top".into()).await.unwrap(), 7);
        assert_eq!(client.get(7).await.unwrap().unwrap().label, "top");
        assert_eq!(client.perform_action(7, ShelfAction::Count).await.unwrap(), 3);
        assert_eq!(client.list().await.unwrap().len(), 1);

        let actions = mock.take_actions();
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], (7, ShelfAction::Count)));
        assert!(mock.take_actions().is_empty());

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_injects_errors() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_action(1).return_err(FrameworkError::ActorClosed);

        let result = mock.client().perform_action(1, ShelfAction::Count).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
    }

    #[tokio::test]
    async fn test_unexpected_request_drops_the_reply() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    async fn test_raw_receiver_helpers() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let task = tokio::spawn(async move { client.get(5).await });
        let (id, respond_to) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 5);
        respond_to.send(Ok(Some(shelf(5, "low")))).unwrap();

        let fetched = task.await.unwrap().unwrap();
        assert_eq!(fetched, Some(shelf(5, "low")));
    }
}
