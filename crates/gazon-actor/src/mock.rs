//! # Mock Stores
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a FIFO queue of expectations instead of a running actor. It isolates the code
//! under test (usually another actor's hooks) from the stores it depends on, and makes
//! failures such as a closed store easy to inject.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | none, scripted replies | real store |
//! | Error injection | `return_err` | needs a specific state |
//! | Use | testing code *around* a store | testing the store or the whole system |
//!
//! ```rust,ignore
//! let mut products = MockClient::<Product>::new();
//! products
//!     .expect_action(ProductId(5))
//!     .return_ok(ProductActionResult::Restock(12));
//!
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run((users.client().into(), products.client().into())));
//! // ... exercise the order actor ...
//! products.verify();
//! ```
//!
//! Expectations are matched in the order they were registered. A request of the wrong
//! kind, or for a different id or tag, is recorded and reported by [`MockClient::verify`];
//! its caller sees [`FrameworkError::ActorDropped`].
//!
//! For step-by-step control, [`create_mock_client`] returns the raw receiver and the
//! `expect_*` helpers pull individual requests off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    FindByTag {
        tag: T::Tag,
        response: Result<Vec<T>, FrameworkError>,
    },
    Filter {
        response: Result<Vec<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let record = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();
                answer(request, expectation, &record);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_find_by_tag(&mut self, tag: T::Tag) -> QueryExpectationBuilder<T> {
        QueryExpectationBuilder {
            tag: Some(tag),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_filter(&mut self) -> QueryExpectationBuilder<T> {
        QueryExpectationBuilder {
            tag: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if an expectation is still queued or a request did not match.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {}", mismatches.join("; "));
        }
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
    mismatches: &Mutex<Vec<String>>,
) {
    // A mismatch is recorded before the responder is dropped, so the caller's
    // ActorDropped is always observed after the record exists.
    let record = |mismatch: String| mismatches.lock().unwrap().push(mismatch);
    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            match check_id(&id, &want, "get") {
                Ok(()) => drop(respond_to.send(response)),
                Err(mismatch) => record(mismatch),
            }
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => match check_id(&id, &want, "update") {
            Ok(()) => drop(respond_to.send(response)),
            Err(mismatch) => record(mismatch),
        },
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => match check_id(&id, &want, "action") {
            Ok(()) => drop(respond_to.send(response)),
            Err(mismatch) => record(mismatch),
        },
        (
            ResourceRequest::FindByTag { tag, respond_to },
            Some(Expectation::FindByTag { tag: want, response }),
        ) => {
            if tag == want {
                let _ = respond_to.send(response);
            } else {
                record(format!("find_by_tag for {tag:?}, expected {want:?}"));
            }
        }
        (ResourceRequest::Filter { respond_to, .. }, Some(Expectation::Filter { response })) => {
            let _ = respond_to.send(response);
        }
        (request, Some(_)) => {
            record(format!("{} did not match the next expectation", kind(&request)))
        }
        (request, None) => record(format!("{} with no expectation left", kind(&request))),
    }
}

fn check_id<Id: PartialEq + std::fmt::Display>(got: &Id, want: &Id, op: &str) -> Result<(), String> {
    if got == want {
        Ok(())
    } else {
        Err(format!("{op} for {got}, expected {want}"))
    }
}

fn kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
        ResourceRequest::FindByTag { .. } => "find_by_tag",
        ResourceRequest::Filter { .. } => "filter",
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response,
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        self.push(Ok(id));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::Id, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Update {
            id: self.id,
            response,
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.push(Ok(result));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::ActionResult, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response,
        });
    }
}

/// Builder for `find_by_tag` and `filter` expectations.
pub struct QueryExpectationBuilder<T: ActorEntity> {
    tag: Option<T::Tag>,
    expectations: Queue<T>,
}

impl<T: ActorEntity> QueryExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        self.push(Ok(items));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<T>, FrameworkError>) {
        let expectation = match self.tag {
            Some(tag) => Expectation::FindByTag { tag, response },
            None => Expectation::Filter { response },
        };
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: pull each request with one of the `expect_*` helpers
/// below and answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a FindByTag.
pub async fn expect_find_by_tag<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Tag, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindByTag { tag, respond_to }) => Some((tag, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Coupon {
        id: u32,
        code: String,
        redeemed: bool,
    }

    #[derive(Debug)]
    struct CouponCreate {
        code: String,
    }

    #[derive(Debug)]
    struct CouponUpdate;

    #[derive(Debug)]
    enum CouponAction {
        Redeem,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("coupon error")]
    struct CouponError;

    #[async_trait]
    impl ActorEntity for Coupon {
        type Id = u32;
        type Create = CouponCreate;
        type Update = CouponUpdate;
        type Action = CouponAction;
        type ActionResult = bool;
        type Context = ();
        type Tag = bool;
        type Error = CouponError;

        fn from_create_params(id: u32, params: CouponCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                code: params.code,
                redeemed: false,
            })
        }

        fn tag(&self) -> bool {
            self.redeemed
        }

        async fn on_update(&mut self, _: CouponUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: CouponAction, _: &()) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    fn coupon(id: u32, code: &str) -> Coupon {
        Coupon {
            id,
            code: code.to_string(),
            redeemed: false,
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Coupon>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CouponCreate {
                    code: "WELCOME".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.code, "WELCOME");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(coupon(1, "WELCOME")));
        mock.expect_find_by_tag(false)
            .return_ok(vec![coupon(1, "WELCOME")]);
        mock.expect_action(1).return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        let id = client
            .create(CouponCreate {
                code: "WELCOME".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().code, "WELCOME");

        let open = client.find_by_tag(false).await.unwrap();
        assert_eq!(open.len(), 1);

        let redeemed = client.perform_action(1, CouponAction::Redeem).await;
        assert!(matches!(redeemed, Err(FrameworkError::ActorClosed)));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "get for 2, expected 1")]
    async fn test_mock_reports_wrong_id() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        mock.verify();
    }
}
