//! Asynchronous action creators.
//!
//! A fetch is fire-and-forget from the caller's point of view: it starts by
//! dispatching a `*Requested` action, awaits the injected API, and finishes
//! by dispatching the outcome. Each fetch carries a [`RequestId`] so stores
//! can drop responses that arrive after a newer request was started.

use std::future::Future;

use thiserror::Error;
use vitrine_core::{Account, Notification, Order};

use crate::flux::{Action, FluxContext, FluxError, RequestId, StoreReader};

/// Failure reported by an injected API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("session expired")]
    SessionExpired,
}

/// Source of the signed-in account's details.
pub trait AccountApi {
    /// Fetch the current account. `Ok(None)` means the visitor is anonymous.
    fn account_details(&self) -> impl Future<Output = Result<Option<Account>, ApiError>>;
}

/// Source of the signed-in account's order history.
pub trait OrdersApi {
    /// Fetch the most recent order. `Ok(None)` means none was placed yet.
    fn last_order(&self) -> impl Future<Output = Result<Option<Order>, ApiError>>;
}

/// Fetch the current account and feed the outcome into the stores.
///
/// When the fetch fails and is still the latest request, an error
/// notification is queued in the same notification pass as the failure.
///
/// # Errors
///
/// Returns a [`FluxError`] if one of the dispatches is refused, which
/// happens when this is driven from inside a subscriber callback.
pub async fn fetch_account_details<A>(
    context: &FluxContext,
    api: &A,
) -> Result<RequestId, FluxError>
where
    A: AccountApi + ?Sized,
{
    let actions: FetchActions<Option<Account>> = FetchActions {
        fetch: "account details",
        requested: |request| Action::AccountDetailsRequested { request },
        received: |request, account| Action::AccountDetailsReceived { request, account },
        failed: |request, reason| Action::AccountDetailsFailed { request, reason },
        latest: |reader| reader.account().latest_request(),
        failure_notice: "Could not load your account",
    };
    run_fetch(context, &actions, || api.account_details()).await
}

/// Fetch the account's last order and feed the outcome into the stores.
///
/// Failures are reported the same way as [`fetch_account_details`].
///
/// # Errors
///
/// Returns a [`FluxError`] if one of the dispatches is refused.
pub async fn fetch_user_last_order<A>(
    context: &FluxContext,
    api: &A,
) -> Result<RequestId, FluxError>
where
    A: OrdersApi + ?Sized,
{
    let actions: FetchActions<Option<Order>> = FetchActions {
        fetch: "last order",
        requested: |request| Action::LastOrderRequested { request },
        received: |request, order| Action::LastOrderReceived { request, order },
        failed: |request, reason| Action::LastOrderFailed { request, reason },
        latest: |reader| reader.orders().latest_request(),
        failure_notice: "Could not load your last order",
    };
    run_fetch(context, &actions, || api.last_order()).await
}

/// The actions one kind of fetch dispatches, and where its store keeps the
/// latest request.
struct FetchActions<T> {
    fetch: &'static str,
    requested: fn(RequestId) -> Action,
    received: fn(RequestId, T) -> Action,
    failed: fn(RequestId, String) -> Action,
    latest: fn(&StoreReader<'_>) -> Option<RequestId>,
    failure_notice: &'static str,
}

async fn run_fetch<T, F>(
    context: &FluxContext,
    actions: &FetchActions<T>,
    call: impl FnOnce() -> F,
) -> Result<RequestId, FluxError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let request = context.next_request_id();
    context.dispatch((actions.requested)(request))?;

    match call().await {
        Ok(value) => {
            context.dispatch((actions.received)(request, value))?;
        }
        Err(error) => {
            tracing::warn!(
                fetch = actions.fetch,
                request = request.as_u64(),
                %error,
                "fetch failed"
            );
            let is_latest = context.read(|reader| (actions.latest)(reader) == Some(request))?;
            context.batch(|context| {
                context.dispatch((actions.failed)(request, error.to_string()))?;
                if is_latest {
                    context.dispatch(Action::PushNotification(Notification::error(format!(
                        "{}: {error}",
                        actions.failure_notice
                    ))))?;
                }
                Ok::<_, FluxError>(())
            })?;
        }
    }

    Ok(request)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use tokio::sync::oneshot;
    use rust_decimal::Decimal;
    use vitrine_core::{AccountId, CurrencyCode, FulfillmentStatus, OrderId, Role};

    use super::*;
    use crate::flux::{StoreId, StoreSet};

    fn account(id: &str, roles: Vec<Role>) -> Account {
        Account {
            id: AccountId::parse(id).unwrap(),
            email: format!("{id}@example.com"),
            roles,
        }
    }

    struct Fixed(Result<Option<Account>, ApiError>);

    impl AccountApi for Fixed {
        async fn account_details(&self) -> Result<Option<Account>, ApiError> {
            self.0.clone()
        }
    }

    /// Each call waits for the next queued response channel.
    struct Deferred<T> {
        pending: RefCell<Vec<oneshot::Receiver<T>>>,
    }

    impl<T> Default for Deferred<T> {
        fn default() -> Self {
            Self {
                pending: RefCell::new(Vec::new()),
            }
        }
    }

    impl<T> Deferred<T> {
        fn queue(&self) -> oneshot::Sender<T> {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push(rx);
            tx
        }

        async fn next(&self) -> Result<T, ApiError> {
            let rx = self.pending.borrow_mut().remove(0);
            rx.await
                .map_err(|_| ApiError::Unavailable("dropped".to_string()))
        }
    }

    impl AccountApi for Deferred<Option<Account>> {
        async fn account_details(&self) -> Result<Option<Account>, ApiError> {
            self.next().await
        }
    }

    impl OrdersApi for Deferred<Option<Order>> {
        async fn last_order(&self) -> Result<Option<Order>, ApiError> {
            self.next().await
        }
    }

    fn order(number: &str) -> Order {
        Order {
            id: OrderId::parse(number).unwrap(),
            number: format!("#{number}"),
            total: Decimal::new(1999, 2),
            currency: CurrencyCode::USD,
            fulfillment: FulfillmentStatus::Fulfilled,
        }
    }

    #[tokio::test]
    async fn test_fetch_applies_account() {
        let ctx = FluxContext::new();
        let api = Fixed(Ok(Some(account("a1", vec![Role::Admin]))));

        fetch_account_details(&ctx, &api).await.unwrap();

        ctx.read(|reader| {
            assert!(reader.account().is_authorized(&[Role::Admin]));
            assert!(!reader.account().is_loading());
        })
        .unwrap();
    }

    #[tokio::test]
    async fn test_fetch_anonymous() {
        let ctx = FluxContext::new();
        fetch_account_details(&ctx, &Fixed(Ok(None))).await.unwrap();

        ctx.read(|reader| assert!(reader.account().account().is_none()))
            .unwrap();
    }

    #[tokio::test]
    async fn test_failure_pushes_single_notification_pass() {
        let ctx = FluxContext::new();
        let passes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&passes);
        let _sub = ctx.subscribe(
            StoreSet::of(StoreId::Account).with(StoreId::NotificationQueue),
            move |_| counter.set(counter.get() + 1),
        );

        fetch_account_details(&ctx, &Fixed(Err(ApiError::SessionExpired)))
            .await
            .unwrap();

        // One pass for the request, one for failure plus notification.
        assert_eq!(passes.get(), 2);
        let notification = ctx.read(|reader| reader.pop_notification())
            .unwrap()
            .unwrap();
        assert_eq!(
            notification.message,
            "Could not load your account: session expired"
        );
        ctx.read(|reader| assert!(!reader.account().is_loading()))
            .unwrap();
    }

    #[tokio::test]
    async fn test_out_of_order_completion_keeps_latest() {
        let ctx = FluxContext::new();
        let api = Deferred::<Option<Account>>::default();
        let first_tx = api.queue();
        let second_tx = api.queue();

        let first = fetch_account_details(&ctx, &api);
        let second = fetch_account_details(&ctx, &api);
        // Respond once both requests are in flight, newest first.
        let responses = async {
            tokio::task::yield_now().await;
            second_tx
                .send(Some(account("new", vec![Role::Customer])))
                .unwrap();
            first_tx
                .send(Some(account("old", vec![Role::Admin])))
                .unwrap();
        };

        let (first, second, ()) = tokio::join!(first, second, responses);
        assert!(first.unwrap().as_u64() < second.unwrap().as_u64());

        ctx.read(|reader| {
            let store = reader.account();
            assert_eq!(store.account().unwrap().id.as_str(), "new");
            assert!(!store.is_authorized(&[Role::Admin]));
        })
        .unwrap();
    }

    #[tokio::test]
    async fn test_stale_failure_is_silent() {
        let ctx = FluxContext::new();
        let api = Deferred::<Option<Account>>::default();
        let first_tx = api.queue();
        let second_tx = api.queue();

        let first = fetch_account_details(&ctx, &api);
        let second = fetch_account_details(&ctx, &api);
        let responses = async {
            tokio::task::yield_now().await;
            second_tx.send(None).unwrap();
            drop(first_tx);
        };

        let (first, second, ()) = tokio::join!(first, second, responses);
        first.unwrap();
        second.unwrap();

        ctx.read(|reader| assert!(reader.notifications().is_empty()))
            .unwrap();
    }

    #[tokio::test]
    async fn test_last_order_out_of_order_completion_keeps_latest() {
        let ctx = FluxContext::new();
        let api = Deferred::<Option<Order>>::default();
        let first_tx = api.queue();
        let second_tx = api.queue();

        let first = fetch_user_last_order(&ctx, &api);
        let second = fetch_user_last_order(&ctx, &api);
        let responses = async {
            tokio::task::yield_now().await;
            second_tx.send(Some(order("1043"))).unwrap();
            first_tx.send(Some(order("1001"))).unwrap();
        };

        let (first, second, ()) = tokio::join!(first, second, responses);
        assert!(first.unwrap() < second.unwrap());

        ctx.read(|reader| {
            let store = reader.orders();
            assert_eq!(store.last_order().unwrap().number, "#1043");
            assert!(!store.is_loading());
            // The account slice is untouched by order fetches.
            assert!(reader.account().latest_request().is_none());
        })
        .unwrap();
    }

    #[tokio::test]
    async fn test_last_order_failure_notifies() {
        let ctx = FluxContext::new();
        let api = Deferred::<Option<Order>>::default();
        drop(api.queue());

        fetch_user_last_order(&ctx, &api).await.unwrap();

        let notification = ctx.read(|reader| reader.pop_notification())
            .unwrap()
            .unwrap();
        assert_eq!(
            notification.message,
            "Could not load your last order: service unavailable: dropped"
        );
        ctx.read(|reader| assert!(reader.orders().last_order().is_none()))
            .unwrap();
    }

    #[tokio::test]
    async fn test_stale_last_order_failure_is_silent() {
        let ctx = FluxContext::new();
        let api = Deferred::<Option<Order>>::default();
        let first_tx = api.queue();
        let second_tx = api.queue();

        let first = fetch_user_last_order(&ctx, &api);
        let second = fetch_user_last_order(&ctx, &api);
        let responses = async {
            tokio::task::yield_now().await;
            second_tx.send(None).unwrap();
            drop(first_tx);
        };

        let (first, second, ()) = tokio::join!(first, second, responses);
        first.unwrap();
        second.unwrap();

        ctx.read(|reader| {
            assert!(reader.notifications().is_empty());
            assert!(reader.orders().last_order().is_none());
        })
        .unwrap();
    }
}
