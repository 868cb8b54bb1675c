//! Checkout Flow
//!
//! Orchestrates one submission attempt: tokenize the mounted card input,
//! POST the token to the payment endpoint, interpret the response, and
//! run at most one secondary-authentication round trip.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::gateway::{GatewayError, GatewayProvider, GatewaySession, PaymentApi};
use crate::model::{Disposition, PaymentRequest};

/// UI-observable lifecycle of a submission attempt.
///
/// One explicit state machine instead of independent booleans:
/// `Idle → Submitting → (AwaitingAuth) → Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Nothing in flight
    #[default]
    Idle,

    /// Tokenizing or waiting on the payment endpoint
    Submitting,

    /// Waiting on the secondary-authentication challenge
    AwaitingAuth,
}

impl CheckoutPhase {
    /// True while a submission is in flight (the submit control is
    /// disabled for the whole span, including the auth sub-phase)
    pub fn is_busy(self) -> bool {
        !matches!(self, CheckoutPhase::Idle)
    }
}

/// Terminal success shapes of one submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Backend completed the charge directly
    Completed,

    /// Charge completed after the secondary-authentication challenge
    CompletedAfterAuth,
}

type PhaseObserver = Box<dyn Fn(CheckoutPhase)>;

/// One checkout widget's worth of state.
///
/// Holds the injected [`PaymentApi`], the gateway session once
/// [`initialize`](CheckoutFlow::initialize) has run, and the current
/// [`CheckoutPhase`]. Phase transitions are pushed to a registered
/// observer so a reactive UI can mirror them.
pub struct CheckoutFlow<A: PaymentApi> {
    api: A,
    config: CheckoutConfig,
    session: RefCell<Option<Rc<dyn GatewaySession>>>,
    phase: Cell<CheckoutPhase>,
    observer: RefCell<Option<PhaseObserver>>,
}

impl<A: PaymentApi> CheckoutFlow<A> {
    pub fn new(api: A, config: CheckoutConfig) -> Self {
        Self {
            api,
            config,
            session: RefCell::new(None),
            phase: Cell::new(CheckoutPhase::Idle),
            observer: RefCell::new(None),
        }
    }

    /// Register a callback invoked on every phase transition
    pub fn on_phase_change(&self, observer: impl Fn(CheckoutPhase) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Current phase
    pub fn phase(&self) -> CheckoutPhase {
        self.phase.get()
    }

    /// Whether the gateway session is connected and mounted
    pub fn is_ready(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Run the initialization protocol against the given provider.
    ///
    /// On failure the session stays unset and later submissions are
    /// rejected with [`CheckoutError::NotReady`]; there is no retry.
    pub async fn initialize(
        &self,
        provider: &dyn GatewayProvider,
    ) -> std::result::Result<(), GatewayError> {
        match provider.connect(&self.config).await {
            Ok(session) => {
                *self.session.borrow_mut() = Some(session);
                tracing::debug!("gateway session connected");
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "gateway initialization failed");
                Err(err)
            }
        }
    }

    /// Submit one payment attempt.
    ///
    /// Strictly sequential: tokenize, POST, interpret, optionally
    /// confirm. The phase is restored to `Idle` on every exit path.
    pub async fn submit(&self) -> Result<CheckoutOutcome> {
        let session = match self.session.borrow().as_ref() {
            Some(session) => Rc::clone(session),
            None => {
                tracing::error!("submit called before the gateway session is ready");
                return Err(CheckoutError::NotReady);
            }
        };

        if self.phase.get().is_busy() {
            tracing::warn!("submit called while a submission is in flight");
            return Err(CheckoutError::Busy);
        }

        self.set_phase(CheckoutPhase::Submitting);
        let _idle = IdleGuard { flow: self };

        let token = session
            .create_payment_token()
            .await
            .map_err(|e| CheckoutError::Tokenization(e.message))?;
        tracing::debug!(token = %token, "card input tokenized");

        let request = PaymentRequest::new(&self.config, &token);
        let response = self
            .api
            .submit_payment(&request)
            .await
            .map_err(|e| CheckoutError::Transport(e.0))?;
        tracing::debug!(status = %response.status, "payment endpoint responded");

        match response.disposition() {
            Disposition::Completed => Ok(CheckoutOutcome::Completed),
            Disposition::RequiresAuth(secret) => {
                self.set_phase(CheckoutPhase::AwaitingAuth);
                session
                    .confirm_card_payment(&secret)
                    .await
                    .map_err(|e| CheckoutError::SecondaryAuth(e.message))?;
                Ok(CheckoutOutcome::CompletedAfterAuth)
            }
            Disposition::Failed => {
                tracing::warn!(status = %response.status, "payment declined");
                Err(CheckoutError::Declined)
            }
        }
    }

    fn set_phase(&self, phase: CheckoutPhase) {
        self.phase.set(phase);
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(phase);
        }
    }
}

/// Restores `Idle` when a submission attempt leaves scope, whatever the
/// exit path.
struct IdleGuard<'a, A: PaymentApi> {
    flow: &'a CheckoutFlow<A>,
}

impl<A: PaymentApi> Drop for IdleGuard<'_, A> {
    fn drop(&mut self) {
        self.flow.set_phase(CheckoutPhase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::result::Result;
    use std::task::{Context, Poll};

    use async_trait::async_trait;

    use crate::gateway::{PaymentApi, TransportError};
    use crate::model::{PaymentResponse, PaymentToken};

    #[derive(Default)]
    struct SessionLog {
        tokenize_calls: usize,
        confirmed: Vec<String>,
    }

    struct MockSession {
        token_id: &'static str,
        tokenize_error: Option<GatewayError>,
        confirm_error: Option<GatewayError>,
        log: Rc<RefCell<SessionLog>>,
    }

    impl MockSession {
        fn ok(log: Rc<RefCell<SessionLog>>) -> Self {
            Self {
                token_id: "pm_test_123",
                tokenize_error: None,
                confirm_error: None,
                log,
            }
        }
    }

    #[async_trait(?Send)]
    impl GatewaySession for MockSession {
        async fn create_payment_token(&self) -> Result<PaymentToken, GatewayError> {
            self.log.borrow_mut().tokenize_calls += 1;
            match &self.tokenize_error {
                Some(err) => Err(err.clone()),
                None => Ok(PaymentToken::new(self.token_id)),
            }
        }

        async fn confirm_card_payment(&self, client_secret: &str) -> Result<(), GatewayError> {
            self.log.borrow_mut().confirmed.push(client_secret.to_string());
            match &self.confirm_error {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    struct MockProvider {
        session: Rc<MockSession>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl GatewayProvider for MockProvider {
        async fn connect(
            &self,
            _config: &CheckoutConfig,
        ) -> Result<Rc<dyn GatewaySession>, GatewayError> {
            if self.fail {
                return Err(GatewayError::new("failed to load Stripe.js"));
            }
            Ok(Rc::clone(&self.session) as Rc<dyn GatewaySession>)
        }
    }

    /// Pends once, then resolves. Gives an interleaved submit a chance
    /// to observe the in-flight phase.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct MockApi {
        response: Result<PaymentResponse, TransportError>,
        yield_first: bool,
        requests: Rc<RefCell<Vec<PaymentRequest>>>,
    }

    #[async_trait(?Send)]
    impl PaymentApi for MockApi {
        async fn submit_payment(
            &self,
            request: &PaymentRequest,
        ) -> Result<PaymentResponse, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            if self.yield_first {
                YieldOnce(false).await;
            }
            self.response.clone()
        }
    }

    struct Harness {
        flow: CheckoutFlow<MockApi>,
        session: Rc<MockSession>,
        requests: Rc<RefCell<Vec<PaymentRequest>>>,
        log: Rc<RefCell<SessionLog>>,
        phases: Rc<RefCell<Vec<CheckoutPhase>>>,
    }

    fn harness(
        session: MockSession,
        response: Result<PaymentResponse, TransportError>,
    ) -> Harness {
        let log = Rc::clone(&session.log);
        let session = Rc::new(session);
        let requests = Rc::new(RefCell::new(Vec::new()));
        let phases = Rc::new(RefCell::new(Vec::new()));

        let api = MockApi {
            response,
            yield_first: false,
            requests: Rc::clone(&requests),
        };
        let flow = CheckoutFlow::new(api, CheckoutConfig::default());

        let seen = Rc::clone(&phases);
        flow.on_phase_change(move |phase| seen.borrow_mut().push(phase));

        Harness {
            flow,
            session,
            requests,
            log,
            phases,
        }
    }

    async fn connect(h: &Harness) {
        let provider = MockProvider {
            session: Rc::clone(&h.session),
            fail: false,
        };
        h.flow.initialize(&provider).await.unwrap();
    }

    fn completed() -> PaymentResponse {
        PaymentResponse {
            status: "completed".into(),
            ..Default::default()
        }
    }

    fn challenge(secret: &str) -> PaymentResponse {
        PaymentResponse {
            status: "pending".into(),
            requires_action: true,
            stripe_status: Some("requires_action".into()),
            client_secret: Some(secret.into()),
        }
    }

    #[tokio::test]
    async fn submit_without_a_session_sends_nothing() {
        let h = harness(
            MockSession::ok(Rc::new(RefCell::new(SessionLog::default()))),
            Ok(completed()),
        );

        let result = h.flow.submit().await;

        assert_eq!(result, Err(CheckoutError::NotReady));
        assert!(h.requests.borrow().is_empty());
        assert!(h.phases.borrow().is_empty());
        assert_eq!(h.flow.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn failed_initialization_leaves_the_flow_not_ready() {
        let h = harness(
            MockSession::ok(Rc::new(RefCell::new(SessionLog::default()))),
            Ok(completed()),
        );
        let provider = MockProvider {
            session: Rc::clone(&h.session),
            fail: true,
        };

        assert!(h.flow.initialize(&provider).await.is_err());
        assert!(!h.flow.is_ready());
        assert_eq!(h.flow.submit().await, Err(CheckoutError::NotReady));
    }

    #[tokio::test]
    async fn completed_response_skips_the_challenge() {
        let h = harness(
            MockSession::ok(Rc::new(RefCell::new(SessionLog::default()))),
            Ok(completed()),
        );
        connect(&h).await;

        let outcome = h.flow.submit().await.unwrap();

        assert_eq!(outcome, CheckoutOutcome::Completed);
        assert!(h.log.borrow().confirmed.is_empty());
        assert_eq!(
            *h.phases.borrow(),
            vec![CheckoutPhase::Submitting, CheckoutPhase::Idle]
        );
    }

    #[tokio::test]
    async fn tokenization_failure_makes_no_network_call() {
        let log = Rc::new(RefCell::new(SessionLog::default()));
        let session = MockSession {
            tokenize_error: Some(GatewayError::new("Your card number is incomplete.")),
            ..MockSession::ok(Rc::clone(&log))
        };
        let h = harness(session, Ok(completed()));
        connect(&h).await;

        let result = h.flow.submit().await;

        assert_eq!(
            result,
            Err(CheckoutError::Tokenization(
                "Your card number is incomplete.".into()
            ))
        );
        assert!(h.requests.borrow().is_empty());
        assert_eq!(h.flow.phase(), CheckoutPhase::Idle);
        assert_eq!(
            *h.phases.borrow(),
            vec![CheckoutPhase::Submitting, CheckoutPhase::Idle]
        );
    }

    #[tokio::test]
    async fn challenge_confirms_with_the_exact_secret() {
        let h = harness(
            MockSession::ok(Rc::new(RefCell::new(SessionLog::default()))),
            Ok(challenge("sec_abc")),
        );
        connect(&h).await;

        let outcome = h.flow.submit().await.unwrap();

        assert_eq!(outcome, CheckoutOutcome::CompletedAfterAuth);
        assert_eq!(h.log.borrow().confirmed, vec!["sec_abc".to_string()]);
        assert_eq!(
            *h.phases.borrow(),
            vec![
                CheckoutPhase::Submitting,
                CheckoutPhase::AwaitingAuth,
                CheckoutPhase::Idle,
            ]
        );
    }

    #[tokio::test]
    async fn failed_confirmation_carries_the_sdk_message() {
        let log = Rc::new(RefCell::new(SessionLog::default()));
        let session = MockSession {
            confirm_error: Some(GatewayError::new("The authentication was cancelled.")),
            ..MockSession::ok(Rc::clone(&log))
        };
        let h = harness(session, Ok(challenge("sec_abc")));
        connect(&h).await;

        let result = h.flow.submit().await;

        assert_eq!(
            result,
            Err(CheckoutError::SecondaryAuth(
                "The authentication was cancelled.".into()
            ))
        );
        assert_eq!(h.log.borrow().confirmed, vec!["sec_abc".to_string()]);
        assert_eq!(h.flow.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn unrecognized_responses_decline() {
        let shapes = vec![
            PaymentResponse {
                status: "failed".into(),
                ..Default::default()
            },
            PaymentResponse::default(),
            // Challenge shape with the secret missing
            PaymentResponse {
                client_secret: None,
                ..challenge("sec_abc")
            },
            // Challenge shape with the wrong secondary-auth status
            PaymentResponse {
                stripe_status: Some("processing".into()),
                ..challenge("sec_abc")
            },
        ];

        for response in shapes {
            let h = harness(
                MockSession::ok(Rc::new(RefCell::new(SessionLog::default()))),
                Ok(response),
            );
            connect(&h).await;

            assert_eq!(h.flow.submit().await, Err(CheckoutError::Declined));
            assert!(h.log.borrow().confirmed.is_empty());
            assert_eq!(h.flow.phase(), CheckoutPhase::Idle);
        }
    }

    #[tokio::test]
    async fn transport_failure_restores_idle() {
        let h = harness(
            MockSession::ok(Rc::new(RefCell::new(SessionLog::default()))),
            Err(TransportError("connection refused".into())),
        );
        connect(&h).await;

        let result = h.flow.submit().await;

        assert_eq!(
            result,
            Err(CheckoutError::Transport("connection refused".into()))
        );
        assert_eq!(
            *h.phases.borrow(),
            vec![CheckoutPhase::Submitting, CheckoutPhase::Idle]
        );
    }

    #[tokio::test]
    async fn request_body_uses_the_configured_constants() {
        let h = harness(
            MockSession::ok(Rc::new(RefCell::new(SessionLog::default()))),
            Ok(completed()),
        );
        connect(&h).await;

        h.flow.submit().await.unwrap();

        let requests = h.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, 1000);
        assert_eq!(requests[0].currency, "usd");
        assert_eq!(requests[0].method, "visa/mastercard");
        assert_eq!(requests[0].payment_method_id, "pm_test_123");
    }

    #[tokio::test]
    async fn resubmission_while_in_flight_is_rejected() {
        let log = Rc::new(RefCell::new(SessionLog::default()));
        let session = Rc::new(MockSession::ok(Rc::clone(&log)));
        let requests = Rc::new(RefCell::new(Vec::new()));

        let api = MockApi {
            response: Ok(completed()),
            yield_first: true,
            requests: Rc::clone(&requests),
        };
        let flow = CheckoutFlow::new(api, CheckoutConfig::default());
        let provider = MockProvider {
            session,
            fail: false,
        };
        flow.initialize(&provider).await.unwrap();

        let (first, second) = tokio::join!(flow.submit(), flow.submit());

        assert_eq!(first, Ok(CheckoutOutcome::Completed));
        assert_eq!(second, Err(CheckoutError::Busy));
        assert_eq!(requests.borrow().len(), 1);
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
    }
}
