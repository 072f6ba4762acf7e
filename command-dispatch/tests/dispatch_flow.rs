use async_trait::async_trait;
use command_dispatch::command::Command;
use command_dispatch::command_handler::CommandHandler;
use command_dispatch::decorators::{CancellationDecorator, ValidationDecorator};
use command_dispatch::dispatcher::CommandDispatcher;
use command_dispatch::error::DispatchError;
use command_dispatch::validation::{CommandValidator, RuleFailure};
use command_dispatch::{HandlerRegistry, InMemoryDispatcher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct OpenAccount {
    id: String,
}

impl Command for OpenAccount {
    const NAME: &'static str = "OpenAccount";
    type Result = String;
}

struct OpenAccountHandler {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CommandHandler<OpenAccount> for OpenAccountHandler {
    async fn handle(
        &self,
        cmd: OpenAccount,
        _token: &CancellationToken,
    ) -> Result<String, DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(cmd.id)
    }
}

struct IdNotEmpty {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CommandValidator<OpenAccount> for IdNotEmpty {
    async fn validate(&self, cmd: &OpenAccount, _token: &CancellationToken) -> Vec<RuleFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if cmd.id.is_empty() {
            vec![RuleFailure::new("id", "id must not be empty")]
        } else {
            vec![]
        }
    }
}

struct Probes {
    handler_calls: Arc<AtomicUsize>,
    validator_calls: Arc<AtomicUsize>,
}

impl Probes {
    fn new() -> Self {
        Self {
            handler_calls: Arc::new(AtomicUsize::new(0)),
            validator_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn handler(&self) -> OpenAccountHandler {
        OpenAccountHandler {
            calls: self.handler_calls.clone(),
        }
    }

    fn validator(&self) -> IdNotEmpty {
        IdNotEmpty {
            calls: self.validator_calls.clone(),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancellation_outermost_short_circuits_before_validation() {
    let probes = Probes::new();
    let chain =
        CancellationDecorator::new(ValidationDecorator::new(probes.handler(), probes.validator()));

    let token = CancellationToken::new();
    token.cancel();

    let err = chain
        .handle(OpenAccount { id: "acc-1".into() }, &token)
        .await
        .unwrap_err();

    match err {
        DispatchError::Canceled { command } => assert_eq!(command, "OpenAccount"),
        other => panic!("unexpected error: {other:?}"),
    }
    // 取消在最外层：校验与业务处理都被跳过
    assert_eq!(probes.validator_calls.load(Ordering::SeqCst), 0);
    assert_eq!(probes.handler_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn validation_outermost_runs_rules_first_even_when_cancelled() {
    let probes = Probes::new();
    let chain =
        ValidationDecorator::new(CancellationDecorator::new(probes.handler()), probes.validator());

    let token = CancellationToken::new();
    token.cancel();

    // 非法命令：校验先于取消预检执行并短路
    let err = chain
        .handle(OpenAccount { id: "".into() }, &token)
        .await
        .unwrap_err();
    match err {
        DispatchError::ValidationFailed { failures, .. } => {
            assert_eq!(failures, vec![RuleFailure::new("id", "id must not be empty")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(probes.validator_calls.load(Ordering::SeqCst), 1);

    // 合法命令：校验通过后才轮到取消预检
    let err = chain
        .handle(OpenAccount { id: "acc-1".into() }, &token)
        .await
        .unwrap_err();
    match err {
        DispatchError::Canceled { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(probes.validator_calls.load(Ordering::SeqCst), 2);
    assert_eq!(probes.handler_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn decorated_dispatch_end_to_end() {
    let probes = Probes::new();
    let registry = Arc::new(HandlerRegistry::new());
    registry
        .register::<OpenAccount, _>(Arc::new(CancellationDecorator::new(
            ValidationDecorator::new(probes.handler(), probes.validator()),
        )))
        .unwrap();

    let dispatcher = InMemoryDispatcher::new(registry);
    let token = CancellationToken::new();

    let opened = dispatcher
        .dispatch(OpenAccount { id: "acc-1".into() }, &token)
        .await
        .unwrap();
    assert_eq!(opened, "acc-1");

    let err = dispatcher
        .dispatch(OpenAccount { id: "".into() }, &token)
        .await
        .unwrap_err();
    match err {
        DispatchError::ValidationFailed { command, failures } => {
            assert_eq!(command, "OpenAccount");
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].field, "id");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(probes.handler_calls.load(Ordering::SeqCst), 1);
}

#[allow(dead_code)]
#[derive(Debug)]
struct CloseAccount {
    id: String,
}

impl Command for CloseAccount {
    const NAME: &'static str = "CloseAccount";
    type Result = ();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unregistered_command_fails_with_handler_not_found() {
    let registry = Arc::new(HandlerRegistry::new());
    let probes = Probes::new();
    registry
        .register::<OpenAccount, _>(Arc::new(probes.handler()))
        .unwrap();

    let dispatcher = InMemoryDispatcher::new(registry);
    let token = CancellationToken::new();

    let err = dispatcher
        .dispatch(CloseAccount { id: "acc-1".into() }, &token)
        .await
        .unwrap_err();
    match err {
        DispatchError::HandlerNotFound { command, .. } => assert_eq!(command, "CloseAccount"),
        other => panic!("unexpected error: {other:?}"),
    }
}
