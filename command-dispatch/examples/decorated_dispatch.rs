use async_trait::async_trait;
use command_dispatch::command::Command;
use command_dispatch::command_handler::CommandHandler;
use command_dispatch::decorators::{CancellationDecorator, ValidationDecorator};
use command_dispatch::dispatcher::CommandDispatcher;
use command_dispatch::error::DispatchError;
use command_dispatch::validation::{CommandValidator, RuleFailure};
use command_dispatch::{HandlerRegistry, InMemoryDispatcher};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
struct OpenAccount {
    id: String,
}

impl Command for OpenAccount {
    const NAME: &'static str = "OpenAccount";
    type Result = String;
}

struct OpenAccountHandler;

#[async_trait]
impl CommandHandler<OpenAccount> for OpenAccountHandler {
    async fn handle(
        &self,
        cmd: OpenAccount,
        _token: &CancellationToken,
    ) -> Result<String, DispatchError> {
        println!("OpenAccount: id={}", cmd.id);
        Ok(cmd.id)
    }
}

struct IdNotEmpty;

#[async_trait]
impl CommandValidator<OpenAccount> for IdNotEmpty {
    async fn validate(&self, cmd: &OpenAccount, _token: &CancellationToken) -> Vec<RuleFailure> {
        if cmd.id.is_empty() {
            vec![RuleFailure::new("id", "id must not be empty")]
        } else {
            vec![]
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("command_dispatch=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 装饰链在装配期显式嵌套：取消预检在外，校验在内
    let registry = Arc::new(HandlerRegistry::new());
    registry.register::<OpenAccount, _>(Arc::new(CancellationDecorator::new(
        ValidationDecorator::new(OpenAccountHandler, IdNotEmpty),
    )))?;

    let dispatcher = InMemoryDispatcher::new(registry);
    let token = CancellationToken::new();

    let opened = dispatcher
        .dispatch(OpenAccount { id: "acc-1".into() }, &token)
        .await?;
    println!("opened: {opened}");

    if let Err(DispatchError::ValidationFailed { failures, .. }) = dispatcher
        .dispatch(OpenAccount { id: "".into() }, &token)
        .await
    {
        for f in failures {
            eprintln!("validation failure: {}: {}", f.field, f.message);
        }
    }

    // 调用方自行派生“超时”信号：到期后取消，再分发即被预检短路
    let deadline = CancellationToken::new();
    let trigger = deadline.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    if let Err(DispatchError::Canceled { command }) = dispatcher
        .dispatch(OpenAccount { id: "acc-2".into() }, &deadline)
        .await
    {
        eprintln!("canceled before dispatch: {command}");
    }

    Ok(())
}
