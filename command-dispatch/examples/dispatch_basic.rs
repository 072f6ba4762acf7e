use async_trait::async_trait;
use command_dispatch::command::Command;
use command_dispatch::command_handler::CommandHandler;
use command_dispatch::dispatcher::CommandDispatcher;
use command_dispatch::error::DispatchError;
use command_dispatch::{HandlerRegistry, InMemoryDispatcher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct CreateUser {
    name: String,
}

impl Command for CreateUser {
    const NAME: &'static str = "CreateUser";
    type Result = ();
}

struct CreateUserHandler;

#[async_trait]
impl CommandHandler<CreateUser> for CreateUserHandler {
    async fn handle(
        &self,
        cmd: CreateUser,
        _token: &CancellationToken,
    ) -> Result<(), DispatchError> {
        println!("CreateUser: name={}", cmd.name);
        Ok(())
    }
}

#[derive(Debug)]
struct DeleteUser {
    id: u32,
}

impl Command for DeleteUser {
    const NAME: &'static str = "DeleteUser";
    type Result = ();
}

struct DeleteUserHandler;

#[async_trait]
impl CommandHandler<DeleteUser> for DeleteUserHandler {
    async fn handle(
        &self,
        cmd: DeleteUser,
        _token: &CancellationToken,
    ) -> Result<(), DispatchError> {
        println!("DeleteUser: id={}", cmd.id);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(HandlerRegistry::new());
    registry.register::<CreateUser, _>(Arc::new(CreateUserHandler))?;
    registry.register::<DeleteUser, _>(Arc::new(DeleteUserHandler))?;

    let dispatcher = InMemoryDispatcher::new(registry);
    let token = CancellationToken::new();

    dispatcher
        .dispatch(
            CreateUser {
                name: "Alice".into(),
            },
            &token,
        )
        .await?;
    dispatcher.dispatch(DeleteUser { id: 42 }, &token).await?;

    // 未注册的命令 -> 返回 HandlerNotFound 错误
    #[allow(dead_code)]
    #[derive(Debug)]
    struct UpdateUser {
        id: u32,
        name: String,
    }

    impl Command for UpdateUser {
        const NAME: &'static str = "UpdateUser";
        type Result = ();
    }

    if let Err(DispatchError::HandlerNotFound { command, .. }) = dispatcher
        .dispatch(
            UpdateUser {
                id: 7,
                name: "Eve".into(),
            },
            &token,
        )
        .await
    {
        eprintln!("HandlerNotFound as expected for command: {}", command);
    }
    Ok(())
}
