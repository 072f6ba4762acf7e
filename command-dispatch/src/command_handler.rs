use crate::{command::Command, error::DispatchError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// 命令处理器（CommandHandler）
///
/// - 每个 `(命令, 返回类型)` 对应恰好一个终端处理器；
/// - 装饰器同样实现本 trait，包装一个内层处理器以叠加横切行为；
/// - 取消信号沿调用链原样传递，是否观测由实现自行决定。
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Command,
{
    async fn handle(&self, cmd: C, token: &CancellationToken) -> Result<C::Result, DispatchError>;
}
