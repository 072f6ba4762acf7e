use crate::{command::Command, command_handler::CommandHandler, error::DispatchError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// 取消预检装饰器
///
/// 委派前检查取消信号：已取消则立即返回 [`DispatchError::Canceled`]，
/// 内层处理器不会被调用；否则原样传递命令与信号并返回内层结果。
/// 仅做前置检查，不在内层执行期间轮询——长耗时处理器应自行观测信号。
pub struct CancellationDecorator<H> {
    inner: H,
}

impl<H> CancellationDecorator<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for CancellationDecorator<H>
where
    C: Command,
    H: CommandHandler<C>,
{
    async fn handle(&self, cmd: C, token: &CancellationToken) -> Result<C::Result, DispatchError> {
        if token.is_cancelled() {
            return Err(DispatchError::Canceled { command: C::NAME });
        }

        self.inner.handle(cmd, token).await
    }
}
