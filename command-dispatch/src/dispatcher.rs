use crate::{command::Command, error::DispatchError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// 命令分发器（CommandDispatcher）
///
/// - 以命令的具体类型与其声明的返回类型为键定位处理器并调用；
/// - 对每次调用不持有可变状态，可被多方无限并发使用；
/// - 新增命令/处理器只需注册，无需改动分发器本身。
#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    /// 定位并调用命令对应的（可能已被装饰的）处理器
    ///
    /// - `cmd`：具体命令实例，被本次调用消费；
    /// - `token`：取消信号，沿装饰链原样传入终端处理器。
    async fn dispatch<C>(
        &self,
        cmd: C,
        token: &CancellationToken,
    ) -> Result<C::Result, DispatchError>
    where
        C: Command;
}
