use crate::{
    command::Command, command_handler::CommandHandler, error::DispatchError,
    validation::CommandValidator,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// 命令校验装饰器
///
/// 委派前执行绑定的 [`CommandValidator`]：
/// - 失败列表非空时返回 [`DispatchError::ValidationFailed`]（携带按序的
///   规则失败），内层处理器不会被调用；
/// - 通过（空列表）时委派内层并原样返回其结果。
///
/// 本装饰器不检查取消信号——即使信号已触发，规则仍会执行；
/// 是否先于校验短路由装饰顺序决定（取消预检放在外层即可）。
pub struct ValidationDecorator<H, V> {
    inner: H,
    validator: V,
}

impl<H, V> ValidationDecorator<H, V> {
    pub fn new(inner: H, validator: V) -> Self {
        Self { inner, validator }
    }
}

#[async_trait]
impl<C, H, V> CommandHandler<C> for ValidationDecorator<H, V>
where
    C: Command,
    H: CommandHandler<C>,
    V: CommandValidator<C>,
{
    async fn handle(&self, cmd: C, token: &CancellationToken) -> Result<C::Result, DispatchError> {
        let failures = self.validator.validate(&cmd, token).await;

        if !failures.is_empty() {
            return Err(DispatchError::ValidationFailed {
                command: C::NAME,
                failures,
            });
        }

        self.inner.handle(cmd, token).await
    }
}
