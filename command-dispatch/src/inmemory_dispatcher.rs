use crate::{
    command::Command, dispatcher::CommandDispatcher, error::DispatchError,
    registry::HandlerRegistry,
};
use async_trait::async_trait;
use std::any::{TypeId, type_name, type_name_of_val};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 基于内存注册表的 CommandDispatcher 实现
/// - 构造时持有解析后备存储（[`HandlerRegistry`]），整个生命周期不变
/// - 运行时以类型擦除（Any）方式进行调度，并在调用端还原返回值
pub struct InMemoryDispatcher {
    registry: Arc<HandlerRegistry>,
}

impl InMemoryDispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl CommandDispatcher for InMemoryDispatcher {
    async fn dispatch<C>(
        &self,
        cmd: C,
        token: &CancellationToken,
    ) -> Result<C::Result, DispatchError>
    where
        C: Command,
    {
        let key = (TypeId::of::<C>(), TypeId::of::<C::Result>());

        let Some(f) = self.registry.resolve(&key) else {
            tracing::warn!(
                command = C::NAME,
                result = type_name::<C::Result>(),
                "no handler registered"
            );
            return Err(DispatchError::HandlerNotFound {
                command: C::NAME,
                result: type_name::<C::Result>(),
            });
        };

        tracing::debug!(command = C::NAME, "dispatching");

        let out = (f)(Box::new(cmd), token).await?;

        match out.downcast::<C::Result>() {
            Ok(result) => Ok(*result),
            Err(e) => Err(DispatchError::TypeMismatch {
                expected: type_name::<C::Result>(),
                found: type_name_of_val(&e),
            }),
        }
    }
}
