use crate::{command::Command, command_handler::CommandHandler, error::DispatchError};
use dashmap::DashMap;
use std::any::{Any, TypeId, type_name, type_name_of_val};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub(crate) type BoxAnySend = Box<dyn Any + Send>;

pub(crate) type HandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<BoxAnySend, DispatchError>> + Send + 'a>>;

pub(crate) type HandlerFn =
    Arc<dyn for<'a> Fn(BoxAnySend, &'a CancellationToken) -> HandlerFuture<'a> + Send + Sync>;

/// 处理器注册表（HandlerRegistry）
///
/// 分发的解析后备存储：
/// - 以 (命令 TypeId, 返回类型 TypeId) 为键，注册期捕获类型擦除的调用闭包；
/// - 同一键只允许一个终端处理器，重复注册在装配期即报错；
/// - 装饰链在注册前显式嵌套构造，注册表存储的即是装饰后的整条链；
/// - 预期生命周期为“装配期写入、执行期只读”，并发读取无需额外同步。
pub struct HandlerRegistry {
    handlers: DashMap<(TypeId, TypeId), (&'static str, HandlerFn)>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器（或已装饰的处理器链）
    pub fn register<C, H>(&self, handler: Arc<H>) -> Result<(), DispatchError>
    where
        C: Command,
        H: CommandHandler<C> + Send + Sync + 'static,
    {
        let key = (TypeId::of::<C>(), TypeId::of::<C::Result>());

        let f: HandlerFn = {
            let handler = handler.clone();

            Arc::new(move |boxed_cmd, token| {
                let handler = handler.clone();

                Box::pin(async move {
                    // 正常情况下这里的 downcast 永远不会失败（键与闭包同一泛型 C）
                    match boxed_cmd.downcast::<C>() {
                        Ok(cmd) => {
                            let result = handler.handle(*cmd, token).await?;
                            Ok(Box::new(result) as BoxAnySend)
                        }
                        Err(e) => Err(DispatchError::TypeMismatch {
                            expected: type_name::<C>(),
                            found: type_name_of_val(&e),
                        }),
                    }
                })
            })
        };

        if self.handlers.contains_key(&key) {
            return Err(DispatchError::AlreadyRegistered {
                command: C::NAME,
                result: type_name::<C::Result>(),
            });
        }

        self.handlers.insert(key, (C::NAME, f));
        tracing::debug!(command = C::NAME, "handler registered");

        Ok(())
    }

    pub(crate) fn resolve(&self, key: &(TypeId, TypeId)) -> Option<HandlerFn> {
        self.handlers.get(key).map(|e| e.value().1.clone())
    }

    /// 获取已注册的命令名列表（只读视图）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| e.value().0).collect()
    }
}
