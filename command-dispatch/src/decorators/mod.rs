//! 命令装饰器（decorators）
//!
//! 以相同的处理器契约包装内层处理器，叠加横切行为：
//! - `CancellationDecorator`：委派前检查取消信号，已取消则短路；
//! - `ValidationDecorator`：委派前执行命令校验，未通过则短路。
//!
//! 装饰链在装配期显式嵌套构造，外层先执行，运行期不再调整顺序。
//!
pub mod cancellation;
pub mod validation;

pub use cancellation::CancellationDecorator;
pub use validation::ValidationDecorator;
