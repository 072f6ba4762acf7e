/// 命令（Command）
///
/// 表达“意图”的一次性请求，携带声明的返回类型。
/// - 不可变值对象：由调用方构造，被 `dispatch` 消费一次后丢弃；
/// - 路由仅依赖具体类型，不要求值相等性；
/// - 建议保持语义化的“动宾结构”命名，如 `CreateUser`、`CloseOrder`。
///
/// 关联项：
/// - `NAME`：命令的稳定名称，用于日志与错误信息。避免依赖 `type_name::<T>()`。
/// - `Result`：命令执行的返回类型；无返回值的命令使用 `()`。
pub trait Command: Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 命令执行的返回类型
    type Result: Send + 'static;
}
