use crate::validation::RuleFailure;

/// 统一错误类型（按失败种类区分，便于调用方分流处理）
///
/// - `Canceled` / `ValidationFailed`：调用前置检查未通过；
/// - `HandlerNotFound` / `AlreadyRegistered`：装配期配置错误；
/// - `TypeMismatch`：注册表返回了结构不兼容的条目；
/// - `Handler`：业务处理器自身的失败，对本层不透明、原样上抛。
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("canceled: {command}")]
    Canceled { command: &'static str },

    #[error("validation failed: command={command} ({} failures)", failures.len())]
    ValidationFailed {
        command: &'static str,
        failures: Vec<RuleFailure>,
    },

    #[error("handler not found: command={command}, result={result}")]
    HandlerNotFound {
        command: &'static str,
        result: &'static str,
    },

    #[error("handler already registered: command={command}, result={result}")]
    AlreadyRegistered {
        command: &'static str,
        result: &'static str,
    },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("handler: {0}")]
    Handler(#[from] anyhow::Error),
}

/// 统一 Result 类型别名
pub type DispatchResult<T> = Result<T, DispatchError>;
