use crate::command::Command;
use async_trait::async_trait;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// 单条规则失败（字段路径 + 说明）
///
/// 序列化友好，便于接口层按字段渲染错误。
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    pub field: String,
    pub message: String,
}

impl RuleFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 命令校验器（CommandValidator）
///
/// 按命令类型绑定的规则集，由上层提供实现并在装配期注入
/// [`ValidationDecorator`](crate::decorators::ValidationDecorator)。
/// - 返回空列表表示通过；
/// - 失败列表保持规则声明顺序；
/// - 规则的编写方式不属于本 crate 的关注点。
#[async_trait]
pub trait CommandValidator<C>: Send + Sync
where
    C: Command,
{
    async fn validate(&self, cmd: &C, token: &CancellationToken) -> Vec<RuleFailure>;
}
