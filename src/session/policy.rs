//! 对话策略状态机
//!
//! 把原先写在规划器提示词里的两条约束落到代码里：
//! 1. 每个用户轮次至多一次工具调用（begin_turn 重置预算，超额即 PolicyViolation）
//! 2. 结账必须先「播报摘要并获得用户确认」：Idle → AwaitingConfirmation → CheckedOut，
//!    只有 AwaitingConfirmation 状态接受 checkout_cart；状态外的结账以领域错误
//!    （数据而非异常）返回，让规划器能道歉并补播摘要。

use crate::config::PolicySection;
use crate::core::AgentError;

/// 结账流程阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// 尚未播报结账摘要
    Idle,
    /// 已播报摘要，等待（或已获得）用户明确确认
    AwaitingConfirmation,
    /// 订单已生成，终态
    CheckedOut,
}

/// 会话策略：轮次预算 + 结账门
#[derive(Debug)]
pub struct ConversationPolicy {
    stage: CheckoutStage,
    require_confirmation: bool,
    max_calls_per_turn: u32,
    calls_this_turn: u32,
}

impl ConversationPolicy {
    pub fn new(cfg: &PolicySection) -> Self {
        Self {
            stage: CheckoutStage::Idle,
            require_confirmation: cfg.require_confirmation,
            max_calls_per_turn: cfg.max_calls_per_turn.max(1),
            calls_this_turn: 0,
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// 新用户轮次开始：重置本轮调用预算
    pub fn begin_turn(&mut self) {
        self.calls_this_turn = 0;
    }

    /// 记一次工具调用；超出本轮预算即拒绝
    pub fn note_call(&mut self, tool: &str) -> Result<(), AgentError> {
        if self.calls_this_turn >= self.max_calls_per_turn {
            return Err(AgentError::PolicyViolation(format!(
                "at most {} tool call(s) per turn, rejected: {}",
                self.max_calls_per_turn, tool
            )));
        }
        self.calls_this_turn += 1;
        Ok(())
    }

    /// 规划器报告：已向用户播报购物车摘要（Idle → AwaitingConfirmation）
    pub fn summary_presented(&mut self) {
        if self.stage == CheckoutStage::Idle {
            tracing::info!("checkout summary presented, awaiting confirmation");
            self.stage = CheckoutStage::AwaitingConfirmation;
        }
    }

    /// 当前状态是否允许结账。返回 Err(领域错误文案)，调用方包成数据返回
    pub fn checkout_allowed(&self) -> Result<(), &'static str> {
        if !self.require_confirmation {
            return Ok(());
        }
        match self.stage {
            CheckoutStage::AwaitingConfirmation => Ok(()),
            CheckoutStage::Idle => Err("Checkout requires a summary and explicit confirmation first"),
            CheckoutStage::CheckedOut => Err("Order already placed for this conversation"),
        }
    }

    /// 结账成功：进入终态
    pub fn checked_out(&mut self) {
        self.stage = CheckoutStage::CheckedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ConversationPolicy {
        ConversationPolicy::new(&PolicySection::default())
    }

    #[test]
    fn test_one_call_per_turn() {
        let mut p = policy();
        p.begin_turn();
        assert!(p.note_call("list_products").is_ok());
        let err = p.note_call("get_product").unwrap_err();
        assert!(matches!(err, AgentError::PolicyViolation(_)));

        // 新轮次重置预算
        p.begin_turn();
        assert!(p.note_call("get_product").is_ok());
    }

    #[test]
    fn test_checkout_gated_on_confirmation() {
        let mut p = policy();
        assert!(p.checkout_allowed().is_err());

        p.summary_presented();
        assert_eq!(p.stage(), CheckoutStage::AwaitingConfirmation);
        assert!(p.checkout_allowed().is_ok());

        p.checked_out();
        assert_eq!(p.stage(), CheckoutStage::CheckedOut);
        assert!(p.checkout_allowed().is_err());
    }

    #[test]
    fn test_gate_can_be_disabled() {
        let mut cfg = PolicySection::default();
        cfg.require_confirmation = false;
        let p = ConversationPolicy::new(&cfg);
        assert!(p.checkout_allowed().is_ok());
    }

    #[test]
    fn test_summary_presented_only_from_idle() {
        let mut p = policy();
        p.summary_presented();
        p.checked_out();
        // 终态后再播摘要不回退状态
        p.summary_presented();
        assert_eq!(p.stage(), CheckoutStage::CheckedOut);
    }
}
