//! 全局常量定义

/// Content shaping constants
pub mod shaping {
    /// Per-article character budget on the premium comparison path.
    pub const DEFAULT_PREMIUM_BUDGET: usize = 6000;

    /// Marker appended when a cut could not land on a natural breakpoint.
    pub const ELLIPSIS_MARKER: &str = "...";

    /// Breakpoints earlier than `NUMERATOR / DENOMINATOR` of the budget are ignored.
    pub const BREAKPOINT_NUMERATOR: usize = 4;
    pub const BREAKPOINT_DENOMINATOR: usize = 5;
}

/// Generation parameters per orchestration path
pub mod generation {
    pub const COMPARISON_PREMIUM_TEMPERATURE: f32 = 0.7;
    pub const COMPARISON_PREMIUM_MAX_TOKENS: u32 = 4000;

    pub const COMPARISON_FREE_TEMPERATURE: f32 = 0.7;
    pub const COMPARISON_FREE_MAX_TOKENS: u32 = 3000;

    pub const CHAT_TEMPERATURE: f32 = 0.7;
    pub const CHAT_MAX_TOKENS: u32 = 1000;
}

/// UI 相关常量
pub mod ui {
    /// 错误预览最大长度
    pub const ERROR_PREVIEW_LENGTH: usize = 500;
}
