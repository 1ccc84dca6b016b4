use crate::variants::variant_trait::Variant;

/// Options fixed when a [`GameEngine`](crate::engine::game_engine::GameEngine)
/// is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub variant: Variant,
    /// Refuse new moves once a result other than `*` is set. Navigation and
    /// notation export keep working.
    pub block_moves_after_result: bool,
}

impl EngineConfig {
    pub fn with_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }
}
