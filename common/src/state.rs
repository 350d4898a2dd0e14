//! 画面状態（Idle / Loading / Output）とタブ選択

use tracing::debug;

/// 表示フェーズ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Output,
}

/// 入力タブ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputTab {
    #[default]
    Text,
    File,
}

impl InputTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputTab::Text => "text",
            InputTab::File => "file",
        }
    }
}

/// 画面状態
///
/// ローディングと結果表示が同時に見えることはない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    phase: Phase,
    active_tab: InputTab,
}

impl UiState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn loading_visible(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn output_visible(&self) -> bool {
        self.phase == Phase::Output
    }

    pub fn active_tab(&self) -> InputTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: InputTab) {
        self.active_tab = tab;
    }

    /// * → Loading
    pub fn enter_loading(&mut self) {
        debug!(from = ?self.phase, "enter loading");
        self.phase = Phase::Loading;
    }

    /// Loading → Output
    pub fn enter_output(&mut self) {
        debug!(from = ?self.phase, "enter output");
        self.phase = Phase::Output;
    }

    /// * → Idle（タブ選択は維持）
    pub fn reset(&mut self) {
        debug!(from = ?self.phase, "reset to idle");
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = UiState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.loading_visible());
        assert!(!state.output_visible());
        assert_eq!(state.active_tab(), InputTab::Text);
    }

    #[test]
    fn test_transitions_never_show_both() {
        let mut state = UiState::default();

        state.enter_loading();
        assert!(state.loading_visible() && !state.output_visible());

        state.enter_output();
        assert!(!state.loading_visible() && state.output_visible());

        state.enter_loading();
        assert!(state.loading_visible() && !state.output_visible());

        state.reset();
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_tab_is_orthogonal_to_phase() {
        let mut state = UiState::default();
        state.select_tab(InputTab::File);
        state.enter_loading();
        assert_eq!(state.active_tab(), InputTab::File);
        state.reset();
        assert_eq!(state.active_tab(), InputTab::File);
        assert_eq!(InputTab::File.as_str(), "file");
    }
}
