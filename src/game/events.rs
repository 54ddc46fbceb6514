use super::state::Theme;

/// Something the UI should react to, emitted by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Session moved from idle to running
    Started,
    /// Summary emitted after every completed tick
    Tick {
        score: u32,
        level: u32,
        lives: u32,
        speed_label: &'static str,
    },
    ScoreChanged { score: u32, level: u32 },
    HighScoreBeaten(u32),
    LifeLost { lives: u32 },
    PowerUpChanged(bool),
    ThemeChanged(Theme),
    PauseChanged(bool),
    GameEnded { score: u32, level: u32 },
}
