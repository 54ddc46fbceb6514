use std::time::{Duration, Instant};

use crate::game::config::STARTING_LIVES;
use crate::game::{GameEvent, GameState, Theme};

/// Summary shown once the last life is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalSummary {
    pub score: u32,
    pub level: u32,
}

/// Everything the screen shows outside the board, driven by engine events
#[derive(Debug, Clone)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub lives: u32,
    pub speed_label: &'static str,
    pub theme: Theme,
    pub power_up_visible: bool,
    pub pause_visible: bool,
    pub summary: Option<FinalSummary>,
    /// Short-lived notice such as a new record
    pub banner: Option<String>,
    pub games_played: u32,
    pub start_time: Instant,
    pub elapsed_time: Duration,
}

impl Hud {
    pub fn new(state: &GameState) -> Self {
        Self {
            score: state.score,
            level: state.level(),
            high_score: state.high_score,
            lives: state.lives,
            speed_label: state.speed_label(),
            theme: state.theme(),
            power_up_visible: state.power_up_active(),
            pause_visible: state.is_paused(),
            summary: None,
            banner: None,
            games_played: 0,
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
        }
    }

    /// Refresh the elapsed session time; frozen once the game is over
    pub fn update(&mut self) {
        if self.summary.is_none() {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    /// Reset for a new session, keeping the games-played count
    pub fn on_session(&mut self, state: &GameState) {
        let games_played = self.games_played;
        *self = Self::new(state);
        self.games_played = games_played;
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Started => {
                self.start_time = Instant::now();
                self.elapsed_time = Duration::ZERO;
                self.summary = None;
                self.banner = None;
            }
            GameEvent::Tick {
                score,
                level,
                lives,
                speed_label,
            } => {
                self.score = score;
                self.level = level;
                self.lives = lives.min(STARTING_LIVES);
                self.speed_label = speed_label;
            }
            GameEvent::ScoreChanged { score, level } => {
                self.score = score;
                self.level = level;
            }
            GameEvent::HighScoreBeaten(high_score) => {
                if self.high_score < high_score && self.banner.is_none() {
                    self.banner = Some("New high score!".to_string());
                }
                self.high_score = high_score;
            }
            GameEvent::LifeLost { lives } => {
                self.lives = lives.min(STARTING_LIVES);
                self.power_up_visible = false;
            }
            GameEvent::PowerUpChanged(active) => {
                self.power_up_visible = active;
                if active {
                    self.speed_label = "Boosted";
                }
            }
            GameEvent::ThemeChanged(theme) => {
                self.theme = theme;
            }
            GameEvent::PauseChanged(paused) => {
                self.pause_visible = paused;
            }
            GameEvent::GameEnded { score, level } => {
                self.games_played += 1;
                self.summary = Some(FinalSummary { score, level });
                self.pause_visible = false;
                self.power_up_visible = false;
            }
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
