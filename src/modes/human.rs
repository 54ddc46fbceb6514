use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseEvent,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::clock::Clock;
use crate::game::{GameConfig, GameEngine, GameEvent, GameState, Phase};
use crate::hud::Hud;
use crate::input::{InputAction, InputHandler};
use crate::persistence::HighScoreStore;
use crate::render::{Renderer, ScreenLayout};

/// Frames are polled at roughly 60 Hz; ticks run when the clock says so
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct HumanMode<S: HighScoreStore> {
    engine: GameEngine,
    state: GameState,
    hud: Hud,
    renderer: Renderer,
    input_handler: InputHandler,
    clock: Clock,
    store: S,
    layout: ScreenLayout,
    should_quit: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        let mut engine = GameEngine::new(config);
        let high_score = store.load();
        debug!("loaded high score {high_score}");
        let state = engine.new_session(high_score);
        let hud = Hud::new(&state);
        let layout = ScreenLayout::new(Rect::default(), state.grid_width, state.grid_height);

        Self {
            engine,
            state,
            hud,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            clock: Clock::new(),
            store,
            layout,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!("terminal event error: {err}"),
                        None => self.should_quit = true,
                    }
                }

                // One frame: maybe tick, always redraw
                _ = frame_timer.tick() => {
                    self.on_frame(Instant::now());
                    self.hud.update();

                    let grid = (self.state.grid_width, self.state.grid_height);
                    terminal.draw(|frame| {
                        self.layout = ScreenLayout::new(frame.area(), grid.0, grid.1);
                        self.renderer.render(frame, &self.state, &self.hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.clock.stop();
        Ok(())
    }

    /// Run a simulation step if the clock says one is due
    fn on_frame(&mut self, now: Instant) {
        if !self.clock.poll(now, self.state.tick_interval()) {
            return;
        }

        let result = self.engine.step(&mut self.state);
        self.apply_events(&result.events);

        if result.terminated {
            self.clock.stop();
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                self.handle_action(action);
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let action = self.input_handler.handle_mouse_event(mouse, &self.layout);
        self.handle_action(action);
    }

    fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Steer(direction) => {
                self.engine.steer(&mut self.state, direction);
            }
            InputAction::TogglePause => {
                if let Some(event) = self.engine.toggle_pause(&mut self.state) {
                    self.apply_events(&[event]);
                }
            }
            InputAction::Confirm => match self.state.phase {
                Phase::Idle => self.start_game(),
                Phase::Ended => self.reset_game(),
                Phase::Running | Phase::Paused => {}
            },
            InputAction::Restart => {
                if self.state.phase == Phase::Idle {
                    self.start_game();
                } else {
                    self.reset_game();
                }
            }
            InputAction::Quit => {
                self.should_quit = true;
            }
            InputAction::None => {}
        }
    }

    fn start_game(&mut self) {
        let events = self.engine.start(&mut self.state);
        self.apply_events(&events);
        self.clock.start();
    }

    fn reset_game(&mut self) {
        // The old session must stop ticking before the new one exists
        self.clock.stop();
        let (state, events) = self.engine.restart(self.state.high_score);
        self.state = state;
        self.hud.on_session(&self.state);
        self.apply_events(&events);
        self.clock.start();
        debug!("session restarted, clock epoch {}", self.clock.epoch());
    }

    fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.hud.apply(event);
            match event {
                GameEvent::HighScoreBeaten(high_score) => {
                    if let Err(err) = self.store.save(*high_score) {
                        warn!("could not save high score: {err:#}");
                    }
                }
                GameEvent::GameEnded { score, level } => {
                    info!("final score {score} at level {level}");
                }
                _ => {}
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
