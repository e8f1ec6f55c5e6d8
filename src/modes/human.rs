use std::io::{Stderr, stderr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{Direction, GameConfig, MatchSnapshot, SerpentId};
use crate::input::{ChannelSource, InputHandler, KeyAction};
use crate::metrics::MatchMetrics;
use crate::render::Renderer;
use crate::scheduler::{MatchHandle, MatchTasks};

/// Two players on one keyboard, rendered in the terminal
pub struct HumanMode {
    handle: Arc<MatchHandle>,
    metrics: MatchMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    inputs: [UnboundedSender<Direction>; 2],
    sources: Option<(ChannelSource, ChannelSource)>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let (tx_one, source_one) = ChannelSource::new();
        let (tx_two, source_two) = ChannelSource::new();

        Self {
            handle: MatchHandle::new(config),
            metrics: MatchMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            inputs: [tx_one, tx_two],
            sources: Some((source_one, source_two)),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
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
        let (source_one, source_two) = self
            .sources
            .take()
            .context("Match has already been played")?;
        let tasks = MatchTasks::spawn(&self.handle, source_one, source_two);

        let mut event_stream = EventStream::new();
        let mut stop = self.handle.stop_signal();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.handle.snapshot();
                    self.draw(terminal, &snapshot)?;
                }

                // Match decided
                _ = stop.wait_for(|&stopped| stopped) => {
                    break;
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

        self.handle.stop();
        tasks.join().await.context("Match activities failed")?;

        let snapshot = self.handle.snapshot();
        if snapshot.is_game_over() && !self.should_quit {
            self.draw(terminal, &snapshot)?;
            info!(winner = ?snapshot.winner, "holding final screen");
            tokio::time::sleep(self.handle.config().final_hold()).await;
        }

        Ok(())
    }

    fn draw(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        snapshot: &MatchSnapshot,
    ) -> Result<()> {
        if let Some(verdict) = snapshot.last_verdict {
            self.metrics.on_round_resolved(snapshot.round.saturating_sub(1), verdict);
        }
        self.metrics.update(snapshot.is_game_over());
        terminal
            .draw(|frame| {
                self.renderer.render(frame, snapshot, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(id, direction) => self.send_direction(id, direction),
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn send_direction(&self, id: SerpentId, direction: Direction) {
        // The watcher is gone once the match has stopped
        if self.inputs[id.index()].send(direction).is_err() {
            debug!(serpent = %id, "input dropped after match end");
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::game::MatchStatus;
    use crate::input::DirectionSource;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_match_initialization() {
        let mode = HumanMode::new(GameConfig::default());
        let snapshot = mode.handle.snapshot();
        assert_eq!(snapshot.status, MatchStatus::Running);
        assert_eq!(snapshot.lives, [5, 5]);
        assert!(mode.sources.is_some());
    }

    #[test]
    fn test_keys_reach_the_right_source() {
        let mut mode = HumanMode::new(GameConfig::default());
        mode.handle_event(key(KeyCode::Char('s')));
        mode.handle_event(key(KeyCode::Char('i')));

        let (mut one, mut two) = mode.sources.take().unwrap();
        assert_eq!(one.poll_direction(), Some(Direction::Down));
        assert_eq!(one.poll_direction(), None);
        assert_eq!(two.poll_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::default());
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
