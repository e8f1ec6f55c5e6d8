use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, MatchSnapshot, MatchStatus, SerpentId, Verdict};
use crate::metrics::MatchMetrics;

const WATER: Color = Color::Rgb(3, 165, 252);
const FOOD: Color = Color::Rgb(0, 1, 89);

/// (body, head) colours of a serpent
fn palette(id: SerpentId) -> (Color, Color) {
    match id {
        SerpentId::One => (Color::Rgb(140, 3, 252), Color::Rgb(252, 3, 223)),
        SerpentId::Two => (Color::Rgb(161, 252, 3), Color::Rgb(252, 252, 3)),
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Winner(id) => palette(id).1,
        Verdict::Draw => FOOD,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &MatchSnapshot, metrics: &MatchMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match snapshot.status {
            MatchStatus::GameOver => {
                frame.render_widget(self.render_game_over(snapshot), board_area);
            }
            MatchStatus::Running | MatchStatus::RoundOver => {
                frame.render_widget(self.render_board(snapshot), board_area);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_board(&self, snapshot: &MatchSnapshot) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..snapshot.grid_size {
            let mut spans = Vec::new();

            for x in 0..snapshot.grid_size {
                let cell = Cell::new(x as i32, y as i32);
                spans.push(self.render_cell(snapshot, cell));
            }

            lines.push(Line::from(spans));
        }

        // Frozen round: announce who took it
        if snapshot.status == MatchStatus::RoundOver {
            let [one, two] = &snapshot.serpents;
            if let Some(verdict) = Verdict::from_alive(one.alive, two.alive) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Round {}: {}", snapshot.round, verdict.label()),
                    Style::default()
                        .fg(verdict_color(verdict))
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Serpents "),
            )
            .alignment(Alignment::Center)
    }

    fn render_cell(&self, snapshot: &MatchSnapshot, cell: Cell) -> Span<'static> {
        for serpent in &snapshot.serpents {
            let (body, head) = palette(serpent.id);
            if serpent.head() == Some(cell) {
                return Span::styled(
                    "■ ",
                    Style::default().fg(head).add_modifier(Modifier::BOLD),
                );
            }
            if serpent.body.contains(&cell) {
                return Span::styled("□ ", Style::default().fg(body));
            }
        }

        if snapshot.food.contains(&cell) {
            Span::styled(
                "◆ ",
                Style::default()
                    .fg(FOOD)
                    .bg(WATER)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(". ", Style::default().fg(WATER))
        }
    }

    fn render_stats(&self, snapshot: &MatchSnapshot, metrics: &MatchMetrics) -> Paragraph<'_> {
        let lives = |id: SerpentId| {
            Span::styled(
                snapshot.lives_of(id).to_string(),
                Style::default()
                    .fg(palette(id).1)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let wins = |id: SerpentId| {
            Span::styled(
                metrics.wins(id).to_string(),
                Style::default().fg(palette(id).1),
            )
        };

        let text = vec![
            Line::from(vec![
                lives(SerpentId::One),
                Span::raw("    "),
                Span::styled(
                    "Serpents",
                    Style::default().fg(FOOD).add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                lives(SerpentId::Two),
                Span::raw("    "),
                Span::styled("Round: ", Style::default().fg(Color::Yellow)),
                Span::styled(snapshot.round.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Wins: ", Style::default().fg(Color::Yellow)),
                wins(SerpentId::One),
                Span::raw(" - "),
                wins(SerpentId::Two),
                Span::raw("    "),
                Span::styled("Played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.rounds_played.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Draws: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.draws.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &MatchSnapshot) -> Paragraph<'_> {
        let (message, color) = match snapshot.winner {
            Some(Verdict::Winner(id)) => (format!("{} won!", id.label()), palette(id).1),
            Some(Verdict::Draw) | None => ("You both lost :P".to_string(), FOOD),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                message,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Lives left: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(
                        "{} - {}",
                        snapshot.lives_of(SerpentId::One),
                        snapshot.lives_of(SerpentId::Two)
                    ),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("WASD", Style::default().fg(palette(SerpentId::One).1)),
            Span::raw(" serpent 1 | "),
            Span::styled("IJKL/↑↓←→", Style::default().fg(palette(SerpentId::Two).1)),
            Span::raw(" serpent 2 | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
