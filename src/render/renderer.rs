use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use crate::game::{GameSnapshot, LifecycleState, Position};
use crate::metrics::GameMetrics;

const BACKGROUND: Color = Color::Rgb(0x00, 0x0e, 0x17);
const ACCENT: Color = Color::Rgb(0x91, 0xc4, 0x6e);
const SNAKE: Color = Color::Rgb(0x5f, 0xc5, 0xeb);

/// Smallest box the menu and game-over text fit in, borders included
const MIN_PANEL_WIDTH: u16 = 34;
const MIN_PANEL_HEIGHT: u16 = 9;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        frame.render_widget(
            Block::default().style(Style::default().bg(BACKGROUND).fg(ACCENT)),
            frame.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let (grid_width, grid_height) = Self::grid_box(snapshot.grid_size);

        let (body, width, height) = match snapshot.lifecycle {
            LifecycleState::Playing | LifecycleState::Paused => {
                (self.render_grid(snapshot), grid_width, grid_height)
            }
            LifecycleState::Menu => (
                self.render_menu(),
                grid_width.max(MIN_PANEL_WIDTH),
                grid_height.max(MIN_PANEL_HEIGHT),
            ),
            LifecycleState::GameOver => (
                self.render_game_over(snapshot),
                grid_width.max(MIN_PANEL_WIDTH),
                grid_height.max(MIN_PANEL_HEIGHT),
            ),
        };
        frame.render_widget(body, Self::centered(chunks[1], width, height));

        let controls = self.render_controls(snapshot.lifecycle);
        frame.render_widget(controls, chunks[2]);
    }

    /// Outer size of the board: two columns per cell plus borders
    fn grid_box(grid_size: usize) -> (u16, u16) {
        ((grid_size * 2 + 2) as u16, (grid_size + 2) as u16)
    }

    /// Rect of the given size centered in `area`, clipped to it
    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);

        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_size);

        for y in 0..snapshot.grid_size {
            let mut spans = Vec::with_capacity(snapshot.grid_size);

            for x in 0..snapshot.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "██",
                        Style::default().fg(SNAKE).add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("▓▓", Style::default().fg(SNAKE))
                } else if pos == snapshot.food {
                    Span::styled("██", Style::default().fg(ACCENT))
                } else {
                    Span::styled("  ", Style::default())
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = if snapshot.lifecycle == LifecycleState::Paused {
            Span::styled(
                " PAUSED ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(" Snake ")
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(ACCENT))
                .title(title),
        )
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(ACCENT);
        let value = Style::default().fg(SNAKE).add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        if snapshot.lifecycle.shows_board() {
            spans.extend([
                Span::styled("Score: ", label),
                Span::styled(snapshot.score.to_string(), value),
                Span::raw("    "),
                Span::styled("Length: ", label),
                Span::styled(snapshot.snake.len().to_string(), value),
                Span::raw("    "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), value),
                Span::raw("    "),
            ]);
        }
        spans.extend([
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ]);

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().padding(Padding::top(1)))
    }

    fn render_menu(&self) -> Paragraph<'_> {
        let key = Style::default().fg(SNAKE).add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GRID SNAKE",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("Enter", key),
                Span::raw(" to start"),
            ]),
            Line::from(""),
            Line::from("Use arrow keys to move."),
            Line::from("Press ESC to pause/resume."),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
    }

    fn render_game_over(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your Score: ", Style::default().fg(ACCENT)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default().fg(SNAKE).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "Enter",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" play again  "),
                Span::styled(
                    "M",
                    Style::default().fg(SNAKE).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" main menu"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, lifecycle: LifecycleState) -> Paragraph<'_> {
        let key = Style::default().fg(SNAKE);

        let spans = match lifecycle {
            LifecycleState::Menu | LifecycleState::GameOver => vec![
                Span::styled("Enter", key),
                Span::raw(" start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ],
            LifecycleState::Playing => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Esc", key),
                Span::raw(" pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ],
            LifecycleState::Paused => vec![
                Span::styled("Esc", key),
                Span::raw(" resume | "),
                Span::styled("M", key),
                Span::raw(" menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ],
        };

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().padding(Padding::top(1)))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
