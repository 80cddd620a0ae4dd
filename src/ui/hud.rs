use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::game::Snapshot;

const HUD_MARGIN_X: u16 = 1;

/// Renders the one-line score HUD and returns the area below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let inset = Rect {
        x: hud_area.x.saturating_add(HUD_MARGIN_X),
        width: hud_area.width.saturating_sub(HUD_MARGIN_X * 2),
        ..hud_area
    };

    frame.render_widget(
        Paragraph::new(score_line(
            snapshot.score,
            snapshot.high_score,
            snapshot.snake.len(),
            usize::from(inset.width),
        )),
        inset,
    );

    play_area
}

/// Builds `Score: N ... Length: L  High Score: M`, padded to `width`
/// columns. The right half is dropped when it does not fit.
fn score_line(score: u32, high_score: u32, length: usize, width: usize) -> Line<'static> {
    let left = format!("Score: {score}");
    let right = format!("Length: {length}  High Score: {}", high_score.max(score));

    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::DarkGray);

    let used = left.width() + right.width();
    if used > width {
        return Line::from(Span::styled(left, value_style));
    }

    Line::from(vec![
        Span::styled(left, value_style),
        Span::raw(" ".repeat(width - used)),
        Span::styled(right, muted),
    ])
}
