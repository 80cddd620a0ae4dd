use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::game::Snapshot;
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Terminal columns per grid cell; two columns keep cells roughly square.
pub const CELL_WIDTH: u16 = 2;

const BOARD_LIGHT: Color = Color::Rgb(0xfc, 0xd9, 0x88);
const BOARD_DARK: Color = Color::Rgb(0xfc, 0xe8, 0xa6);
const SNAKE_HEAD: Color = Color::Rgb(0x4c, 0xaf, 0x50);
const SNAKE_BODY: Color = Color::Rgb(0x66, 0xbb, 0x6a);
const SNAKE_TAIL: Color = Color::Rgb(0x81, 0xc7, 0x84);
const FOOD: Color = Color::Rgb(0xff, 0x63, 0x47);
const BORDER: Color = Color::Rgb(0x8d, 0x6e, 0x3f);

const GLYPH_FILLED: &str = "██";
const GLYPH_FOOD: &str = "● ";

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, paused: bool) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);

    let board = board_rect(play_area, snapshot.grid);
    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(BORDER));

    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_checkerboard(frame, inner, snapshot.grid);
    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    if let Some(game_over) = snapshot.game_over {
        render_game_over_menu(frame, board, game_over);
    } else if paused {
        render_pause_menu(frame, board);
    }
}

/// Centers the bordered board inside `area`, shrinking it if the terminal is
/// too small.
fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid
        .width
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_checkerboard(frame: &mut Frame<'_>, inner: Rect, grid: GridSize) {
    let buffer = frame.buffer_mut();
    for y in 0..i32::from(grid.height) {
        for x in 0..i32::from(grid.width) {
            let Some((col, row)) = logical_to_terminal(inner, grid, Position { x, y }) else {
                continue;
            };
            let color = if (x + y) % 2 == 0 {
                BOARD_DARK
            } else {
                BOARD_LIGHT
            };
            buffer.set_string(col, row, GLYPH_FILLED, Style::new().fg(color));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let Some(food) = snapshot.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, food) else {
        return;
    };

    let background = if (food.x + food.y) % 2 == 0 {
        BOARD_DARK
    } else {
        BOARD_LIGHT
    };
    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new()
            .fg(FOOD)
            .bg(background)
            .add_modifier(Modifier::BOLD),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let snake = snapshot.snake;
    let last_index = snake.len() - 1;

    let buffer = frame.buffer_mut();
    // Paint tail first so the head wins if the final frame shows an overlap.
    for (index, segment) in snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, *segment) else {
            continue;
        };

        let color = match index {
            0 => SNAKE_HEAD,
            i if i == last_index => SNAKE_TAIL,
            _ => SNAKE_BODY,
        };
        buffer.set_string(x, y, GLYPH_FILLED, Style::new().fg(color));

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(snapshot.direction),
                Style::new()
                    .fg(Color::Black)
                    .bg(SNAKE_HEAD)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▴▴",
        Direction::Down => "▾▾",
        Direction::Left => "◂ ",
        Direction::Right => " ▸",
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
