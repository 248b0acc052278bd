//! Text rendering of tile grids.

use std::fmt::Write as _;

use cavern_core::{Point, TileColor, TileGrid};

/// Renders the grid with the highest row first so that up is +y.
pub(crate) fn render(grid: &TileGrid, color: bool) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size.area() * if color { 40 } else { 1 } + 64);
    let width = i32::try_from(size.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(size.height()).unwrap_or(i32::MAX);
    for y in (0..height).rev() {
        for x in 0..width {
            let point = Point::new(x, y);
            let Some(tile) = grid.get(point) else {
                continue;
            };
            let descriptor = tile.descriptor();
            if color {
                push_color(&mut out, 38, descriptor.foreground());
                push_color(&mut out, 48, descriptor.background());
            }
            out.push(descriptor.glyph());
        }
        if color {
            out.push_str("\x1b[0m");
        }
        out.push('\n');
    }
    out
}

fn push_color(out: &mut String, layer: u8, color: TileColor) {
    let _ = write!(
        out,
        "\x1b[{layer};2;{};{};{}m",
        color.red(),
        color.green(),
        color.blue()
    );
}

#[cfg(test)]
mod tests {
    use cavern_core::{GridSize, Tile};

    use super::*;

    #[test]
    fn rows_print_top_down() {
        let mut grid = TileGrid::filled(GridSize::new(3, 2), Tile::Void);
        grid.set(Point::new(0, 1), Tile::Observer);
        grid.set(Point::new(2, 0), Tile::Companion);

        let observer = Tile::Observer.descriptor().glyph();
        let companion = Tile::Companion.descriptor().glyph();
        let void = Tile::Void.descriptor().glyph();
        let expected = format!("{observer}{void}{void}\n{void}{void}{companion}\n");
        assert_eq!(render(&grid, false), expected);
    }

    #[test]
    fn colour_output_resets_each_row() {
        let grid = TileGrid::filled(GridSize::new(2, 2), Tile::Floor);
        let rendered = render(&grid, true);
        assert_eq!(rendered.matches("\x1b[0m\n").count(), 2);
        assert!(rendered.contains("\x1b[38;2;"));
    }
}
