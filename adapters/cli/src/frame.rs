//! Text rendering of the exported body for terminal hosts.

use gridsnake_core::{BodyView, CellIndex};

const HEAD: u8 = b'@';
const SEGMENT: u8 = b'o';
const FOOD: u8 = b'*';
const EMPTY: u8 = b'.';

/// Widest grid the text board is drawn for.
pub(crate) const MAX_RENDER_WIDTH: u32 = 256;

/// Draws the grid row by row, one character per cell.
///
/// Grids wider than [`MAX_RENDER_WIDTH`] produce an empty board.
pub(crate) fn render(body: BodyView<'_>, food: Option<CellIndex>) -> String {
    let width = body.width().get();
    if width > MAX_RENDER_WIDTH {
        return String::new();
    }
    let Some(count) = body
        .width()
        .cell_count()
        .and_then(|count| usize::try_from(count).ok())
    else {
        return String::new();
    };

    let mut cells = vec![EMPTY; count];
    let mut paint = |cell: CellIndex, symbol: u8| {
        if let Some(slot) = usize::try_from(cell.get())
            .ok()
            .and_then(|index| cells.get_mut(index))
        {
            *slot = symbol;
        }
    };

    if let Some(food) = food {
        paint(food, FOOD);
    }
    for segment in body.iter().skip(1) {
        paint(segment, SEGMENT);
    }
    if let Some(head) = body.head() {
        paint(head, HEAD);
    }

    let row_length = usize::try_from(width).unwrap_or(usize::MAX).max(1);
    let mut board = String::with_capacity(count + count / row_length);
    for row in cells.chunks(row_length) {
        board.extend(row.iter().copied().map(char::from));
        board.push('\n');
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsnake_core::GridWidth;

    #[test]
    fn head_is_distinguished_from_body() {
        let cells = [CellIndex::new(4), CellIndex::new(3)];
        let board = render(
            BodyView::new(&cells, GridWidth::new(3)),
            Some(CellIndex::new(8)),
        );
        assert_eq!(board, "...\no@.\n..*\n");
    }

    #[test]
    fn oversized_grid_is_not_drawn() {
        let cells = [CellIndex::new(0)];
        let board = render(BodyView::new(&cells, GridWidth::new(MAX_RENDER_WIDTH + 1)), None);
        assert!(board.is_empty());
    }
}
