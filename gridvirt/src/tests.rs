use std::sync::{Arc, Mutex};

use crate::{
    Axis, ColumnSpec, ContainerSize, FocusedCell, Grid, GridError, GridOptions, VisibleArea,
    Window,
};

/// Deterministic PRNG so randomized sweeps are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn uniform_options() -> GridOptions {
    GridOptions::new(1_000, 1_000)
        .with_column_width(|_| 100.0)
        .with_row_height(|_| 40.0)
        .with_freeze_columns(1)
        .with_initial_container(ContainerSize {
            width: 800.0,
            height: 600.0,
        })
}

fn variable_options() -> GridOptions {
    GridOptions::new(500, 500)
        .with_column_width(|index| 40.0 + ((index * 37) % 90) as f64)
        .with_row_height(|index| 16.0 + ((index * 13) % 48) as f64)
        .with_freeze_columns(2)
        .with_freeze_rows(1)
        .with_initial_container(ContainerSize {
            width: 800.0,
            height: 600.0,
        })
}

/// Coverage invariants that must hold after any sequence of scrolls: the
/// frozen prefix tiles from the origin, scrolling entries are adjacent, the
/// first scrolling entry starts at or under the frozen pane edge, and the
/// window reaches the far edge of the container unless content ran out.
fn assert_coverage(grid: &Grid) {
    let window = grid.window();
    let coordinate = grid.coordinate();
    let frozen = grid.frozen_area();
    window.check_consistency().unwrap();

    let mut edge = 0.0;
    for column in window.columns.iter().filter(|c| c.frozen) {
        assert_eq!(column.x, edge);
        edge += column.width;
    }
    assert_eq!(frozen.left, edge);

    let scrolling: Vec<&ColumnSpec> = window.columns.iter().filter(|c| !c.frozen).collect();
    for pair in scrolling.windows(2) {
        assert_eq!(pair[1].x, pair[0].right());
    }
    if let Some(first) = scrolling.first() {
        assert!(first.x + coordinate.offset_x <= frozen.left + 1e-9);
    }
    if let Some(last) = scrolling.last() {
        let reached_edge = last.right() + coordinate.offset_x > grid.container_size().width;
        let ran_out = last.index == grid.options().column_count - 1;
        assert!(reached_edge || ran_out);
    }

    let mut edge = 0.0;
    for row in window.rows.iter().filter(|r| r.frozen) {
        assert_eq!(row.y, edge);
        edge += row.height;
    }
    assert_eq!(frozen.top, edge);
    if let Some(last) = window.rows.iter().filter(|r| !r.frozen).last() {
        let reached_edge = last.bottom() + coordinate.offset_y > grid.container_size().height;
        let ran_out = last.index == grid.options().row_count - 1;
        assert!(reached_edge || ran_out);
    }
}

#[test]
fn initial_window_covers_container() {
    let grid = Grid::new(uniform_options()).unwrap();
    let window = grid.window();

    // One frozen column plus eight scrolling ones: the eighth straddles the
    // far edge and is included.
    let indices: Vec<usize> = window.columns.iter().map(|c| c.index).collect();
    assert_eq!(indices, (0..=8).collect::<Vec<_>>());
    assert!(window.columns[0].frozen);
    assert_eq!(window.columns[0].x, 0.0);
    assert_eq!(grid.frozen_area().left, 100.0);
    assert_eq!(window.column(1).unwrap().x, 100.0);
    assert_eq!(window.column(8).unwrap().x, 800.0);
    assert_eq!(window.column(8).unwrap().right(), 900.0);

    let indices: Vec<usize> = window.rows.iter().map(|r| r.index).collect();
    assert_eq!(indices, (0..=15).collect::<Vec<_>>());

    assert_eq!(
        grid.visible_area(),
        Some(VisibleArea {
            min_column: 1,
            max_column: 8,
            min_row: 0,
            max_row: 15,
        })
    );
    assert_coverage(&grid);
}

#[test]
fn scroll_advances_anchor_past_crossed_columns() {
    let mut grid = Grid::new(uniform_options()).unwrap();
    grid.scroll_by(250.0, 0.0).unwrap();

    let coordinate = grid.coordinate();
    assert_eq!(coordinate.offset_x, -250.0);
    assert_eq!(coordinate.column_index, 3);
    assert_eq!(coordinate.left, 200.0);

    // Column 3 sits partially under the frozen pane: content x 300, screen
    // x 50 against a pane edge at 100.
    let first = grid.window().columns.iter().find(|c| !c.frozen).unwrap();
    assert_eq!(first.index, 3);
    assert_eq!(first.x, 300.0);
    assert!(first.x + coordinate.offset_x < grid.frozen_area().left);
    assert_coverage(&grid);
}

#[test]
fn scroll_back_retraces_to_origin() {
    let mut grid = Grid::new(uniform_options()).unwrap();
    grid.scroll_by(250.0, 0.0).unwrap();
    grid.scroll_by(-250.0, 0.0).unwrap();

    let coordinate = grid.coordinate();
    assert_eq!(coordinate.offset_x, 0.0);
    assert_eq!(coordinate.column_index, 1);
    assert_eq!(coordinate.left, 0.0);
    assert_coverage(&grid);
}

#[test]
fn positive_overscroll_clamps_to_origin() {
    let mut grid = Grid::new(uniform_options()).unwrap();
    grid.scroll_by(130.0, 90.0).unwrap();
    grid.scroll_by(-500.0, -500.0).unwrap();

    let coordinate = grid.coordinate();
    assert_eq!(coordinate.offset_x, 0.0);
    assert_eq!(coordinate.offset_y, 0.0);
    assert_eq!(coordinate.column_index, 1);
    assert_eq!(coordinate.row_index, 0);
    assert_eq!(coordinate.left, 0.0);
    assert_eq!(coordinate.top, 0.0);
}

#[test]
fn zero_delta_scroll_is_idempotent() {
    let mut grid = Grid::new(uniform_options()).unwrap();
    grid.scroll_by(370.0, 120.0).unwrap();
    let before = (grid.coordinate(), grid.window().clone());
    grid.scroll_by(0.0, 0.0).unwrap();
    assert_eq!(grid.coordinate(), before.0);
    assert_eq!(*grid.window(), before.1);
}

#[test]
fn frozen_prefix_uses_cumulative_sizes() {
    let grid = Grid::new(variable_options()).unwrap();
    let window = grid.window();

    // Widths are 40 + (index * 37 % 90): 40 and 77 for the frozen pair.
    assert_eq!(window.column(0).unwrap().x, 0.0);
    assert_eq!(window.column(0).unwrap().width, 40.0);
    assert_eq!(window.column(1).unwrap().x, 40.0);
    assert_eq!(window.column(1).unwrap().width, 77.0);
    assert_eq!(grid.frozen_area().left, 117.0);
    assert_eq!(window.row(0).unwrap().height, 16.0);
    assert_eq!(grid.frozen_area().top, 16.0);
    assert_coverage(&grid);
}

#[test]
fn random_scroll_sweep_preserves_coverage() {
    let mut grid = Grid::new(variable_options()).unwrap();
    let mut rng = Lcg(0x6772_6964);
    for _ in 0..400 {
        let dx = (rng.next() % 1_200) as f64 - 500.0;
        let dy = (rng.next() % 800) as f64 - 350.0;
        grid.scroll_by(dx, dy).unwrap();
        assert_coverage(&grid);
        assert!(grid.coordinate().offset_x <= 0.0);
        assert!(grid.coordinate().offset_y <= 0.0);
    }
}

#[test]
fn window_shorter_than_container_is_valid() {
    let grid = Grid::new(
        GridOptions::new(3, 2).with_initial_container(ContainerSize {
            width: 800.0,
            height: 600.0,
        }),
    )
    .unwrap();
    let window = grid.window();
    assert_eq!(window.columns.len(), 3);
    assert_eq!(window.rows.len(), 2);
    assert_eq!(window.column(2).unwrap().right(), 300.0);
    assert_eq!(
        grid.visible_area(),
        Some(VisibleArea {
            min_column: 0,
            max_column: 2,
            min_row: 0,
            max_row: 1,
        })
    );
}

#[test]
fn invalid_size_fails_fast() {
    let options = uniform_options().with_column_width(|index| if index == 5 { 0.0 } else { 100.0 });
    assert_eq!(
        Grid::new(options).unwrap_err(),
        GridError::InvalidSize {
            axis: Axis::Column,
            index: 5,
            value: 0.0,
        }
    );

    let options = uniform_options().with_row_height(|index| if index == 3 { -4.0 } else { 40.0 });
    assert!(matches!(
        Grid::new(options).unwrap_err(),
        GridError::InvalidSize {
            axis: Axis::Row,
            index: 3,
            ..
        }
    ));

    // Lookups that only misbehave off-screen fail when scrolled into.
    let options =
        uniform_options().with_column_width(|index| if index == 50 { f64::NAN } else { 100.0 });
    let mut grid = Grid::new(options).unwrap();
    assert!(matches!(
        grid.scroll_by(6_000.0, 0.0).unwrap_err(),
        GridError::InvalidSize {
            axis: Axis::Column,
            index: 50,
            ..
        }
    ));
}

#[test]
fn duplicate_index_detected_by_consistency_check() {
    let spec = ColumnSpec {
        index: 2,
        x: 0.0,
        width: 100.0,
        frozen: false,
        focused: false,
        highlight: false,
    };
    let window = Window {
        columns: vec![spec, spec],
        rows: Vec::new(),
    };
    assert_eq!(
        window.check_consistency().unwrap_err(),
        GridError::DuplicateIndex {
            axis: Axis::Column,
            index: 2,
        }
    );
}

#[test]
fn focus_marks_window_and_notifies_once() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut grid = Grid::new(
        uniform_options().with_on_focus_change(move |cell| sink.lock().unwrap().push(cell)),
    )
    .unwrap();

    grid.focus(3, 2);
    assert_eq!(
        grid.focused(),
        Some(FocusedCell {
            column_index: 3,
            row_index: 2,
        })
    );
    assert!(grid.window().column(3).unwrap().focused);
    assert!(grid.window().row(2).unwrap().focused);
    assert_eq!(events.lock().unwrap().len(), 1);

    // Re-focusing the same cell is a no-op.
    grid.focus(3, 2);
    assert_eq!(events.lock().unwrap().len(), 1);

    // Moving focus clears the old flags.
    grid.focus(4, 2);
    assert!(!grid.window().column(3).unwrap().focused);
    assert!(grid.window().column(4).unwrap().focused);
    assert_eq!(events.lock().unwrap().len(), 2);

    // Frozen cells are not focusable.
    grid.focus(0, 2);
    assert_eq!(
        grid.focused(),
        Some(FocusedCell {
            column_index: 4,
            row_index: 2,
        })
    );
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn focus_survives_small_scrolls_and_clears_when_dropped() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut grid = Grid::new(
        uniform_options().with_on_focus_change(move |cell| sink.lock().unwrap().push(cell)),
    )
    .unwrap();

    grid.focus(4, 2);
    grid.scroll_by(50.0, 0.0).unwrap();
    assert!(grid.window().column(4).unwrap().focused);
    assert_eq!(events.lock().unwrap().len(), 1);

    // A scroll that rebuilds past the focused cell clears focus with a
    // single `None` notification.
    grid.scroll_by(2_000.0, 0.0).unwrap();
    assert_eq!(grid.focused(), None);
    assert_eq!(events.lock().unwrap().as_slice(), &[
        Some(FocusedCell {
            column_index: 4,
            row_index: 2,
        }),
        None,
    ]);
}

#[test]
fn visible_area_reported_per_rebuild() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut grid = Grid::new(
        uniform_options().with_on_change_visible_area(move |area| sink.lock().unwrap().push(area)),
    )
    .unwrap();
    assert_eq!(events.lock().unwrap().len(), 1);
    assert_eq!(events.lock().unwrap()[0], VisibleArea {
        min_column: 1,
        max_column: 8,
        min_row: 0,
        max_row: 15,
    });

    grid.scroll_by(250.0, 0.0).unwrap();
    assert_eq!(events.lock().unwrap().len(), 2);
    assert_eq!(events.lock().unwrap()[1].min_column, 3);
}

#[test]
fn resize_preview_shifts_trailing_columns() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut grid = Grid::new(
        uniform_options().with_on_change_column(move |index, width| {
            sink.lock().unwrap().push((index, width));
        }),
    )
    .unwrap();

    grid.preview_column_width(3, 150.0);
    assert_eq!(grid.window().column(3).unwrap().width, 150.0);
    assert_eq!(grid.window().column(4).unwrap().x, 450.0);
    assert_eq!(grid.window().column(8).unwrap().x, 850.0);
    assert_eq!(events.lock().unwrap().as_slice(), &[(3, 150.0)]);

    // Identical width is a no-op.
    grid.preview_column_width(3, 150.0);
    assert_eq!(events.lock().unwrap().len(), 1);

    // The lookups were never updated, so committing snaps back.
    grid.commit_resize().unwrap();
    assert_eq!(grid.window().column(3).unwrap().width, 100.0);
    assert_eq!(grid.window().column(4).unwrap().x, 400.0);
}

#[test]
fn frozen_resize_preview_adjusts_frozen_area() {
    let mut grid = Grid::new(uniform_options()).unwrap();
    grid.preview_column_width(0, 130.0);
    assert_eq!(grid.frozen_area().left, 130.0);
    assert_eq!(grid.window().column(1).unwrap().x, 130.0);
}

#[test]
fn shrinking_column_count_past_anchor_resets_axis() {
    let mut grid = Grid::new(uniform_options()).unwrap();
    grid.scroll_by(2_000.0, 500.0).unwrap();
    assert_eq!(grid.coordinate().column_index, 20);

    grid.set_column_count(10).unwrap();
    let coordinate = grid.coordinate();
    assert_eq!(coordinate.column_index, 1);
    assert_eq!(coordinate.offset_x, 0.0);
    assert_eq!(coordinate.left, 0.0);
    // The vertical axis is untouched.
    assert_eq!(coordinate.offset_y, -500.0);
    assert_coverage(&grid);
}

#[test]
fn force_update_resets_position_and_focus() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut grid = Grid::new(
        uniform_options().with_on_focus_change(move |cell| sink.lock().unwrap().push(cell)),
    )
    .unwrap();
    grid.scroll_by(250.0, 120.0).unwrap();
    grid.focus(4, 5);

    grid.force_update().unwrap();
    let coordinate = grid.coordinate();
    assert_eq!(coordinate.offset_x, 0.0);
    assert_eq!(coordinate.offset_y, 0.0);
    assert_eq!(coordinate.column_index, 1);
    assert_eq!(coordinate.row_index, 0);
    assert_eq!(grid.focused(), None);
    assert_eq!(events.lock().unwrap().len(), 2);
    assert_eq!(events.lock().unwrap()[1], None);
}

#[test]
fn container_growth_extends_window_in_place() {
    let mut grid = Grid::new(uniform_options()).unwrap();
    grid.scroll_by(250.0, 0.0).unwrap();
    let anchor = grid.coordinate();

    grid.set_container_size(ContainerSize {
        width: 1_200.0,
        height: 600.0,
    })
    .unwrap();
    assert_eq!(grid.coordinate(), anchor);
    let last = grid.window().columns.last().unwrap();
    assert!(last.right() + anchor.offset_x > 1_200.0);
    assert_coverage(&grid);
}
