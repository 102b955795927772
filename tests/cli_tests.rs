use broadside::cli::{coord_to_string, parse_coord, parse_ship_line, render_board};
use broadside::{Board, Cell, Coord, BOARD_SIZE};

#[test]
fn parse_coord_letter_is_column() {
    assert_eq!(parse_coord("A1", BOARD_SIZE), Ok(Coord::new(0, 0)));
    assert_eq!(parse_coord("A5", BOARD_SIZE), Ok(Coord::new(4, 0)));
    assert_eq!(parse_coord("j10", BOARD_SIZE), Ok(Coord::new(9, 9)));
    assert_eq!(parse_coord("  c7 ", BOARD_SIZE), Ok(Coord::new(6, 2)));
}

#[test]
fn parse_coord_rejects_bad_input() {
    assert!(parse_coord("", BOARD_SIZE).is_err());
    assert!(parse_coord("A", BOARD_SIZE).is_err());
    assert!(parse_coord("5A", BOARD_SIZE).is_err());
    assert!(parse_coord("K1", BOARD_SIZE).is_err());
    assert!(parse_coord("A0", BOARD_SIZE).is_err());
    assert!(parse_coord("A11", BOARD_SIZE).is_err());
    assert!(parse_coord("F1", 5).is_err());
}

#[test]
fn coord_notation_round_trips() {
    for x in 0..BOARD_SIZE {
        for y in 0..BOARD_SIZE {
            let c = Coord::new(x, y);
            assert_eq!(parse_coord(&coord_to_string(c), BOARD_SIZE), Ok(c));
        }
    }
}

#[test]
fn ship_line_with_direction() {
    let spec = parse_ship_line("Cruiser B2 V", BOARD_SIZE).unwrap();
    assert_eq!(spec.name, "Cruiser");
    assert_eq!(spec.coords, vec![Coord::new(1, 1), Coord::new(2, 1), Coord::new(3, 1)]);

    let spec = parse_ship_line("destroyer A1 h", BOARD_SIZE).unwrap();
    assert_eq!(spec.coords, vec![Coord::new(0, 0), Coord::new(0, 1)]);
}

#[test]
fn ship_line_with_cells() {
    let spec = parse_ship_line("Tug D4 E4", BOARD_SIZE).unwrap();
    assert_eq!(spec.name, "Tug");
    assert_eq!(spec.coords, vec![Coord::new(3, 3), Coord::new(3, 4)]);

    assert!(parse_ship_line("Tug", BOARD_SIZE).is_err());
    assert!(parse_ship_line("Rowboat A1 H", BOARD_SIZE).is_err());
    assert!(parse_ship_line("Tug Z9 A1", BOARD_SIZE).is_err());
}

#[test]
fn render_board_shows_symbols() {
    let mut board = Board::new(BOARD_SIZE);
    board.mark(0, 0, Cell::Ship).unwrap();
    board.mark(0, 1, Cell::Ship).unwrap();
    board.mark(0, 1, Cell::Hit).unwrap();
    board.mark(9, 9, Cell::Miss).unwrap();

    let text = render_board(&board.render(true));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), BOARD_SIZE + 4);
    assert!(lines[1].contains("A B C D E F G H I J"));
    assert!(lines[3].contains(" 1 S X . ."));
    assert!(lines[12].contains("10 . . . . . . . . . o"));

    let hidden = render_board(&board.render(false));
    assert!(!hidden.contains('S'));
}
