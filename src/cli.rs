#![cfg(feature = "std")]

//! Terminal front-end: board rendering, coordinate parsing and the
//! interactive game loop used by `broadside play`.

use std::io::{self, BufRead, Write};

use crate::core::{
    ship_type_by_name, Cell, Coord, FleetPolicy, GameConfig, GameError, GameSession, GameView,
    Player, Ship, ShipSpec, ShotReport, SHIPS,
};

/// Format a coordinate in board notation, e.g. `A5` for row 4, column 0.
pub fn coord_to_string(coord: Coord) -> String {
    let col = (b'A' + coord.y as u8) as char;
    format!("{}{}", col, coord.x + 1)
}

/// Parse board notation (`A5`, `j10`) on a grid of side `size`.
pub fn parse_coord(input: &str, size: usize) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let last_col = (b'A' + (size.min(26) as u8).saturating_sub(1)) as char;
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-{}", col_ch, last_col));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= size {
        return Err(format!("Column '{}' out of bounds - must be A-{}", col_ch, last_col));
    }
    let row_str: String = chars.collect();
    if row_str.is_empty() {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, size))?;
    if row == 0 || row > size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, size));
    }
    Ok(Coord::new(row - 1, col))
}

/// Parse one ship line.
///
/// Accepts either `<name> <start> <H|V>` for a canonical ship type or
/// `<name> <cell> <cell> ...` listing every occupied cell.
pub fn parse_ship_line(line: &str, size: usize) -> Result<ShipSpec, String> {
    let mut parts = line.split_whitespace();
    let name = parts.next().ok_or("Missing ship name")?;
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return Err(format!("No cells given for {}", name));
    }

    if let [start, dir] = rest.as_slice() {
        let horizontal = match dir.to_ascii_uppercase().as_str() {
            "H" => Some(true),
            "V" => Some(false),
            _ => None,
        };
        if let Some(horizontal) = horizontal {
            let ship_type =
                ship_type_by_name(name).ok_or_else(|| format!("Unknown ship type '{}'", name))?;
            let start = parse_coord(start, size)?;
            return Ok(ShipSpec::line(ship_type, start, horizontal));
        }
    }

    let coords = rest
        .iter()
        .map(|cell| parse_coord(cell, size))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ShipSpec::new(name, coords))
}

/// Draw a board inside a box, with column letters and 1-based row numbers.
pub fn render_board(rows: &[Vec<Cell>]) -> String {
    let size = rows.len();
    let bar = "═".repeat(2 * size + 3);
    let mut out = String::new();
    out.push_str(&format!("    ╔{}╗\n", bar));
    out.push_str("    ║  ");
    for c in 0..size {
        out.push_str(&format!(" {}", (b'A' + c as u8) as char));
    }
    out.push_str(" ║\n");
    out.push_str(&format!("    ╠{}╣\n", bar));
    for (r, row) in rows.iter().enumerate() {
        out.push_str(&format!("    ║{:2}", r + 1));
        for cell in row {
            out.push(' ');
            out.push(cell.symbol());
        }
        out.push_str(" ║\n");
    }
    out.push_str(&format!("    ╚{}╝\n", bar));
    out
}

fn legend(reveal: bool) -> &'static str {
    if reveal {
        "    Legend: S=Ship  X=Hit  o=Miss  .=Water"
    } else {
        "    Legend: X=Hit  o=Miss  .=Unknown"
    }
}

/// Print the opponent board (top) and `me`'s own board (bottom).
pub fn print_view(view: &GameView, me: Player) {
    println!("Opponent board:");
    print!("{}", render_board(&view.boards[me.opponent().index()]));
    println!("{}", legend(false));
    println!("\nYour board:");
    print!("{}", render_board(&view.boards[me.index()]));
    println!("{}", legend(true));
}

/// Print a one-line status per ship.
pub fn print_fleet(ships: &[Ship]) {
    println!("\n    Ships:");
    for ship in ships {
        let status = if ship.is_sunk() { "SUNK" } else { "Active" };
        println!(
            "      {} ({}): {} [{}/{} hit]",
            ship.name(),
            ship.coords().len(),
            status,
            ship.hits().len(),
            ship.coords().len()
        );
    }
}

fn describe(report: &ShotReport) -> String {
    let outcome = match (&report.sunk, report.hit) {
        (Some(cells), _) => format!("SUNK a ship of length {}", cells.len()),
        (None, true) => "HIT".to_string(),
        (None, false) => "miss".to_string(),
    };
    format!("{} -> {}", coord_to_string(report.target), outcome)
}

fn print_placement_help(config: &GameConfig) {
    println!("\nEnter one ship per line:");
    println!("  <name> <start> <H|V>      e.g. Carrier A1 H");
    println!("  <name> <cell> <cell> ...  e.g. Destroyer B2 B3");
    if config.fleet_policy == FleetPolicy::Canonical {
        println!("The fleet must be exactly:");
        for def in SHIPS.iter() {
            println!("  {} (length {})", def.name(), def.length());
        }
    } else {
        println!("Any ships with lengths 2-5 are accepted. Type 'done' to finish.");
    }
    if config.straight_ships {
        println!("Ships must be straight lines.");
    }
}

fn read_line(input: &mut impl BufRead) -> anyhow::Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for the human fleet. An empty first line places it at random.
/// Returns `false` if input ended before a fleet was placed.
fn place_human_fleet(session: &mut GameSession, input: &mut impl BufRead) -> anyhow::Result<bool> {
    let config = session.config().clone();
    let size = config.board_size;
    println!("Press ENTER for a random fleet, or type 'manual' to place ships yourself.");
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        if line.is_empty() {
            session.place_random(Player::Human)?;
            return Ok(true);
        }
        if !line.eq_ignore_ascii_case("manual") {
            println!("Type 'manual' or press ENTER.");
            continue;
        }

        print_placement_help(&config);
        let mut specs = Vec::new();
        loop {
            if config.fleet_policy == FleetPolicy::Canonical && specs.len() == SHIPS.len() {
                break;
            }
            let Some(line) = read_line(input)? else {
                return Ok(false);
            };
            if line.eq_ignore_ascii_case("done") {
                break;
            }
            if line.eq_ignore_ascii_case("help") {
                print_placement_help(&config);
                continue;
            }
            match parse_ship_line(&line, size) {
                Ok(spec) => specs.push(spec),
                Err(e) => println!("✗ {}", e),
            }
        }

        match session.place_ships(Player::Human, &specs) {
            Ok(_) => return Ok(true),
            Err(e) => println!("✗ {}. Start again (ENTER for random, 'manual' to retry).", e),
        }
    }
}

/// Play one interactive game against the agent on stdin/stdout.
pub fn run_play(config: GameConfig) -> anyhow::Result<()> {
    let size = config.board_size;
    let mut session = GameSession::new(config);
    session.place_random(Player::Agent)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("════════════════════════════════════════════════════════════");
    println!("                         BROADSIDE");
    println!("════════════════════════════════════════════════════════════");
    if !place_human_fleet(&mut session, &mut input)? {
        return Ok(());
    }

    print_view(&session.view(Player::Human), Player::Human);
    println!("\nFire with a coordinate like A5. Commands: board, fleet, quit.");

    while !session.is_over() {
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        match line.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "board" => {
                print_view(&session.view(Player::Human), Player::Human);
                continue;
            }
            "fleet" => {
                print_fleet(session.ships(Player::Human));
                continue;
            }
            _ => {}
        }

        let target = match parse_coord(&line, size) {
            Ok(c) => c,
            Err(e) => {
                println!("✗ {}", e);
                continue;
            }
        };
        match session.fire(Player::Human, target.x, target.y) {
            Ok(result) => {
                let you = ShotReport {
                    player: Player::Human,
                    target,
                    hit: result.hit,
                    sunk: result.sunk.clone(),
                };
                println!("You fired at {}", describe(&you));
                for shot in &result.agent_shots {
                    println!("Opponent fired at {}", describe(shot));
                }
                print_view(&session.view(Player::Human), Player::Human);
            }
            Err(GameError::AlreadyFired) => println!("✗ You already fired at {}", coord_to_string(target)),
            Err(e) => println!("✗ {}", e),
        }
    }

    match session.winner() {
        Some(Player::Human) => println!(
            "\nYou win after {} shots!",
            session.shots_fired(Player::Human)
        ),
        Some(Player::Agent) => {
            println!(
                "\nThe opponent wins after {} shots.",
                session.shots_fired(Player::Agent)
            );
            println!("Opponent fleet:");
            print!("{}", render_board(&session.board(Player::Agent).render(true)));
        }
        None => println!("\nGame abandoned."),
    }
    Ok(())
}
