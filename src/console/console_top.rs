//! Line-oriented console front-end.
//!
//! Reads one command per line from stdin, drives a [`GameEngine`], and writes
//! replies to stdout. Squares are algebraic (`e2`, `k14`).

use std::io::{self, BufRead, Write};

use crate::engine::events::{EventLog, GameEvent};
use crate::engine::game_engine::{GameEngine, Navigation};
use crate::game_state::chess_types::{player_letter, GameResult, Square};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::render_game_state::render_game_state;

const HELP: &str = "commands: new | move <from> <to> | prev | next | first | last | fen | \
setfen <fen4> | pgn | save <path> | names <red> <blue> <yellow> <green> | result <*|1-0|0-1|1/2-1/2> | board | tree | quit";

pub fn run_stdio_loop(engine: GameEngine) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut console = ConsoleState::new(engine);

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = console.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ConsoleState {
    engine: GameEngine,
    events: EventLog,
}

impl ConsoleState {
    pub fn new(engine: GameEngine) -> Self {
        let events = engine.events().record();
        Self { engine, events }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Run one command. Returns `true` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "new" => match self.engine.new_game() {
                Ok(()) => writeln!(out, "ok")?,
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            "move" => {
                if let Err(err) = self.handle_move(parts.next(), parts.next(), out) {
                    writeln!(out, "error: {}", err)?;
                }
            }
            "prev" => self.handle_navigation(Navigation::Prev, out)?,
            "next" => self.handle_navigation(Navigation::Next, out)?,
            "first" => self.handle_navigation(Navigation::First, out)?,
            "last" => self.handle_navigation(Navigation::Last, out)?,
            "fen" => {
                writeln!(out, "{}", self.engine.generate_fen4())?;
            }
            "setfen" => {
                let fen4 = trimmed.strip_prefix("setfen").unwrap_or_default().trim();
                match self.engine.set_position(fen4) {
                    Ok(()) => writeln!(out, "ok")?,
                    Err(err) => writeln!(out, "error: {}", err)?,
                }
            }
            "pgn" => match self.engine.generate_pgn4() {
                Ok(pgn4) => writeln!(out, "{}", pgn4)?,
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            "save" => match parts.next() {
                Some(path) => match self.engine.save_pgn4(path) {
                    Ok(()) => writeln!(out, "saved {}", path)?,
                    Err(err) => writeln!(out, "error: {}", err)?,
                },
                None => writeln!(out, "error: save needs a path")?,
            },
            "names" => {
                let mut names = [""; 4];
                for slot in names.iter_mut() {
                    *slot = parts.next().unwrap_or_default();
                }
                self.engine.set_player_names(names);
                writeln!(out, "ok")?;
            }
            "result" => match parts.next().unwrap_or_default().parse::<GameResult>() {
                Ok(result) => {
                    self.engine.set_result(result);
                    writeln!(out, "ok")?;
                }
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            "board" => {
                writeln!(out, "{}", render_game_state(self.engine.state()))?;
            }
            "tree" => match self.engine.tree_snapshot().to_json() {
                Ok(json) => writeln!(out, "{}", json)?,
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            "help" => writeln!(out, "{}", HELP)?,
            "quit" => return Ok(true),
            _ => {
                writeln!(out, "error: unknown command '{}'", cmd)?;
                writeln!(out, "{}", HELP)?;
            }
        }

        self.report_events(out)?;
        Ok(false)
    }

    fn handle_move(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
        out: &mut impl Write,
    ) -> Result<(), String> {
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (parse_square(from)?, parse_square(to)?),
            _ => return Err("move needs <from> <to>".to_owned()),
        };
        let record = self
            .engine
            .try_apply_move(from, to)
            .map_err(|err| err.to_string())?;
        writeln!(
            out,
            "ok {} ({} to move)",
            record.to_algebraic(),
            player_letter(self.engine.current_player())
        )
        .map_err(|err| err.to_string())
    }

    fn handle_navigation(&mut self, direction: Navigation, out: &mut impl Write) -> io::Result<()> {
        if self.engine.navigate(direction) {
            writeln!(
                out,
                "ply {} ({} to move)",
                self.engine.move_number(),
                player_letter(self.engine.current_player())
            )
        } else {
            writeln!(out, "no move")
        }
    }

    /// Surface events a terminal user would otherwise miss.
    fn report_events(&mut self, out: &mut impl Write) -> io::Result<()> {
        for event in self.events.drain() {
            if let GameEvent::GameOver(result) = event {
                writeln!(out, "game over {}", result)?;
            }
        }
        Ok(())
    }
}

fn parse_square(text: &str) -> Result<Square, String> {
    algebraic_to_square(text).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::ConsoleState;
    use crate::engine::game_engine::GameEngine;
    use crate::game_state::chess_types::{GameResult, Player};

    fn run(console: &mut ConsoleState, line: &str) -> (bool, String) {
        let mut out = Vec::new();
        let quit = console
            .handle_command(line, &mut out)
            .expect("writing to a Vec cannot fail");
        (quit, String::from_utf8(out).expect("console output is UTF-8"))
    }

    fn started() -> ConsoleState {
        let mut console = ConsoleState::new(GameEngine::new());
        run(&mut console, "new");
        console
    }

    #[test]
    fn move_and_navigation_commands() {
        let mut console = started();

        let (_, reply) = run(&mut console, "move e2 e4");
        assert_eq!(reply, "ok e4 (b to move)\n");
        assert_eq!(console.engine().current_player(), Some(Player::Blue));

        let (_, reply) = run(&mut console, "prev");
        assert_eq!(reply, "ply 0 (r to move)\n");
        let (_, reply) = run(&mut console, "prev");
        assert_eq!(reply, "no move\n");
        let (_, reply) = run(&mut console, "last");
        assert_eq!(reply, "ply 1 (b to move)\n");
    }

    #[test]
    fn bad_moves_report_an_error() {
        let mut console = started();

        let (_, reply) = run(&mut console, "move e2");
        assert!(reply.starts_with("error: move needs"));
        let (_, reply) = run(&mut console, "move z2 e4");
        assert!(reply.starts_with("error: malformed notation"));
        let (_, reply) = run(&mut console, "move b5 c5");
        assert!(reply.starts_with("error: illegal move"));
        assert_eq!(console.engine().move_number(), 0);
    }

    #[test]
    fn result_command_announces_game_over_once() {
        let mut console = started();

        let (_, reply) = run(&mut console, "result 0-1");
        assert_eq!(reply, "ok\ngame over 0-1\n");
        let (_, reply) = run(&mut console, "result 1/2-1/2");
        assert_eq!(reply, "ok\n");
        assert_eq!(console.engine().result(), GameResult::Draw);

        let (_, reply) = run(&mut console, "result maybe");
        assert!(reply.starts_with("error:"));
    }

    #[test]
    fn names_fen_and_setfen() {
        let mut console = started();

        run(&mut console, "names Ann Player");
        assert_eq!(console.engine().player_names()[0], "Ann");
        assert_eq!(console.engine().player_names()[2], "?");

        let (_, fen) = run(&mut console, "fen");
        assert!(fen.ends_with("r - - 0 1\n"));

        let yellow_to_move = fen.trim_end().replace(" r - - 0 1", " y - - 0 1");
        let (_, reply) = run(&mut console, &format!("setfen {yellow_to_move}"));
        assert_eq!(reply, "ok\n");
        assert_eq!(console.engine().current_player(), Some(Player::Yellow));
    }

    #[test]
    fn quit_stops_and_unknown_commands_are_reported() {
        let mut console = started();
        assert!(run(&mut console, "quit").0);

        let (quit, reply) = run(&mut console, "castle");
        assert!(!quit);
        assert!(reply.starts_with("error: unknown command 'castle'"));
        assert_eq!(run(&mut console, "   ").1, "");
    }

    #[test]
    fn tree_prints_the_move_tree_as_json() {
        let mut console = started();
        run(&mut console, "move e2 e4");
        run(&mut console, "prev");
        run(&mut console, "move d2 d3");

        let (_, reply) = run(&mut console, "tree");
        let json: serde_json::Value = serde_json::from_str(reply.trim()).expect("tree output is JSON");
        assert_eq!(json["move"], "root");
        assert_eq!(json["children"][0]["move"], "e4");
        assert_eq!(json["children"][1]["move"], "d3");
    }
}
