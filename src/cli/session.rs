//! Interactive exploration session
//!
//! Reads one command per line from any `BufRead` and writes the game text to
//! any `Write`, so the whole loop runs the same on a terminal and in tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, instrument, warn};

use crate::cli::output;
use crate::domain::{Arrival, Command, Event, Exits, Explorer, MapArena, Side, State, Stop};

const EMPTY_MAP: &str = "Mapa vazio.";
const WELCOME: &str = "Bem-vindo(a) à mansão Detective Quest!";
const LOCATION: &str = "Você está em:";
const PROMPT: &str = "Escolha (e/d/s):";
const INVALID: &str = "Opção inválida. Tente novamente.";
const DEAD_END: &str = "Não há saídas a partir daqui. Fim da exploração.";
const USER_QUIT: &str = "Exploração encerrada pelo jogador.";

/// Drives an [`Explorer`] over line-based input and text output.
pub struct Session<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the explorer stops; returns why it stopped.
    ///
    /// Only output errors are returned. Input that cannot be read ends the
    /// session like end of input does.
    #[instrument(level = "debug", skip_all)]
    pub fn run(&mut self, explorer: &mut Explorer<'_>) -> io::Result<Stop> {
        if let State::Stopped(stop) = explorer.state() {
            self.close(stop)?;
            return Ok(stop);
        }
        self.welcome(explorer.trail().first().copied().unwrap_or_default())?;

        let stop = loop {
            match explorer.arrive() {
                Arrival::Stopped(stop) => break stop,
                Arrival::DeadEnd { name } => {
                    output::location(&mut self.out, LOCATION, name)?;
                    break Stop::DeadEnd;
                }
                Arrival::Room { name, exits } => {
                    output::location(&mut self.out, LOCATION, name)?;
                    self.options(exits)?;
                    output::prompt(&mut self.out, PROMPT)?;

                    let command = self.read_command();
                    debug!(?command, room = name, "command");
                    match explorer.apply(command) {
                        Event::Moved { .. } => {}
                        Event::NoPath(side) => output::notice(&mut self.out, no_path(side))?,
                        Event::Invalid(_) => output::notice(&mut self.out, INVALID)?,
                        Event::Stopped(stop) => break stop,
                    }
                }
            }
        };

        self.close(stop)?;
        info!(%stop, trail = ?explorer.trail(), "session ended");
        Ok(stop)
    }

    fn welcome(&mut self, root: &str) -> io::Result<()> {
        writeln!(self.out)?;
        output::header(&mut self.out, WELCOME)?;
        output::info(
            &mut self.out,
            &format!("Explore a partir da sala {root} escolhendo os caminhos.\n"),
        )
    }

    fn options(&mut self, exits: Exits) -> io::Result<()> {
        let mut paths = Vec::with_capacity(2);
        if exits.has(Side::Left) {
            paths.push(format!("[{}] esquerda", Command::LEFT));
        }
        if exits.has(Side::Right) {
            paths.push(format!("[{}] direita", Command::RIGHT));
        }
        output::info(
            &mut self.out,
            &format!(
                "Caminhos disponíveis: {} | [{}] sair",
                paths.join(", "),
                Command::QUIT
            ),
        )
    }

    fn close(&mut self, stop: Stop) -> io::Result<()> {
        let msg = match stop {
            Stop::DeadEnd => DEAD_END,
            Stop::UserQuit => USER_QUIT,
            Stop::EmptyMap => EMPTY_MAP,
        };
        output::closing(&mut self.out, msg)
    }

    /// Bytes that are not UTF-8 decode to U+FFFD, so they only make the
    /// command invalid when they come first on the line.
    fn read_command(&mut self) -> Command {
        let mut buf = Vec::new();
        match self.input.read_until(b'\n', &mut buf) {
            Ok(0) => Command::parse(None),
            Ok(_) => Command::parse(Some(&String::from_utf8_lossy(&buf))),
            Err(e) => {
                warn!(error = %e, "cannot read input, treating as end of input");
                Command::parse(None)
            }
        }
    }
}

fn no_path(side: Side) -> &'static str {
    match side {
        Side::Left => "Não há caminho à esquerda a partir desta sala.",
        Side::Right => "Não há caminho à direita a partir desta sala.",
    }
}

/// Explore `map` with `input`/`out`, then release the map.
///
/// The map is released on every path out of the session, including
/// output errors.
#[instrument(level = "debug", skip_all)]
pub fn explore<R: BufRead, W: Write>(map: MapArena, input: R, out: W) -> io::Result<Stop> {
    let result = {
        let mut explorer = Explorer::new(&map);
        Session::new(input, out).run(&mut explorer)
    };
    let released = map.release();
    debug!(rooms = released.len(), "released map");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{layout, MapBuilder};
    use std::io::Cursor;

    fn play(input: &str) -> (Stop, String) {
        colored::control::set_override(false);
        let map = MapBuilder::build(&layout::mansion()).unwrap();
        let mut explorer = Explorer::new(&map);
        let mut session = Session::new(Cursor::new(input.as_bytes()), Vec::new());
        let stop = session.run(&mut explorer).unwrap();
        (stop, String::from_utf8(session.into_output()).unwrap())
    }

    #[test]
    fn options_list_only_available_sides() {
        let (_, out) = play("e\nd\ns\n");
        assert!(out.contains("Caminhos disponíveis: [e] esquerda, [d] direita | [s] sair"));
        assert!(out.contains("Você está em: Biblioteca\nCaminhos disponíveis: [d] direita | [s] sair"));
    }

    #[test]
    fn unavailable_side_prints_notice_and_reprompts() {
        let (stop, out) = play("e\nd\ne\nd\n");
        assert_eq!(stop, Stop::DeadEnd);
        assert!(out.contains("Não há caminho à esquerda a partir desta sala."));
        assert_eq!(out.matches("Você está em: Biblioteca").count(), 2);
        assert!(out.contains("Você está em: Sala secreta"));
    }

    #[test]
    fn welcome_is_written_once() {
        let (_, out) = play("x\nx\ns\n");
        assert_eq!(out.matches(WELCOME).count(), 1);
        assert_eq!(out.matches(INVALID).count(), 2);
    }

    #[test]
    fn welcome_names_the_root_room() {
        let (_, out) = play("s\n");
        assert!(out.contains("Explore a partir da sala Hall de entrada escolhendo os caminhos."));
    }

    #[test]
    fn non_utf8_bytes_after_the_command_are_ignored() {
        colored::control::set_override(false);
        let map = MapBuilder::build(&layout::mansion()).unwrap();
        let mut out = Vec::new();
        let stop = explore(map, Cursor::new(&b"e\xff\ns\n"[..]), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(stop, Stop::UserQuit);
        assert!(out.contains("Você está em: Sala de estar"));
        assert!(!out.contains(INVALID));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn output_error_is_returned_after_releasing_map() {
        let map = MapBuilder::build(&layout::mansion()).unwrap();
        let err = explore(map, Cursor::new(&b"e\ns\n"[..]), BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn output_error_on_empty_map_is_returned() {
        let err = explore(MapArena::new(), Cursor::new(&b""[..]), BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn invalid_utf8_line_is_an_invalid_command() {
        colored::control::set_override(false);
        let map = MapBuilder::build(&layout::mansion()).unwrap();
        let mut explorer = Explorer::new(&map);
        let input: &[u8] = b"\xff\xfe\nd\n";
        let mut session = Session::new(input, Vec::new());
        let stop = session.run(&mut explorer).unwrap();
        let out = String::from_utf8(session.into_output()).unwrap();

        assert_eq!(stop, Stop::UserQuit);
        assert!(out.contains(INVALID));
        assert!(out.contains("Você está em: Jardim"));
    }
}
