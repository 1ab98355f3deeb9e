#![allow(non_snake_case)]
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use log::info;
use strum::IntoEnumIterator;
use RustedPartials::Utils::config::CalculatorConfig;
use RustedPartials::Utils::logger::init_logger;
use RustedPartials::calculator::derivative_presenter::{Region, RegionState};
use RustedPartials::calculator::keypad::Key;
use RustedPartials::calculator::session::CalculatorSession;

const HELP: &str = "\
type text to insert it at the cursor
  =  or empty line   compute the partial derivatives
  :key <payload>     press a keypad key, e.g. :key sin()
  :keys              list the keypad
  :del               click the clear control (delete one; twice quickly clears all)
  :clear             double click the clear control (clear all)
  :left :right :home :end   move the cursor
  :help              this text
  :q                 quit";

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Submit,
    Type(&'a str),
    Key(&'a str),
    Keys,
    DeleteOne,
    ClearAll,
    Left,
    Right,
    Home,
    End,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" | "=" => Command::Submit,
        ":keys" => Command::Keys,
        ":del" => Command::DeleteOne,
        ":clear" => Command::ClearAll,
        ":left" => Command::Left,
        ":right" => Command::Right,
        ":home" => Command::Home,
        ":end" => Command::End,
        ":help" => Command::Help,
        ":q" | ":quit" => Command::Quit,
        _ => {
            if let Some(payload) = trimmed.strip_prefix(":key ") {
                Command::Key(payload.trim())
            } else if trimmed.starts_with(':') {
                Command::Unknown(trimmed)
            } else {
                Command::Type(trimmed)
            }
        }
    }
}

fn print_screen(session: &CalculatorSession) {
    println!("[{}]", session.display_with_cursor());
    for line in session.output() {
        println!("  {}", line);
    }
    if session.is_flashing() {
        let flashing: Vec<&'static str> = Region::iter()
            .filter(|region| session.region_state(*region) == RegionState::Error)
            .map(|region| region.into())
            .collect();
        println!("  !! {}", flashing.join(" "));
    }
}

/// Apply one command at time `now`. Returns false when the loop should stop.
fn run_command(session: &mut CalculatorSession, command: Command<'_>, now: Instant) -> bool {
    match command {
        Command::Submit => {
            session.submit(now);
        }
        Command::Type(text) => session.type_text(text),
        Command::Key(payload) => match Key::from_payload(payload) {
            Some(key) => session.press_key(key),
            None => println!("no key {:?}, see :keys", payload),
        },
        Command::Keys => println!("{}", Key::all_payloads().join("  ")),
        Command::DeleteOne => {
            session.press_clear(now);
        }
        Command::ClearAll => {
            // a click and a double click; whichever of the two presses clears, the field ends empty
            session.press_clear(now);
            session.press_clear(now);
        }
        Command::Left => session.move_left(),
        Command::Right => session.move_right(),
        Command::Home => session.move_home(),
        Command::End => session.move_end(),
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
        Command::Unknown(command) => println!("unknown command {}, see :help", command),
    }
    true
}

fn main() {
    let config_path = std::env::args().nth(1);
    let config = match CalculatorConfig::load(config_path.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_logger(&config.logging);
    info!("calculator started, config: {:?}", config_path);

    let mut session = CalculatorSession::new(config);
    println!(
        "partial derivative calculator, :help for commands (error flash {} ms)",
        session.config().error_flash.as_millis()
    );
    print_screen(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let now = Instant::now();
        session.tick(now);
        if !run_command(&mut session, parse_command(&line), now) {
            break;
        }
        print_screen(&session);
    }
}
