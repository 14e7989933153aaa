use std::io::{self, BufRead, Write};

use minilisp::Interpreter;

const PROMPT: &str = "λ ";
const QUIT_COMMAND: &str = "quit";

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("minilisp {} starting", env!("CARGO_PKG_VERSION"));

    let session = Interpreter::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "{}", PROMPT)?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }
        if !line.is_empty() {
            match session.run(line) {
                Ok(value) => writeln!(stdout, "{}", value)?,
                Err(err) => writeln!(stdout, "error: {}", err)?,
            }
        }
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;
    }

    log::info!("minilisp exiting");
    Ok(())
}
