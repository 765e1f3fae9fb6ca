use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use clap::Parser;

use eval::Session;

#[derive(clap::Parser)]
struct Args {
    /// Evaluate this file line by line instead of starting a prompt
    file: Option<PathBuf>,
}

fn run_file(path: PathBuf, session: &mut Session) -> anyhow::Result<()> {
    for line in std::fs::read_to_string(path)?.lines() {
        run(line, session);
    }
    Ok(())
}

fn run_prompt(session: &mut Session) -> anyhow::Result<()> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }
        run(line.trim_end(), session);
    }
}

fn run(line: &str, session: &mut Session) {
    if line.trim().is_empty() {
        return;
    }
    // Errors only abort the current line, the session keeps going
    match session.run_line(line) {
        Ok(value) => println!("{}", value),
        Err(e) => println!("{}", e),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut session = Session::new();

    match args.file {
        Some(file) => run_file(file, &mut session),
        None => run_prompt(&mut session),
    }
}
