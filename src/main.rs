mod command;
mod config;

use command::Command;
use config::{Config, Mode};
use keep_dice::Expression;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
roll|r <expr>     roll and print the total
verbose|v <expr>  show the kept faces of every term
full|f <expr>     show every rolled face
stats|s <expr>    minimum, maximum and expected value
help|h            this text
A bare expression or alias name is rolled in the configured mode.";

fn render(mode: Mode, expression: &Expression, rng: &mut ChaCha20Rng) -> String {
    match mode {
        Mode::Total => expression.roll(rng).to_string(),
        Mode::Verbose => {
            let (total, text) = expression.verbose_roll(rng);
            format!("{}\n= {}", text, total)
        }
        Mode::Full => expression.full_verbose_roll(rng).1,
    }
}

fn stats(expression: &Expression) -> String {
    format!(
        "{}: min {} max {} expected {:.3}",
        expression,
        expression.get_min(),
        expression.get_max(),
        expression.get_ev()
    )
}

fn answer(line: &str, config: &Config, rng: &mut ChaCha20Rng) -> String {
    match command::parse(line, config.mode, &config.aliases) {
        Ok(Command::Help) => HELP.to_string(),
        Ok(Command::Roll(mode, expression)) => render(mode, &expression, rng),
        Ok(Command::Stats(expression)) => stats(&expression),
        Err(e) => {
            log::debug!("rejected {:?}: {}", line, e);
            "invalid expression".to_string()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    log::info!("logger created");

    let config = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("DICE_CONSOLE_CONFIG"))
        .map(|path| Config::load(&PathBuf::from(path)))
        .unwrap_or_default();
    let mut rng = match config.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(out, "{}", answer(&line, &config, &mut rng))?;
        out.flush()?;
    }
    log::info!("input closed");
    Ok(())
}
