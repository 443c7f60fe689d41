use std::str::FromStr;

use log::debug;

use crate::pool::{Pool, Roll};
use crate::source::FaceSource;
use crate::{Error, Result};

/// One line of user input: `d`, `d+p`, `d+` or `+p`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Roll { dice: usize, pips: i32 },
    PipsOnly(i32),
}

impl Command {
    /// Rolls the command's pool. `PipsOnly` rolls nothing.
    pub fn execute<S>(&self, source: &mut S, crit_fail: bool) -> Result<Option<Roll>>
    where
        S: FaceSource + ?Sized,
    {
        match *self {
            Command::Roll { dice, pips } => Pool::builder(dice)
                .pips(pips)
                .crit_fail(crit_fail)
                .build()
                .roll(source)
                .map(Some),
            Command::PipsOnly(_) => Ok(None),
        }
    }
}

/// Turns one REPL line into the text printed back.
///
/// Every error becomes its message, so a bad line never ends the session.
pub fn respond<S>(line: &str, source: &mut S, crit_fail: bool) -> String
where
    S: FaceSource + ?Sized,
{
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => return e.to_string(),
    };
    debug!("{command:?}");
    match command.execute(source, crit_fail) {
        Ok(Some(roll)) => roll.to_string(),
        Ok(None) => match command {
            Command::PipsOnly(pips) => format!("No dice. Total = {pips}."),
            Command::Roll { .. } => String::new(),
        },
        Err(e) => e.to_string(),
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let line: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let malformed = || Error::MalformedInput(s.trim().to_string());

        let Some((dice, pips)) = line.split_once('+') else {
            let dice = line.parse().map_err(|_| malformed())?;
            return Ok(Command::Roll { dice, pips: 0 });
        };
        if pips.contains('+') {
            return Err(malformed());
        }

        match (dice.is_empty(), pips.is_empty()) {
            (true, true) => Err(malformed()),
            (true, false) => pips.parse().map(Command::PipsOnly).map_err(|_| malformed()),
            (false, true) => Ok(Command::Roll {
                dice: dice.parse().map_err(|_| malformed())?,
                pips: 0,
            }),
            (false, false) => Ok(Command::Roll {
                dice: dice.parse().map_err(|_| malformed())?,
                pips: pips.parse().map_err(|_| malformed())?,
            }),
        }
    }
}
