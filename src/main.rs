use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use getopts::{Matches, Options};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use wilddie::{print, respond, Analysis, FaceSource, DEFAULT_MAX_DICE, DEFAULT_REPEATS};

const PROMPT: &str = ">>>";

struct Settings {
    analyze: bool,
    max_dice: usize,
    repeats: usize,
    crit_fail: bool,
    seed: Option<u64>,
    verbose: bool,
}

fn print_help(program: &str, opts: &Options) {
    let brief = format!("Usage: {program} [options]");
    print!("{}", opts.usage(&brief));
}

fn opt_num<T>(matches: &Matches, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match matches.opt_str(name) {
        Some(s) => s.parse().with_context(|| format!("invalid --{name}: {s}")),
        None => Ok(default),
    }
}

fn parse_settings(matches: &Matches) -> Result<Settings> {
    Ok(Settings {
        analyze: matches.opt_present("analyze"),
        max_dice: opt_num(matches, "max-dice", DEFAULT_MAX_DICE)?,
        repeats: opt_num(matches, "repeats", DEFAULT_REPEATS)?,
        crit_fail: !matches.opt_present("no-crit"),
        seed: matches
            .opt_str("seed")
            .map(|s| s.parse::<u64>().with_context(|| format!("invalid --seed: {s}")))
            .transpose()?,
        verbose: matches.opt_present("verbose"),
    })
}

fn init_log(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to initialize logger")
}

fn analyze<S>(settings: &Settings, source: S) -> Result<()>
where
    S: FaceSource,
{
    let panels = Analysis::builder()
        .max_dice(settings.max_dice)
        .repeats(settings.repeats)
        .crit_fail(settings.crit_fail)
        .build()
        .run(source)?;
    print::print_panels(&panels);
    Ok(())
}

fn repl<S>(settings: &Settings, mut source: S) -> Result<()>
where
    S: FaceSource,
{
    println!("Wild die toolkit.");
    println!("Format: d+p where d = number of dice, p = pips");
    println!("    OR: d where d = number of dice");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;
        if matches!(line.trim(), "quit" | "exit") {
            return Ok(());
        }
        println!("{}", respond(&line, &mut source, settings.crit_fail));
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];

    let mut opts = Options::new();
    opts.optflag("h", "help", "Print this help");
    opts.optflag("a", "analyze", "Print distributions instead of rolling");
    opts.optopt("n", "max-dice", "Largest pool to analyze", "N");
    opts.optopt("r", "repeats", "Rolls sampled per pool", "N");
    opts.optflag("", "no-crit", "Disable the crit-1 rule");
    opts.optopt("s", "seed", "Seed for the random source", "SEED");
    opts.optflag("v", "verbose", "Debug logging");
    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(fail) => {
            eprintln!("{fail}");
            print_help(program, &opts);
            std::process::exit(1);
        }
    };

    if matches.opt_present("h") {
        print_help(program, &opts);
        return Ok(());
    }

    let settings = parse_settings(&matches)?;
    init_log(settings.verbose)?;

    match (settings.seed, settings.analyze) {
        (Some(seed), true) => analyze(&settings, StdRng::seed_from_u64(seed)),
        (Some(seed), false) => repl(&settings, StdRng::seed_from_u64(seed)),
        (None, true) => analyze(&settings, thread_rng()),
        (None, false) => repl(&settings, thread_rng()),
    }
}
