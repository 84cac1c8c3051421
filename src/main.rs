mod app;
mod birthdate;
mod config;
mod export;
mod grid;
mod help;
mod paint;
mod theme;
use crate::app::App;
use crate::config::{GridConfig, DEFAULT_COLS_PER_RECT, DEFAULT_LIFESPAN, DEFAULT_ROWS_PER_RECT};
use crate::grid::{GridWindow, LifeGrid};
use crate::paint::Birthdate;
use crate::theme::{Palette, DEFAULT_LIVED_COLOR};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{style::Color, DefaultTerminal};
use std::io::{self, Write};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Environment variable holding a `tracing` filter directive.  Nothing is
/// logged unless it is set.
const LOG_ENV: &str = "LIFEWEEKS_LOG";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Options {
    birthdate: Option<Birthdate>,
    today: Option<Date>,
    lifespan: u16,
    rows_per_rect: usize,
    cols_per_rect: usize,
    color: Color,
    print: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            birthdate: None,
            today: None,
            lifespan: DEFAULT_LIFESPAN,
            rows_per_rect: DEFAULT_ROWS_PER_RECT.get(),
            cols_per_rect: DEFAULT_COLS_PER_RECT.get(),
            color: DEFAULT_LIVED_COLOR,
            print: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("color") => opts.color = parser.value()?.parse()?,
                Arg::Long("cols") => opts.cols_per_rect = parser.value()?.parse()?,
                Arg::Long("rows") => opts.rows_per_rect = parser.value()?.parse()?,
                Arg::Short('l') | Arg::Long("lifespan") => opts.lifespan = parser.value()?.parse()?,
                Arg::Short('p') | Arg::Long("print") => opts.print = true,
                Arg::Short('t') | Arg::Long("today") => {
                    let today = parser.value()?.parse_with(|s| Date::parse(s, &YMD_FMT))?;
                    opts.today = Some(today);
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Value(value) if opts.birthdate.is_none() => {
                    opts.birthdate = Some(value.parse()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let config = GridConfig::new(opts.lifespan, opts.rows_per_rect, opts.cols_per_rect)
                    .context("invalid calendar dimensions")?;
                let today = match opts.today {
                    Some(today) => today,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                let mut window = GridWindow::new(LifeGrid::build(config), Palette::new(opts.color));
                if opts.print {
                    if let Some(birthdate) = opts.birthdate {
                        window.paint(birthdate, today);
                    }
                    let mut out = io::stdout().lock();
                    for line in export::snapshot(&mut window)? {
                        writeln!(out, "{line}").context("failed to write calendar")?;
                    }
                    Ok(())
                } else {
                    with_terminal(|mut terminal| {
                        terminal.hide_cursor().context("failed to hide cursor")?;
                        let mut app = App::new(window, today);
                        if let Some(birthdate) = opts.birthdate {
                            app = app.with_birthdate(birthdate);
                        }
                        app.run(terminal)?;
                        Ok(())
                    })
                }
            }
            Command::Help => {
                println!("Usage: lifeweeks [options] [DD/MM/YYYY]");
                println!();
                println!("Terminal calendar of a lifetime drawn one week per cell");
                println!();
                println!("Options:");
                println!("  -c, --color <COLOR>       Color of lived weeks [default: gray]");
                println!("      --cols <N>            Columns per rectangle [default: 26]");
                println!("      --rows <N>            Rows per rectangle [default: 10]");
                println!("  -l, --lifespan <YEARS>    Assumed lifespan in years [default: 81]");
                println!("  -p, --print               Print the calendar to stdout and exit");
                println!("  -t, --today <YYYY-MM-DD>  Use the given date as today");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    Command::from_parser(Parser::from_env())?.run()
}

// Logs go to stderr, which shares the terminal with the calendar, so they
// are only enabled on request.
fn init_logging() {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
