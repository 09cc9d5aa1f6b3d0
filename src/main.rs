mod app;
mod calendar;
mod help;
mod theme;
use crate::app::App;
use anyhow::Context;
use daypick::{DayPickerConfig, Matcher, SelectionMode, YearMonth};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum ModeArg {
    #[default]
    Single,
    Multiple,
    Range,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    mode: ModeArg,
    selected: Vec<Date>,
    months: Option<usize>,
    first_day: Option<u8>,
    from: Option<YearMonth>,
    to: Option<YearMonth>,
    min: Option<usize>,
    max: Option<usize>,
    required: bool,
    no_weekends: bool,
    fixed_weeks: bool,
    hide_outside_days: bool,
    log_file: Option<PathBuf>,
}

impl RunOptions {
    fn config(&self, today: Date) -> DayPickerConfig {
        let mode = match self.mode {
            ModeArg::Single => SelectionMode::Single {
                required: self.required,
            },
            ModeArg::Multiple => SelectionMode::Multiple {
                min: self.min.unwrap_or(0),
                max: self.max,
            },
            ModeArg::Range => SelectionMode::Range {
                required: self.required,
            },
        };
        let mut config = DayPickerConfig::new(today)
            .mode(mode)
            .selected(self.selected.clone())
            .number_of_months(self.months.unwrap_or(1))
            .first_day_of_week(self.first_day.unwrap_or(0))
            .month_bounds(self.from, self.to);
        if self.no_weekends {
            config = config.disable(Matcher::weekends());
        }
        config.fixed_weeks = self.fixed_weeks;
        config.show_outside_days = !self.hide_outside_days;
        config
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("mode") => {
                    let value = parser.value()?.string()?;
                    opts.mode = match value.as_str() {
                        "single" => ModeArg::Single,
                        "multiple" => ModeArg::Multiple,
                        "range" => ModeArg::Range,
                        _ => {
                            return Err(lexopt::Error::UnexpectedValue {
                                option: String::from("mode"),
                                value: value.into(),
                            })
                        }
                    };
                }
                Arg::Short('s') | Arg::Long("select") => {
                    opts.selected.push(parse_date(parser.value()?.string()?)?);
                }
                Arg::Short('n') | Arg::Long("months") => opts.months = Some(parser.value()?.parse()?),
                Arg::Long("first-day") => opts.first_day = Some(parser.value()?.parse()?),
                Arg::Long("from") => opts.from = Some(parse_month(parser.value()?.string()?)?),
                Arg::Long("to") => opts.to = Some(parse_month(parser.value()?.string()?)?),
                Arg::Long("min") => opts.min = Some(parser.value()?.parse()?),
                Arg::Long("max") => opts.max = Some(parser.value()?.parse()?),
                Arg::Long("required") => opts.required = true,
                Arg::Long("no-weekends") => opts.no_weekends = true,
                Arg::Long("fixed-weeks") => opts.fixed_weeks = true,
                Arg::Long("hide-outside-days") => opts.hide_outside_days = true,
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    opts.date = Some(parse_date(value)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let picker = opts
                    .config(today)
                    .validate()
                    .context("invalid day picker configuration")?;
                let selection = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let mut app = App::new(picker);
                    if let Some(date) = opts.date {
                        app = app.start_date(date);
                    }
                    app.run(terminal).context("failed to run day picker")
                })?;
                println!("{selection}");
                Ok(())
            }
            Command::Help => {
                println!("Usage: daypick [<options>] [YYYY-MM-DD]");
                println!();
                println!("Pick dates from a terminal calendar and print the selection");
                println!();
                println!("Options:");
                println!("  -m, --mode <MODE>     Selection mode: single, multiple, or range");
                println!("  -s, --select <DATE>   Start with DATE selected; may be repeated, and");
                println!("                        takes the start then the end of a range");
                println!("  -n, --months <N>      Number of months to show side by side");
                println!("      --first-day <D>   First day of the week, 0 (Sunday) to 6");
                println!("      --from <YYYY-MM>  Earliest month that can be shown");
                println!("      --to <YYYY-MM>    Latest month that can be shown");
                println!("      --min <N>         Fewest dates a multiple selection may hold");
                println!("      --max <N>         Most dates a multiple selection may hold");
                println!("      --required        Do not allow deselecting the selected date or");
                println!("                        collapsing a range to one day");
                println!("      --no-weekends     Disable Saturdays and Sundays");
                println!("      --fixed-weeks     Always show six weeks per month");
                println!("      --hide-outside-days");
                println!("                        Hide days of neighboring months");
                println!("      --log-file <PATH> Write debug logs to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
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
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(value: String) -> Result<Date, lexopt::Error> {
    match Date::parse(&value, &YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

fn parse_month(value: String) -> Result<YearMonth, lexopt::Error> {
    let date = match Date::parse(&format!("{value}-01"), &YMD_FMT) {
        Ok(d) => d,
        Err(e) => {
            return Err(lexopt::Error::ParsingFailed {
                value,
                error: Box::new(e),
            })
        }
    };
    YearMonth::of(date).map_err(|e| lexopt::Error::ParsingFailed {
        value,
        error: Box::new(e),
    })
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_module("daypick", log::LevelFilter::Debug)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::debug!("Logging to {}", path.display());
    Ok(())
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
