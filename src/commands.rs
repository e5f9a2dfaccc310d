use crate::error::{Error, Result};

use combine::error::ParseError;
use combine::parser::char::{digit, space, spaces, string};
use combine::{
    any, attempt, choice, eof, many1, skip_many1, stream::position, EasyParser, Parser, Stream,
};

/// A line typed into the command bar. Row numbers are 1-based, as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Rename(String),
    Theme(String),
    Exit,
}

impl Command {
    /// Zero-based store index for row commands. Row 0 maps to no task.
    pub(crate) fn index(row: usize) -> Option<usize> {
        row.checked_sub(1)
    }
}

fn keyword<Input>(long: &'static str, short: &'static str) -> impl Parser<Input, Output = ()>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    attempt(string(long)).or(string(short)).map(|_| ())
}

fn rest<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    skip_many1(space())
        .with(many1::<String, _, _>(any()))
        .map(|s| s.trim_end().to_string())
}

fn row<Input>() -> impl Parser<Input, Output = usize>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    // Numbers too large for usize can only name rows that do not exist.
    skip_many1(space())
        .with(many1::<String, _, _>(digit()))
        .skip(spaces())
        .map(|s| s.parse::<usize>().unwrap_or(usize::MAX))
}

fn command<Input>() -> impl Parser<Input, Output = Command>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let exit = choice((attempt(string("done")), attempt(string("quit")), string("q")))
        .skip(spaces())
        .skip(eof())
        .map(|_| Command::Exit);

    choice((
        attempt(exit),
        attempt(keyword("add", "a").with(rest()).map(Command::Add)),
        attempt(keyword("toggle", "x").with(row()).map(Command::Toggle)),
        attempt(keyword("delete", "d").with(row()).map(Command::Delete)),
        attempt(keyword("rename", "r").with(rest()).map(Command::Rename)),
        attempt(keyword("theme", "t").with(rest()).map(Command::Theme)),
    ))
    .skip(eof())
}

pub(crate) fn parse_command(input: &str) -> Result<Command> {
    let input = input.trim();
    command()
        .easy_parse(position::Stream::new(input))
        .map(|(c, _)| c)
        .map_err(|e| Error::Command(format!("Could not parse '{input}': {e}")))
}
