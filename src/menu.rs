//! Interactive menu loop over the converter.
//!
//! [`Session`] exposes one entry point per action so the core can be driven
//! without a console; [`Session::run`] layers the line-oriented menu on top.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::display::{self, Format};
use crate::error::{InvalidChoice, ParseError};
use crate::interpret::{self, Interpretation};
use crate::offset::{self, Clock, Generated, OffsetChoice};
use crate::zone::LocalOffset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Interpret,
    Generate,
    Now,
    Exit,
}

impl MenuAction {
    pub fn parse(input: &str) -> Result<Self, InvalidChoice> {
        match input.trim() {
            "1" => Ok(MenuAction::Interpret),
            "2" => Ok(MenuAction::Generate),
            "3" => Ok(MenuAction::Now),
            "0" => Ok(MenuAction::Exit),
            other => Err(InvalidChoice::new(other)),
        }
    }
}

pub struct Session<C: Clock> {
    offset: LocalOffset,
    clock: C,
    format: Format,
}

impl<C: Clock> Session<C> {
    pub fn new(offset: LocalOffset, clock: C, format: Format) -> Self {
        Self {
            offset,
            clock,
            format,
        }
    }

    pub fn offset(&self) -> LocalOffset {
        self.offset
    }

    pub fn interpret(&self, raw: &str) -> Result<Interpretation, ParseError> {
        interpret::interpret(raw, &self.offset)
    }

    pub fn generate(&self, choice: OffsetChoice) -> Result<Generated, ParseError> {
        offset::generate(self.clock.now_utc(), choice, &self.offset)
    }

    pub fn now(&self) -> Result<Generated, ParseError> {
        offset::current(self.clock.now_utc(), &self.offset)
    }

    /// Drive the menu until the user exits or input runs out.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<()> {
        log::info!("session started, local offset {}", self.offset);
        loop {
            display::print_main_menu(&mut out)?;
            let Some(line) = read_line(&mut input)? else {
                log::info!("input closed, leaving menu");
                writeln!(out)?;
                return Ok(());
            };

            let action = match MenuAction::parse(&line) {
                Ok(action) => action,
                Err(e) => {
                    log::debug!("rejected menu input {:?}", e.input);
                    display::print_error(&mut out, &e.to_string())?;
                    continue;
                }
            };

            match action {
                MenuAction::Exit => {
                    display::print_goodbye(&mut out)?;
                    return Ok(());
                }
                MenuAction::Interpret => {
                    display::print_prompt(
                        &mut out,
                        "Enter Unix timestamp (seconds or milliseconds): ",
                    )?;
                    let Some(raw) = read_line(&mut input)? else {
                        return Ok(());
                    };
                    match self.interpret(&raw) {
                        Ok(result) => display::print_interpretation(&mut out, &result, self.format)?,
                        Err(e) => display::print_error(&mut out, &e.to_string())?,
                    }
                }
                MenuAction::Generate => {
                    display::print_offset_menu(&mut out)?;
                    let Some(raw) = read_line(&mut input)? else {
                        return Ok(());
                    };
                    let outcome = OffsetChoice::from_menu(&raw)
                        .map_err(|e| e.to_string())
                        .and_then(|choice| self.generate(choice).map_err(|e| e.to_string()));
                    match outcome {
                        Ok(result) => display::print_generated(&mut out, &result, self.format)?,
                        Err(msg) => display::print_error(&mut out, &msg)?,
                    }
                }
                MenuAction::Now => match self.now() {
                    Ok(result) => display::print_generated(&mut out, &result, self.format)?,
                    Err(e) => display::print_error(&mut out, &e.to_string())?,
                },
            }
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
