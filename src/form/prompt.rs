use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use super::notice::Notice;
use super::session::Session;
use crate::core::{HeaderField, LineField, LineItem, LineItemDraft, format_currency};

const MENU: &str = "[a] Add More Goods  [l] List Goods  [g] Generate Invoice  [q] Quit";

/// Line-oriented terminal front end for a [`Session`].
///
/// Generic over its input and output so it can be driven from a script.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    default_date: Option<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter that offers today's date for the Date field.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            default_date: Some(chrono::Local::now().format("%d-%m-%Y").to_string()),
        }
    }

    /// Value used when the Date field is left blank; `None` leaves it blank.
    pub fn with_default_date(mut self, date: Option<String>) -> Self {
        self.default_date = date;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for every header field in form order. Returns `false` if the
    /// input ended first.
    pub fn capture_header(&mut self, session: &mut Session) -> io::Result<bool> {
        writeln!(self.output, "Invoice Generator")?;
        for field in HeaderField::ALL {
            let value = if field.is_multiline() {
                self.ask_multiline(field.label())?
            } else if field == HeaderField::Date {
                let label = match &self.default_date {
                    Some(date) => format!("{} [{date}]", field.label()),
                    None => field.label().to_string(),
                };
                self.ask(&label)?.map(|v| {
                    if v.trim().is_empty() {
                        self.default_date.clone().unwrap_or_default()
                    } else {
                        v
                    }
                })
            } else {
                self.ask(field.label())?
            };
            let Some(value) = value else {
                return Ok(false);
            };
            session.set_header(field, value.trim());
        }
        Ok(true)
    }

    /// Run the add-goods dialog until a valid item is accepted. Every
    /// rejection is reported and the dialog starts over. Returns `None` if
    /// the input ended.
    pub fn capture_line_item(&mut self, session: &mut Session) -> io::Result<Option<LineItem>> {
        loop {
            writeln!(self.output, "Add Goods")?;
            let mut draft = LineItemDraft::new();
            for field in LineField::ALL {
                let Some(value) = self.ask(field.label())? else {
                    return Ok(None);
                };
                draft.set(field, value);
            }
            match session.add_goods(&draft) {
                Ok(item) => {
                    let item = item.clone();
                    writeln!(
                        self.output,
                        "Added {} ({})",
                        item.description(),
                        format_currency(item.amount())
                    )?;
                    return Ok(Some(item));
                }
                Err(notice) => self.show(&notice)?,
            }
        }
    }

    /// Full interactive run: header, then the add / list / generate menu
    /// until the user quits or the input ends. The invoice may be generated
    /// any number of times. Returns the last written path, or `None` if
    /// nothing was generated.
    pub fn run(&mut self, session: &mut Session) -> io::Result<Option<PathBuf>> {
        let mut last = None;
        if !self.capture_header(session)? {
            return Ok(last);
        }
        loop {
            let Some(choice) = self.ask(MENU)? else {
                return Ok(last);
            };
            match choice.trim().to_ascii_lowercase().as_str() {
                "a" => {
                    if self.capture_line_item(session)?.is_none() {
                        return Ok(last);
                    }
                }
                "l" => write!(self.output, "{}", session.preview())?,
                "g" => match session.generate() {
                    Ok(path) => {
                        self.show(&Notice::generated(&path))?;
                        last = Some(path);
                    }
                    Err(notice) => self.show(&notice)?,
                },
                "q" => return Ok(last),
                other => writeln!(self.output, "Unknown choice {other:?}")?,
            }
        }
    }

    fn show(&mut self, notice: &Notice) -> io::Result<()> {
        writeln!(self.output, "{notice}")
    }

    /// Prompt for one line. `None` at end of input.
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for lines until an empty line. `None` if input ended before
    /// anything was entered.
    fn ask_multiline(&mut self, label: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{label} (end with an empty line):")?;
        self.output.flush()?;
        let mut lines = Vec::new();
        loop {
            match self.read_line()? {
                Some(line) if !line.trim().is_empty() => lines.push(line),
                Some(_) => break,
                None if lines.is_empty() => return Ok(None),
                None => break,
            }
        }
        Ok(Some(lines.join("\n")))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']);
        Ok(Some(trimmed.to_string()))
    }
}
