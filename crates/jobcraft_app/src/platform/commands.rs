use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jobcraft_core::{ExportExtension, Msg, OperationKind, ResumeInput};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  resume <path>        select the CV file (txt, pdf, docx)
  jd <text>            set the job description
  jd-file <path>       load the job description from a file
  tailor               tailor the CV to the job description
  cover                generate a cover letter
  copy                 copy the result to the clipboard
  export <txt|docx>    save the result to the output directory
  reset                start over
  show                 print the current state
  help                 show this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resume(PathBuf),
    JobDescription(String),
    JobDescriptionFile(PathBuf),
    Dispatch(OperationKind),
    Copy,
    Export(ExportExtension),
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

#[derive(Debug, Error)]
#[error("could not read {}: {source}", .path.display())]
pub struct ReadError {
    path: PathBuf,
    source: io::Error,
}

impl ReadError {
    fn new(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }
    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (trimmed, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "resume" | "cv" => Command::Resume(required_path(rest, "resume <path>")?),
        // Kept verbatim: the description may legitimately start or end with spaces.
        "jd" => Command::JobDescription(rest.to_string()),
        "jd-file" => Command::JobDescriptionFile(required_path(rest, "jd-file <path>")?),
        "tailor" => Command::Dispatch(OperationKind::TailorCv),
        "cover" => Command::Dispatch(OperationKind::GenerateCoverLetter),
        "copy" => Command::Copy,
        "export" => {
            let extension = if rest.trim().is_empty() {
                ExportExtension::default()
            } else {
                ExportExtension::parse(rest).ok_or(CommandError::Usage("export <txt|docx>"))?
            };
            Command::Export(extension)
        }
        "reset" => Command::Reset,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required_path(rest: &str, usage: &'static str) -> Result<PathBuf, CommandError> {
    let path = rest.trim().trim_matches('"');
    if path.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(PathBuf::from(path))
}

/// Turns a state-changing command into a message, reading any files it names.
///
/// Returns `Ok(None)` for commands the driver handles itself.
pub fn into_msg(command: Command) -> Result<Option<Msg>, ReadError> {
    let msg = match command {
        Command::Resume(path) => {
            Msg::ResumeSelected(read_resume(&path).map_err(ReadError::new(&path))?)
        }
        Command::JobDescription(text) => Msg::JobDescriptionChanged(text),
        Command::JobDescriptionFile(path) => {
            Msg::JobDescriptionChanged(fs::read_to_string(&path).map_err(ReadError::new(&path))?)
        }
        Command::Dispatch(kind) => Msg::DispatchClicked(kind),
        Command::Copy => Msg::CopyClicked,
        Command::Export(extension) => Msg::ExportClicked(extension),
        Command::Reset => Msg::ResetClicked,
        Command::Show | Command::Help | Command::Quit => return Ok(None),
    };
    Ok(Some(msg))
}

fn read_resume(path: &Path) -> io::Result<ResumeInput> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ResumeInput::new(file_name, bytes))
}
