//! Text command interpreter over the core operations.
//!
//! Parsing ([`Command::parse`]) is separate from execution
//! ([`Session::execute`]); neither prints. The session owns at most one
//! image and only replaces it once a transform has succeeded.

use std::path::PathBuf;

use crate::{BitPlane, Bitmap, BitmapError, Unstoppable};

pub const HELP: &str = "\
Commands:
  load <filename>         - Load a BMP file
  save <filename>         - Save current image
  info                    - Show header details and stego capacity
  fill <R> <G> <B>        - Fill image with color
  rotate <angle>          - Rotate by angle (degrees)
  scale <factor>          - Scale by factor (e.g. 0.5, 2.0)
  resize <w> <h>          - Resize to width/height
  crop <x> <y> <w> <h>    - Crop region
  embed <message>         - Hide text inside image
  extract                 - Recover hidden text from image
  mode <lsb|msb>          - Select the bit plane used by embed/extract
  help                    - Show this list
  exit                    - Quit program";

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Load(PathBuf),
    Save(PathBuf),
    Info,
    Fill([u8; 3]),
    Rotate(f64),
    Scale(f64),
    Resize(u32, u32),
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    Embed(String),
    Extract,
    Mode(BitPlane),
    Help,
    Exit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() {
            return Ok(None);
        }
        let (name, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        let mut args = rest.split_whitespace();

        let cmd = match name {
            "load" => Self::Load(path_arg(args.next(), "load <filename>")?),
            "save" => Self::Save(path_arg(args.next(), "save <filename>")?),
            "info" => Self::Info,
            "fill" => {
                const USAGE: &str = "fill <R> <G> <B> (each 0-255)";
                let r = parse_arg(args.next(), USAGE)?;
                let g = parse_arg(args.next(), USAGE)?;
                let b = parse_arg(args.next(), USAGE)?;
                Self::Fill([r, g, b])
            }
            "rotate" => Self::Rotate(parse_arg(args.next(), "rotate <angle>")?),
            "scale" => Self::Scale(parse_arg(args.next(), "scale <factor>")?),
            "resize" => {
                const USAGE: &str = "resize <w> <h>";
                Self::Resize(parse_arg(args.next(), USAGE)?, parse_arg(args.next(), USAGE)?)
            }
            "crop" => {
                const USAGE: &str = "crop <x> <y> <w> <h>";
                Self::Crop {
                    x: parse_arg(args.next(), USAGE)?,
                    y: parse_arg(args.next(), USAGE)?,
                    width: parse_arg(args.next(), USAGE)?,
                    height: parse_arg(args.next(), USAGE)?,
                }
            }
            "embed" => {
                if rest.trim().is_empty() {
                    return Err(ParseError::Usage("embed <message>"));
                }
                Self::Embed(rest.to_string())
            }
            "extract" => Self::Extract,
            "mode" => Self::Mode(parse_arg(args.next(), "mode <lsb|msb>")?),
            "help" => Self::Help,
            "exit" | "quit" => Self::Exit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn path_arg(arg: Option<&str>, usage: &'static str) -> Result<PathBuf, ParseError> {
    arg.map(PathBuf::from).ok_or(ParseError::Usage(usage))
}

/// Parse one whitespace-separated argument with its `FromStr` impl.
fn parse_arg<T: std::str::FromStr>(
    arg: Option<&str>,
    usage: &'static str,
) -> Result<T, ParseError> {
    arg.and_then(|a| a.parse().ok())
        .ok_or(ParseError::Usage(usage))
}

/// Errors surfaced to the shell user.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("No image loaded.")]
    NoImage,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{action} failed: {source}")]
    Operation {
        action: &'static str,
        #[source]
        source: BitmapError,
    },
}

/// What the caller should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Show the message (may be empty) and read the next line.
    Continue(String),
    Exit,
}

/// Interpreter state: the current image and the selected bit plane.
#[derive(Debug, Default)]
pub struct Session {
    image: Option<Bitmap>,
    plane: BitPlane,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn plane(&self) -> BitPlane {
        self.plane
    }

    /// Parse and execute one input line.
    pub fn run_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        match Command::parse(line)? {
            Some(cmd) => self.execute(cmd),
            None => Ok(Flow::Continue(String::new())),
        }
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Flow, ShellError> {
        let msg = match cmd {
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => HELP.to_string(),
            Command::Mode(plane) => {
                self.plane = plane;
                format!("Bit plane set to {plane}.")
            }
            Command::Load(path) => {
                let img = crate::read_bmp(&path).map_err(fail("Load"))?;
                let msg = format!(
                    "Loaded {} ({}x{}, {} bpp)",
                    path.display(),
                    img.width(),
                    img.height(),
                    img.bit_count()
                );
                self.image = Some(img);
                msg
            }
            Command::Save(path) => {
                crate::write_bmp(&path, self.current()?).map_err(fail("Save"))?;
                format!("Saved image to {}", path.display())
            }
            Command::Info => describe(self.current()?),
            Command::Fill(color) => {
                let img = self.current_mut()?;
                if crate::fill(img, color) {
                    let [r, g, b] = color;
                    format!("Image filled with color ({r}, {g}, {b}).")
                } else {
                    format!(
                        "Fill skipped: only 24-bit images can be filled ({} bpp loaded).",
                        img.bit_count()
                    )
                }
            }
            Command::Rotate(angle) => {
                let out = crate::rotate(self.current()?, angle, Unstoppable)
                    .map_err(fail("Rotation"))?;
                self.image = Some(out);
                format!("Rotated image by {angle:.2} degrees.")
            }
            Command::Scale(factor) => {
                let out = crate::scale(self.current()?, factor, Unstoppable)
                    .map_err(fail("Scaling"))?;
                let msg = format!(
                    "Scaled image by {factor:.2}x to {}x{}.",
                    out.width(),
                    out.height().unsigned_abs()
                );
                self.image = Some(out);
                msg
            }
            Command::Resize(w, h) => {
                let out =
                    crate::resize(self.current()?, w, h, Unstoppable).map_err(fail("Resize"))?;
                self.image = Some(out);
                format!("Resized image to {w}x{h}.")
            }
            Command::Crop {
                x,
                y,
                width,
                height,
            } => {
                let out = crate::crop(self.current()?, x, y, width, height, Unstoppable)
                    .map_err(fail("Crop"))?;
                self.image = Some(out);
                format!("Cropped to region ({x},{y},{width},{height}).")
            }
            Command::Embed(message) => {
                let plane = self.plane;
                crate::embed(self.current_mut()?, &message, plane).map_err(fail("Embed"))?;
                format!("Message embedded ({} bytes, {plane}).", message.len())
            }
            Command::Extract => {
                let bytes = crate::extract(self.current()?, self.plane).map_err(fail("Extract"))?;
                format!("Extracted message: \"{}\"", String::from_utf8_lossy(&bytes))
            }
        };
        Ok(Flow::Continue(msg))
    }

    fn current(&self) -> Result<&Bitmap, ShellError> {
        self.image.as_ref().ok_or(ShellError::NoImage)
    }

    fn current_mut(&mut self) -> Result<&mut Bitmap, ShellError> {
        self.image.as_mut().ok_or(ShellError::NoImage)
    }
}

fn fail(action: &'static str) -> impl FnOnce(BitmapError) -> ShellError {
    move |source| ShellError::Operation { action, source }
}

fn describe(img: &Bitmap) -> String {
    let fh = &img.file_header;
    let ih = &img.info_header;
    let capacity = match crate::capacity(img) {
        Ok(bytes) => format!("{bytes} bytes"),
        Err(e) => format!("n/a ({e})"),
    };
    format!(
        "{}x{} ({}), {} bpp, compression {}\n\
         file size {}, pixel offset {}, image size {}\n\
         stego capacity: {capacity}",
        ih.width,
        ih.height.unsigned_abs(),
        match img.row_order() {
            crate::RowOrder::BottomUp => "bottom-up",
            crate::RowOrder::TopDown => "top-down",
        },
        ih.bit_count,
        ih.compression,
        fh.file_size,
        fh.pixel_offset,
        ih.image_size,
    )
}
