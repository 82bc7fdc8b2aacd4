//! JSON rendering and output writing for exported packages.

use std::io::Write;
use std::path::{Path, PathBuf};

use capella_schema_core::Package;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

use crate::error::Result;

/// JSON indentation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Single line, no pretty printing.
    Compact,
    /// Pretty printed with this many spaces per level.
    Spaces(usize),
}

impl Indent {
    /// Maps a user-supplied width: negative disables pretty printing.
    ///
    /// # Examples
    ///
    /// ```
    /// use capella_schema_export::output::Indent;
    ///
    /// assert_eq!(Indent::from_width(-1), Indent::Compact);
    /// assert_eq!(Indent::from_width(0), Indent::Spaces(0));
    /// assert_eq!(Indent::from_width(4), Indent::Spaces(4));
    /// ```
    pub fn from_width(width: i64) -> Self {
        usize::try_from(width).map_or(Self::Compact, Self::Spaces)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Parses a CLI path argument, where `-` means stdout.
    pub fn from_arg(raw: &str) -> Self {
        if raw == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

/// Renders a package as JSON, terminated by a newline.
///
/// # Examples
///
/// ```
/// use capella_schema_core::Package;
/// use capella_schema_export::output::{Indent, render_json};
///
/// let package = Package::new("Data", "pkg-1");
/// assert_eq!(
///     render_json(&package, Indent::Compact).unwrap(),
///     "{\"name\":\"Data\",\"prefix\":\"pkg-1\"}\n"
/// );
/// ```
pub fn render_json(package: &Package, indent: Indent) -> Result<String> {
    let mut buf = Vec::new();
    match indent {
        Indent::Compact => {
            let mut serializer = Serializer::with_formatter(&mut buf, CompactFormatter);
            package.serialize(&mut serializer)?;
        }
        Indent::Spaces(width) => {
            let spaces = " ".repeat(width);
            let formatter = PrettyFormatter::with_indent(spaces.as_bytes());
            let mut serializer = Serializer::with_formatter(&mut buf, formatter);
            package.serialize(&mut serializer)?;
        }
    }
    buf.push(b'\n');
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes rendered output to the target.
///
/// File output is atomic: the content goes to a temporary file next to the
/// destination, which is then renamed over it.
pub fn write_output(target: &OutputTarget, contents: &str) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => write_atomic(path, contents)?,
    }
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use capella_schema_core::{Struct, StructAttr};

    use super::*;

    fn sample() -> Package {
        Package::new("Data", "pkg-1")
            .with_struct(Struct::new("Cup").with_attr(StructAttr::new("volume", "1", "Float")))
    }

    #[test]
    fn test_compact_is_single_line() {
        let raw = render_json(&sample(), Indent::Compact).unwrap();

        assert_eq!(raw.lines().count(), 1);
        assert!(raw.ends_with("}\n"));
    }

    #[test]
    fn test_indent_width_is_respected() {
        let raw = render_json(&sample(), Indent::Spaces(4)).unwrap();

        assert!(raw.starts_with("{\n    \"name\": \"Data\""));
        assert!(raw.contains("\n        {\n            \"name\": \"Cup\""));
    }

    #[test]
    fn test_zero_indent_keeps_newlines() {
        let raw = render_json(&sample(), Indent::Spaces(0)).unwrap();

        assert!(raw.starts_with("{\n\"name\": \"Data\""));
    }

    #[test]
    fn test_output_target_from_arg() {
        assert_eq!(OutputTarget::from_arg("-"), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_arg("out.json"),
            OutputTarget::File(PathBuf::from("out.json"))
        );
    }

    #[test]
    fn test_write_output_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "stale").unwrap();

        write_output(&OutputTarget::File(path.clone()), "{}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
