use crate::decoder::MAGIC;
use crate::error::{Error, Result};
use crate::model::Image;
use std::{
    fmt, fs,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Canonical P3 layout: magic, `width height`, `maxColor`, then one `r g b`
/// line per pixel, newline-terminated.
struct Canonical<'a>(&'a Image);

impl fmt::Display for Canonical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let image = self.0;
        writeln!(f, "{MAGIC}")?;
        writeln!(f, "{} {}", image.width(), image.height())?;
        writeln!(f, "{}", image.max_color())?;
        for [r, g, b] in image.pixels() {
            writeln!(f, "{r} {g} {b}")?;
        }
        Ok(())
    }
}

pub fn encode(image: &Image) -> String {
    Canonical(image).to_string()
}

pub fn write_to<W: Write>(image: &Image, writer: W) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    write!(writer, "{}", Canonical(image))?;
    writer.flush()
}

/// Writes the image to `path` through a temporary file in the same directory,
/// renamed over the target once fully written.
///
/// An existing target keeps its permissions; a new one is created as 0644
/// (subject to the umask) on Unix.
pub fn write_file(image: &Image, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(
            existing
                .clone()
                .unwrap_or_else(|| fs::Permissions::from_mode(0o644)),
        );
    }

    let mut tmp = builder.tempfile_in(dir).map_err(io_err)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(io_err)?;
    }
    write_to(image, tmp.as_file_mut()).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    log::debug!("wrote {}", path.display());
    Ok(())
}
