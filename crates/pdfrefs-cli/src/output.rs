use std::io::Write;
use std::path::Path;

/// Open the output destination; `None` or `-` means stdout.
pub fn open_writer(path: Option<&Path>) -> std::io::Result<Box<dyn Write>> {
    match path {
        Some(p) if p != Path::new("-") => Ok(Box::new(std::io::BufWriter::new(
            std::fs::File::create(p)?,
        ))),
        _ => Ok(Box::new(std::io::stdout().lock())),
    }
}

/// Write one paragraph per line, UTF-8, newline terminated.
pub fn write_paragraphs(w: &mut dyn Write, paragraphs: &[String]) -> std::io::Result<()> {
    for paragraph in paragraphs {
        writeln!(w, "{}", paragraph)?;
    }
    w.flush()
}
