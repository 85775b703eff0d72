//! Reader-to-writer plumbing for the transform.
//!
//! Drives a [`DirectiveTransform`] from any buffered reader into any writer
//! while keeping line-ending fidelity, plus a whole-file convenience.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::TransformError;
use crate::transform::DirectiveTransform;

impl DirectiveTransform {
    /// Stream `reader` through the transform into `writer`.
    ///
    /// Input is consumed incrementally, so spans may straddle read
    /// boundaries. Bytes that are not valid UTF-8 are replaced during
    /// decoding; directive recognition itself relies only on ASCII
    /// punctuation.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Io`] when reading or writing fails.
    pub fn transform_reader<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), TransformError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let chunk = String::from_utf8_lossy(&buf);
            writer.write_all(self.push(&chunk).as_bytes())?;
        }
        writer.write_all(self.finish().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Transform the file at `input` into the file at `output`.
    ///
    /// The output file is created (or truncated) before the first byte is
    /// read from the transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Io`] when either file cannot be opened or
    /// written.
    pub fn transform_file(&mut self, input: &Path, output: &Path) -> Result<(), TransformError> {
        tracing::debug!(input = %input.display(), output = %output.display(), "transforming file");
        let reader = BufReader::new(File::open(input)?);
        let writer = BufWriter::new(File::create(output)?);
        self.transform_reader(reader, writer)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use crate::instruction::{DropInstruction, IdentityInstruction, MinifyInstruction};
    use crate::transform::TransformConfig;

    use super::*;

    fn transform() -> DirectiveTransform {
        DirectiveTransform::new(
            TransformConfig::new()
                .with_default_instruction(|| Box::new(IdentityInstruction::new()))
                .with_instruction("drop", || Box::new(DropInstruction::new()))
                .with_instruction("min", || Box::new(MinifyInstruction::new())),
        )
        .unwrap()
    }

    #[test]
    fn test_transform_reader_round_trips_plain_input() {
        let input = "line one\nline two\n";
        let mut output = Vec::new();
        transform()
            .transform_reader(Cursor::new(input), &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), input);
    }

    #[test]
    fn test_transform_reader_applies_instructions() {
        let input = "<!-- drop:start -->\nsecret\n<!-- drop:end -->\nkept\n";
        let mut output = Vec::new();
        transform()
            .transform_reader(Cursor::new(input), &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "kept\n");
    }

    #[test]
    fn test_transform_reader_handles_invalid_utf8_content() {
        let input = b"keep\n\xff\xfe\n";
        let mut output = Vec::new();
        transform()
            .transform_reader(Cursor::new(&input[..]), &mut output)
            .unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("keep\n"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_transform_file() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("page.html");
        let output_path = dir.path().join("page.out.html");
        fs::write(
            &input_path,
            "<!-- min:start -->\n<script src=\"app.js\"></script>\n<!-- min:end -->\n",
        )
        .unwrap();

        transform()
            .transform_file(&input_path, &output_path)
            .unwrap();
        assert_eq!(
            fs::read_to_string(&output_path).unwrap(),
            "<script src=\"app.min.js\"></script>\n"
        );
    }

    #[test]
    fn test_transform_file_round_trips_without_directives() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("plain.html");
        let output_path = dir.path().join("plain.out.html");
        let content = "<html>\n  <body>text</body>\n</html>\n";
        fs::write(&input_path, content).unwrap();

        transform()
            .transform_file(&input_path, &output_path)
            .unwrap();
        assert_eq!(fs::read_to_string(&output_path).unwrap(), content);
    }

    #[test]
    fn test_transform_file_missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = transform().transform_file(
            &dir.path().join("does-not-exist.html"),
            &dir.path().join("out.html"),
        );
        assert!(matches!(result, Err(TransformError::Io(_))));
    }
}
