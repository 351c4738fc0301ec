//! Streaming `multipart/form-data` encoder for the predict upload.
//!
//! File parts are chained in as readers, so an upload never sits in memory.

use std::io::{Cursor, Read};

/// Body under construction: everything up to the last file part is already
/// chained into `stream`; text written since then waits in `pending`.
pub(crate) struct MultipartForm {
    boundary: String,
    stream: Box<dyn Read + Send>,
    streamed_len: u64,
    pending: Vec<u8>,
}

/// A finished body ready to hand to the HTTP client.
pub(crate) struct MultipartBody {
    pub(crate) content_type: String,
    pub(crate) content_length: u64,
    pub(crate) reader: Box<dyn Read + Send>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        Self::with_boundary(format!("----deeptone{:032x}", rand::random::<u128>()))
    }

    pub(crate) fn with_boundary(boundary: String) -> Self {
        Self {
            boundary,
            stream: Box::new(std::io::empty()),
            streamed_len: 0,
            pending: Vec::new(),
        }
    }

    pub(crate) fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.open_part();
        self.push_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quoted(name)
        ));
        self.push_line("");
        self.push_line(value);
        self
    }

    /// Add a file part whose `len` bytes are read from `contents` when the body is sent.
    pub(crate) fn file<R>(
        &mut self,
        name: &str,
        file_name: &str,
        content_type: &str,
        contents: R,
        len: u64,
    ) -> &mut Self
    where
        R: Read + Send + 'static,
    {
        self.open_part();
        self.push_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            escape_quoted(name),
            escape_quoted(file_name)
        ));
        self.push_line(&format!("Content-Type: {content_type}"));
        self.push_line("");
        self.flush_pending();
        self.chain(contents.take(len), len);
        self.push_line("");
        self
    }

    /// Close the body.
    pub(crate) fn finish(mut self) -> MultipartBody {
        let closing = format!("--{}--", self.boundary);
        self.push_line(&closing);
        self.flush_pending();
        MultipartBody {
            content_type: format!("multipart/form-data; boundary={}", self.boundary),
            content_length: self.streamed_len,
            reader: self.stream,
        }
    }

    fn chain<R: Read + Send + 'static>(&mut self, next: R, len: u64) {
        let stream = std::mem::replace(&mut self.stream, Box::new(std::io::empty()));
        self.stream = Box::new(stream.chain(next));
        self.streamed_len += len;
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let bytes = std::mem::take(&mut self.pending);
        let len = bytes.len() as u64;
        self.chain(Cursor::new(bytes), len);
    }

    fn open_part(&mut self) {
        let line = format!("--{}", self.boundary);
        self.push_line(&line);
    }

    fn push_line(&mut self, line: &str) {
        self.pending.extend_from_slice(line.as_bytes());
        self.pending.extend_from_slice(b"\r\n");
    }
}

/// Percent-escape characters that would break a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_body(body: MultipartBody) -> (String, u64, String) {
        let mut text = String::new();
        let mut reader = body.reader;
        reader.read_to_string(&mut text).unwrap();
        (body.content_type, body.content_length, text)
    }

    #[test]
    fn encodes_file_then_text_part() {
        let mut form = MultipartForm::with_boundary("XYZ".into());
        form.file("file", "a.wav", "audio/wav", Cursor::new(b"RIFF".to_vec()), 4)
            .text("username", "alice");
        let (content_type, content_length, body) = read_body(form.finish());
        assert_eq!(content_type, "multipart/form-data; boundary=XYZ");
        let expected = concat!(
            "--XYZ\r\n",
            "Content-Disposition: form-data; name=\"file\"; filename=\"a.wav\"\r\n",
            "Content-Type: audio/wav\r\n",
            "\r\n",
            "RIFF\r\n",
            "--XYZ\r\n",
            "Content-Disposition: form-data; name=\"username\"\r\n",
            "\r\n",
            "alice\r\n",
            "--XYZ--\r\n"
        );
        assert_eq!(body, expected);
        assert_eq!(content_length, expected.len() as u64);
    }

    #[test]
    fn file_part_is_cut_to_declared_length() {
        let mut form = MultipartForm::with_boundary("B".into());
        form.text("username", "bob").file(
            "file",
            "clip.mp3",
            "audio/mpeg",
            Cursor::new(b"0123456789".to_vec()),
            3,
        );
        let (_, content_length, body) = read_body(form.finish());
        assert!(body.starts_with("--B\r\nContent-Disposition: form-data; name=\"username\""));
        assert!(body.contains("\r\n\r\n012\r\n--B--\r\n"));
        assert!(!body.contains("3456"));
        assert_eq!(content_length, body.len() as u64);
    }

    #[test]
    fn quotes_and_newlines_in_filenames_are_escaped() {
        let mut form = MultipartForm::with_boundary("B".into());
        form.file("file", "evil\"\r\nname.mp3", "audio/mpeg", std::io::empty(), 0);
        let (_, _, body) = read_body(form.finish());
        assert!(body.contains("filename=\"evil%22%0D%0Aname.mp3\""));
    }

    #[test]
    fn generated_boundaries_differ() {
        let a = MultipartForm::new().finish().content_type;
        let b = MultipartForm::new().finish().content_type;
        assert_ne!(a, b);
    }
}
