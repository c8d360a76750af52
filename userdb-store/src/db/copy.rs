//! PostgreSQL binary COPY encoder
//!
//! Produces the byte stream expected by `COPY ... FROM STDIN (FORMAT BINARY)`:
//!
//! ```text
//! header:  "PGCOPY\n\xff\r\n\0"  i32 flags (0)  i32 extension length (0)
//! tuple:   i16 field count, then per field: i32 byte length + bytes
//! trailer: i16 -1
//! ```
//!
//! All integers are big-endian. Text fields are sent as raw UTF-8, which is
//! the binary representation of `text`/`varchar`.

/// 11-byte file signature
pub const SIGNATURE: &[u8; 11] = b"PGCOPY\n\xff\r\n\0";

/// Buffered bytes after which the writer should flush a chunk
pub const CHUNK_SIZE: usize = 64 * 1024;

const TRAILER: i16 = -1;

/// Incremental encoder for one COPY stream
#[derive(Debug)]
pub struct BinaryCopyEncoder {
    buf: Vec<u8>,
    fields_per_row: i16,
    rows: u64,
}

impl BinaryCopyEncoder {
    /// Start a stream whose tuples all have `fields_per_row` columns.
    pub fn new(fields_per_row: i16) -> Self {
        let mut buf = Vec::with_capacity(CHUNK_SIZE);
        buf.extend_from_slice(SIGNATURE);
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        Self {
            buf,
            fields_per_row,
            rows: 0,
        }
    }

    /// Append one tuple of text fields.
    pub fn write_row(&mut self, fields: &[&str]) -> Result<(), sqlx::Error> {
        if fields.len() != self.fields_per_row as usize {
            return Err(sqlx::Error::Encode(
                format!(
                    "row has {} fields, stream expects {}",
                    fields.len(),
                    self.fields_per_row
                )
                .into(),
            ));
        }

        self.buf.extend_from_slice(&self.fields_per_row.to_be_bytes());
        for field in fields {
            let len = i32::try_from(field.len()).map_err(|_| {
                sqlx::Error::Encode(format!("field of {} bytes is too large", field.len()).into())
            })?;
            self.buf.extend_from_slice(&len.to_be_bytes());
            self.buf.extend_from_slice(field.as_bytes());
        }
        self.rows += 1;
        Ok(())
    }

    /// Whether the buffer has reached `CHUNK_SIZE`.
    pub fn should_flush(&self) -> bool {
        self.buf.len() >= CHUNK_SIZE
    }

    /// Tuples encoded so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Hand over the buffered bytes, keeping the encoder usable.
    pub fn take_chunk(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buf, Vec::with_capacity(CHUNK_SIZE))
    }

    /// Append the trailer and return whatever is left to send.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(&TRAILER.to_be_bytes());
        self.buf
    }
}
