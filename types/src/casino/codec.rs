use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, ReadExt, Write};

/// Write a label as a u32 length followed by its UTF-8 bytes.
pub fn write_string(label: &str, writer: &mut impl BufMut) {
    (label.len() as u32).write(writer);
    writer.put_slice(label.as_bytes());
}

/// Read a length-prefixed UTF-8 label of at most `max_len` bytes.
pub fn read_string(reader: &mut impl Buf, max_len: usize) -> Result<String, Error> {
    let len = u32::read(reader)? as usize;
    if len > max_len {
        return Err(Error::Invalid("label", "exceeds maximum length"));
    }
    if reader.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    let bytes = reader.copy_to_bytes(len);
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::Invalid("label", "not UTF-8"))
}

/// Encoded size of a label written with [write_string].
pub fn string_encode_size(label: &str) -> usize {
    u32::SIZE + label.len()
}
