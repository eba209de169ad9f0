//! CRLF line framing for the protocol stream.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use mikobot_proto::{MAX_LINE_LEN, Message};

use crate::error::ClientError;

/// Frames the byte stream into protocol lines.
///
/// Decoding splits on LF and trims a preceding CR; encoding renders a
/// message followed by CRLF. Lines beyond the protocol cap are
/// rejected in both directions.
#[derive(Debug, Default)]
pub struct LineCodec {
    // scan offset into the read buffer, so repeated decode calls do
    // not rescan bytes already searched for a newline
    next_index: usize,
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ClientError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ClientError> {
        if let Some(offset) = src[self.next_index..].iter().position(|&b| b == b'\n') {
            let end = self.next_index + offset;
            let line = src.split_to(end + 1);
            self.next_index = 0;
            let line = &line[..line.len() - 1];
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            Ok(Some(String::from_utf8_lossy(line).into_owned()))
        } else if src.len() > MAX_LINE_LEN {
            Err(ClientError::LineTooLong {
                len: src.len(),
                limit: MAX_LINE_LEN,
            })
        } else {
            self.next_index = src.len();
            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, ClientError> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if src.is_empty() => Ok(None),
            // A final line without a newline, from a server that closed
            // mid-write.
            None => {
                let line = src.split_to(src.len());
                self.next_index = 0;
                let line = line.strip_suffix(b"\r").unwrap_or(&line);
                Ok(Some(String::from_utf8_lossy(line).into_owned()))
            }
        }
    }
}

impl Encoder<Message> for LineCodec {
    type Error = ClientError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> Result<(), ClientError> {
        let line = msg.to_string();
        if line.len() + 2 > MAX_LINE_LEN {
            return Err(ClientError::LineTooLong {
                len: line.len() + 2,
                limit: MAX_LINE_LEN,
            });
        }
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
