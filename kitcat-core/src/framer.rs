// ABOUTME: Kitty graphics protocol framing: base64 encoding and fixed-size chunking
// ABOUTME: Tags each chunk with its position and the control options that position carries

use crate::constants::protocol::{APC_END, APC_START, CHUNK_SIZE, FORMAT_PNG};
use crate::encode::EncodedPayload;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;

/// Where a chunk sits in the transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPosition {
    /// The whole payload in one sequence
    Single,
    First,
    Middle,
    Last,
}

/// `a=` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `a=T`: transmit and display
    TransmitAndDisplay,
}

impl Action {
    fn code(self) -> char {
        match self {
            Action::TransmitAndDisplay => 'T',
        }
    }
}

/// Control data for one escape sequence, serialized as `f=..,a=..,m=..`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlOptions {
    pub format: Option<u32>,
    pub action: Option<Action>,
    pub more: bool,
}

impl ControlOptions {
    pub fn for_position(position: ChunkPosition) -> Self {
        let display = Self {
            format: Some(FORMAT_PNG),
            action: Some(Action::TransmitAndDisplay),
            more: false,
        };

        match position {
            ChunkPosition::Single => display,
            ChunkPosition::First => Self {
                more: true,
                ..display
            },
            ChunkPosition::Middle => Self {
                more: true,
                ..Self::default()
            },
            ChunkPosition::Last => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ControlOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        if let Some(format) = self.format {
            write!(f, "{}f={}", separator, format)?;
            separator = ",";
        }
        if let Some(action) = self.action {
            write!(f, "{}a={}", separator, action.code())?;
            separator = ",";
        }
        if self.more {
            write!(f, "{}m=1", separator)?;
        }
        Ok(())
    }
}

/// One protocol unit: a slice of the base64 text plus its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub position: ChunkPosition,
    pub data: &'a str,
}

impl Chunk<'_> {
    pub fn options(&self) -> ControlOptions {
        ControlOptions::for_position(self.position)
    }
}

/// Renders the complete `ESC _ G <opts> ; <data> ESC \` sequence
impl fmt::Display for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{};{}{}", APC_START, self.options(), self.data, APC_END)
    }
}

/// Base64 text of one payload, ready to be chunked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    encoded: String,
}

impl Transmission {
    pub fn new(payload: &EncodedPayload) -> Self {
        Self {
            encoded: STANDARD.encode(payload.bytes()),
        }
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    pub fn chunks(&self) -> Vec<Chunk<'_>> {
        split_chunks(&self.encoded)
    }
}

/// Split ASCII text into `CHUNK_SIZE` pieces tagged Single, or First/Middle*/Last
pub fn split_chunks(text: &str) -> Vec<Chunk<'_>> {
    if text.len() <= CHUNK_SIZE {
        return vec![Chunk {
            position: ChunkPosition::Single,
            data: text,
        }];
    }

    let mut chunks = Vec::with_capacity(text.len().div_ceil(CHUNK_SIZE));
    let mut start = 0;
    while start < text.len() {
        let end = (start + CHUNK_SIZE).min(text.len());
        let position = if start == 0 {
            ChunkPosition::First
        } else if end == text.len() {
            ChunkPosition::Last
        } else {
            ChunkPosition::Middle
        };

        // base64 is pure ASCII, so byte offsets are char boundaries
        chunks.push(Chunk {
            position,
            data: &text[start..end],
        });
        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(len: usize) -> String {
        "A".repeat(len)
    }

    fn positions(chunks: &[Chunk<'_>]) -> Vec<ChunkPosition> {
        chunks.iter().map(|c| c.position).collect()
    }

    #[test]
    fn test_option_serialization_order() {
        assert_eq!(
            ControlOptions::for_position(ChunkPosition::Single).to_string(),
            "f=100,a=T"
        );
        assert_eq!(
            ControlOptions::for_position(ChunkPosition::First).to_string(),
            "f=100,a=T,m=1"
        );
        assert_eq!(
            ControlOptions::for_position(ChunkPosition::Middle).to_string(),
            "m=1"
        );
        assert_eq!(
            ControlOptions::for_position(ChunkPosition::Last).to_string(),
            ""
        );
        assert!(ControlOptions::for_position(ChunkPosition::Last).is_empty());
    }

    #[test]
    fn test_exact_chunk_size_is_single() {
        let text = text(CHUNK_SIZE);
        let chunks = split_chunks(&text);
        assert_eq!(positions(&chunks), vec![ChunkPosition::Single]);
        assert_eq!(chunks[0].data.len(), CHUNK_SIZE);
    }

    #[test]
    fn test_one_over_chunk_size_is_first_and_last() {
        let text = text(CHUNK_SIZE + 1);
        let chunks = split_chunks(&text);
        assert_eq!(
            positions(&chunks),
            vec![ChunkPosition::First, ChunkPosition::Last]
        );
        assert_eq!(chunks[0].data.len(), CHUNK_SIZE);
        assert_eq!(chunks[1].data.len(), 1);
    }

    #[test]
    fn test_middle_chunks() {
        let text = text(CHUNK_SIZE * 3 + 10);
        let chunks = split_chunks(&text);
        assert_eq!(
            positions(&chunks),
            vec![
                ChunkPosition::First,
                ChunkPosition::Middle,
                ChunkPosition::Middle,
                ChunkPosition::Last
            ]
        );
        assert!(chunks[..3].iter().all(|c| c.data.len() == CHUNK_SIZE));
        assert_eq!(chunks[3].data.len(), 10);
    }

    #[test]
    fn test_exact_multiple_ends_with_full_last_chunk() {
        let text = text(CHUNK_SIZE * 2);
        let chunks = split_chunks(&text);
        assert_eq!(
            positions(&chunks),
            vec![ChunkPosition::First, ChunkPosition::Last]
        );
        assert_eq!(chunks[1].data.len(), CHUNK_SIZE);
    }

    #[test]
    fn test_empty_text_is_single() {
        let chunks = split_chunks("");
        assert_eq!(positions(&chunks), vec![ChunkPosition::Single]);
        assert_eq!(chunks[0].data, "");
    }

    #[test]
    fn test_chunks_concatenate_to_input() {
        let text: String = (0..CHUNK_SIZE * 2 + 123)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let joined: String = split_chunks(&text).iter().map(|c| c.data).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_chunk_escape_sequence() {
        let single = Chunk {
            position: ChunkPosition::Single,
            data: "iVBORw0KGgo=",
        };
        assert_eq!(single.to_string(), "\x1b_Gf=100,a=T;iVBORw0KGgo=\x1b\\");

        let last = Chunk {
            position: ChunkPosition::Last,
            data: "AAAA",
        };
        assert_eq!(last.to_string(), "\x1b_G;AAAA\x1b\\");
    }

    #[test]
    fn test_transmission_base64_keeps_padding() {
        let payload = crate::encode::prepare_payload(
            vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
            crate::decode::SourceFormat::Png,
            crate::resize::ResizeOutcome::Unchanged(crate::decode::PixelGrid::new(
                image::DynamicImage::new_rgb8(1, 1),
            )),
        )
        .unwrap();

        let transmission = Transmission::new(&payload);
        assert_eq!(transmission.encoded(), "iVBORw0KGgo=");
        assert_eq!(positions(&transmission.chunks()), vec![ChunkPosition::Single]);
    }
}
