//! `OBX` result segments and the message they are collected into.

use std::fmt::Display;

use crate::err::EncodeError;

use super::tables::{self, ValueType};

/// Line terminator of the wire format.
pub const LINE_END: &str = "\r\n";

/// One coded result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based position within the message.
    pub index: usize,
    pub value_type: ValueType,
    pub code: String,
    pub code_name: String,
    pub coding_system: String,
    pub correlation_id: String,
    pub value: String,
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OBX|{}|{}|{}^{}^{}|{}|{}",
            self.index,
            self.value_type,
            self.code,
            self.code_name,
            self.coding_system,
            self.correlation_id,
            self.value
        )
    }
}

/// Source of segment indices; one per message.
#[derive(Debug, Default)]
pub struct SegmentCursor {
    last: usize,
}

impl SegmentCursor {
    /// Return the next index, starting at 1.
    pub fn advance(&mut self) -> usize {
        self.last += 1;
        self.last
    }
}

/// A complete message: header lines followed by result segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Vec<String>,
    pub segments: Vec<Segment>,
}

impl Message {
    /// Render as wire text, every line CRLF-terminated.
    pub fn to_wire(&self) -> String {
        let mut result = String::new();
        for line in &self.header {
            result.push_str(line);
            result.push_str(LINE_END);
        }
        for segment in &self.segments {
            result.push_str(&segment.to_string());
            result.push_str(LINE_END);
        }
        result
    }
}

/// Accumulates one message; owns the segment cursor for that message.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    cursor: SegmentCursor,
    message: Message,
}

impl MessageBuilder {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            cursor: SegmentCursor::default(),
            message: Message {
                header,
                segments: Vec::new(),
            },
        }
    }

    /// Segment builder emitting with `correlation_id`.
    pub fn segments_for<'a>(&'a mut self, correlation_id: &'a str) -> SegmentBuilder<'a> {
        SegmentBuilder {
            builder: self,
            correlation_id,
        }
    }

    pub fn build(self) -> Message {
        self.message
    }
}

/// Emits segments that share one correlation id.
pub struct SegmentBuilder<'a> {
    builder: &'a mut MessageBuilder,
    correlation_id: &'a str,
}

impl SegmentBuilder<'_> {
    /// Append a segment for `code` with `value`.
    pub fn emit(&mut self, code: &str, value: impl Display) -> Result<(), EncodeError> {
        let info = tables::code_info(code)?;
        let segment = Segment {
            index: self.builder.cursor.advance(),
            value_type: info.value_type,
            code: code.to_string(),
            code_name: info.name.to_string(),
            coding_system: tables::CODING_SYSTEM.to_string(),
            correlation_id: self.correlation_id.to_string(),
            value: value.to_string(),
        };
        self.builder.message.segments.push(segment);
        Ok(())
    }
}
