use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Acquire,
    Release,
}

impl EventKind {
    const fn verb(&self) -> &'static str {
        match self {
            EventKind::Acquire => "acquiring",
            EventKind::Release => "releasing",
        }
    }
}

/// A single acquisition or release of raw storage.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEvent {
    #[serde(rename = "event")]
    pub kind: EventKind,
    pub elements: usize,
    pub bytes: usize,
    #[serde(rename = "type")]
    pub type_name: &'static str,
}

impl AllocationEvent {
    pub fn acquire<T>(elements: usize) -> Self {
        Self::new::<T>(EventKind::Acquire, elements)
    }

    pub fn release<T>(elements: usize) -> Self {
        Self::new::<T>(EventKind::Release, elements)
    }

    fn new<T>(kind: EventKind, elements: usize) -> Self {
        Self {
            kind,
            elements,
            bytes: size_of::<T>().saturating_mul(elements),
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl fmt::Display for AllocationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} storage for {} elements", self.kind.verb(), self.elements)
    }
}

/// Renders an [`AllocationEvent`] as a single diagnostic line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Encoder {
    #[default]
    Text,
    Json,
}

impl Encoder {
    pub fn encode(&self, event: &AllocationEvent, dst: &mut impl Write) -> std::io::Result<()> {
        match self {
            Encoder::Text => Text::encode(event, dst),
            Encoder::Json => Json::encode(event, dst),
        }
    }
}

struct Text;

impl Text {
    fn encode(event: &AllocationEvent, dst: &mut impl Write) -> std::io::Result<()> {
        dst.write_all(event.kind.verb().as_bytes())?;
        dst.write_all(b" storage for ")?;
        dst.write_all(itoa::Buffer::new().format(event.elements).as_bytes())?;
        dst.write_all(b" elements\n")?;
        Ok(())
    }
}

struct Json;

impl Json {
    fn encode(event: &AllocationEvent, dst: &mut impl Write) -> std::io::Result<()> {
        serde_json::to_writer(&mut *dst, event)
            .map_err(std::io::Error::other)
            .and_then(|_| dst.write_all(b"\n"))
    }
}
