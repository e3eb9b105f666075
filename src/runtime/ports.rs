//! Port metadata for filter inputs and outputs

use super::channel::ChannelType;

/// Direction of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// Schema describing a port's metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSchema {
    pub name: String,
    pub channel_type: ChannelType,
    pub index: usize,
    pub direction: PortDirection,
}

impl PortSchema {
    /// Create a new port schema
    pub fn new(
        name: impl Into<String>,
        channel_type: ChannelType,
        index: usize,
        direction: PortDirection,
    ) -> Self {
        Self {
            name: name.into(),
            channel_type,
            index,
            direction,
        }
    }
}
