//! Line reconstruction and prefixing for relayed child output.
mod buffer;
mod format;
mod sink;

pub use buffer::LineBuffer;
pub use format::{format_line, LineFormat, PrefixConfig, PrefixFormat, StreamRole};
pub use sink::{Clock, LocalClock, StreamSink};
