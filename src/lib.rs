pub mod config;
pub mod transcoder;

pub use config::{ConfigError, ConversionOptions, ConversionOptionsBuilder, ParserConfig};
pub use transcoder::{
    ConversionLogger, ConvertError, LogFacade, MemoryLogger, Node, ParseError, Transcoder,
    canonicalize_href, convert, convert_async, convert_with,
};
