pub mod segment;
pub mod whisper;
pub mod word;

pub use segment::*;
pub use whisper::*;
pub use word::*;
