pub mod manifest;
pub mod duration;
pub mod concat;
pub mod timestamp;
pub mod split;
