pub mod music;
pub mod photos;
