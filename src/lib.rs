pub mod console;
pub mod params;
