pub mod markdown;

pub use markdown::render_markdown;
