mod generate;

pub use generate::{CONTENT_TYPE, compact_timestamp, render, render_now};
