mod common;
mod render;
